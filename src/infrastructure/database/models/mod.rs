pub mod feedback_model;
pub mod post_model;
pub mod user_model;

pub use feedback_model::*;
pub use post_model::*;
pub use user_model::*;
