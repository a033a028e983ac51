pub mod diagnostics_routes;
pub mod feedback_routes;
pub mod post_routes;
pub mod user_routes;
pub mod webhook_routes;

pub use diagnostics_routes::*;
pub use feedback_routes::*;
pub use post_routes::*;
pub use user_routes::*;
pub use webhook_routes::*;
