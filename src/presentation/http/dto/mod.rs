pub mod feedback_dto;
pub mod post_dto;
pub mod response_dto;
pub mod user_dto;
pub mod webhook_dto;

pub use feedback_dto::*;
pub use post_dto::*;
pub use response_dto::*;
pub use user_dto::*;
pub use webhook_dto::*;
