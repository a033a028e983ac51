pub mod feedback_repository;
pub mod post_repository;
pub mod user_repository;

pub use feedback_repository::{FeedbackRepository, FeedbackRepositoryError};
pub use post_repository::{PostRepository, PostRepositoryError};
pub use user_repository::{UserRepository, UserRepositoryError};
