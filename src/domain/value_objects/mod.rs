pub mod feedback_field;
pub mod image_fields;
pub mod password_hash;
pub mod post_image_type;
pub mod post_status;

pub use feedback_field::FeedbackField;
pub use image_fields::ImageFields;
pub use password_hash::PasswordHash;
pub use post_image_type::PostImageType;
pub use post_status::PostStatus;
