pub mod change_password;
pub mod create_feedback;
pub mod create_post;
pub mod delete_post;
pub mod get_feedback;
pub mod get_post;
pub mod list_feedback;
pub mod list_posts;
pub mod list_users;
pub mod login_user;
pub mod proxy_webhook;
pub mod submit_feedback_webhook;
pub mod update_feedback;
pub mod update_feedback_raw;
pub mod update_post;
pub mod upload_image;

pub use change_password::ChangePasswordUseCase;
pub use create_feedback::CreateFeedbackUseCase;
pub use create_post::CreatePostUseCase;
pub use delete_post::DeletePostUseCase;
pub use get_feedback::GetFeedbackUseCase;
pub use get_post::GetPostUseCase;
pub use list_feedback::ListFeedbackUseCase;
pub use list_posts::ListPostsUseCase;
pub use list_users::ListUsersUseCase;
pub use login_user::LoginUserUseCase;
pub use proxy_webhook::ProxyWebhookUseCase;
pub use submit_feedback_webhook::SubmitFeedbackWebhookUseCase;
pub use update_feedback::UpdateFeedbackUseCase;
pub use update_feedback_raw::UpdateFeedbackRawUseCase;
pub use update_post::UpdatePostUseCase;
pub use upload_image::UploadImageUseCase;
