pub mod diagnostics_handler;
pub mod feedback_handler;
pub mod post_handler;
pub mod user_handler;
pub mod webhook_handler;

pub use diagnostics_handler::DiagnosticsHandler;
pub use feedback_handler::FeedbackHandler;
pub use post_handler::PostHandler;
pub use user_handler::UserHandler;
pub use webhook_handler::WebhookHandler;
