pub mod database_admin;
pub mod image_uploader;
pub mod webhook_client;

pub use database_admin::{DatabaseAdmin, MigrationStatus};
pub use image_uploader::{ImageUpload, ImageUploader};
pub use webhook_client::{UpstreamError, WebhookClient, WebhookReply, WebhookTarget};
