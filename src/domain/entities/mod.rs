pub mod feedback_submission;
pub mod social_media_post;
pub mod user;

pub use feedback_submission::{
    ExecutionIdPolicy, FeedbackCategory, FeedbackContent, FeedbackPatch, FeedbackSubmission,
    ImageDrafts, PlatformDrafts,
};
pub use social_media_post::{PostDetails, PostPatch, SocialMediaPost};
pub use user::User;
