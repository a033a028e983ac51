use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::entities::{FeedbackContent, FeedbackSubmission, ImageDrafts, PlatformDrafts};
use crate::domain::value_objects::ImageFields;
use crate::infrastructure::database::schema::feedback_submissions;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = feedback_submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FeedbackSubmissionModel {
    pub id: i32,
    pub submission_id: String,
    pub n8n_execution_id: Option<String>,
    pub email: Option<String>,
    pub linkedin_grok_content: Option<String>,
    pub linkedin_o3_content: Option<String>,
    pub linkedin_gemini_content: Option<String>,
    pub linkedin_feedback: Option<String>,
    pub linkedin_chosen_llm: Option<String>,
    pub linkedin_custom_content: Option<String>,
    pub x_grok_content: Option<String>,
    pub x_o3_content: Option<String>,
    pub x_gemini_content: Option<String>,
    pub x_feedback: Option<String>,
    pub x_chosen_llm: Option<String>,
    pub x_custom_content: Option<String>,
    pub stable_diffusion_image_url: Option<String>,
    pub pixabay_image_url: Option<String>,
    pub gpt1_image_url: Option<String>,
    pub image_feedback: Option<String>,
    pub image_chosen_llm: Option<String>,
    pub image_url: Option<String>,
    pub uploaded_image_url: Option<String>,
    pub linkedin_image_llm: Option<String>,
    pub twitter_image_llm: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert and full-row update shape. `None` writes NULL on update so cleared
/// fields really clear.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = feedback_submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewFeedbackSubmissionModel {
    pub submission_id: String,
    pub n8n_execution_id: Option<String>,
    pub email: Option<String>,
    pub linkedin_grok_content: Option<String>,
    pub linkedin_o3_content: Option<String>,
    pub linkedin_gemini_content: Option<String>,
    pub linkedin_feedback: Option<String>,
    pub linkedin_chosen_llm: Option<String>,
    pub linkedin_custom_content: Option<String>,
    pub x_grok_content: Option<String>,
    pub x_o3_content: Option<String>,
    pub x_gemini_content: Option<String>,
    pub x_feedback: Option<String>,
    pub x_chosen_llm: Option<String>,
    pub x_custom_content: Option<String>,
    pub stable_diffusion_image_url: Option<String>,
    pub pixabay_image_url: Option<String>,
    pub gpt1_image_url: Option<String>,
    pub image_feedback: Option<String>,
    pub image_chosen_llm: Option<String>,
    pub image_url: Option<String>,
    pub uploaded_image_url: Option<String>,
    pub linkedin_image_llm: Option<String>,
    pub twitter_image_llm: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&FeedbackSubmission> for NewFeedbackSubmissionModel {
    fn from(submission: &FeedbackSubmission) -> Self {
        let c = submission.content().clone();
        Self {
            submission_id: submission.submission_id().to_string(),
            n8n_execution_id: c.n8n_execution_id,
            email: c.email,
            linkedin_grok_content: c.linkedin.grok_content,
            linkedin_o3_content: c.linkedin.o3_content,
            linkedin_gemini_content: c.linkedin.gemini_content,
            linkedin_feedback: c.linkedin.feedback,
            linkedin_chosen_llm: c.linkedin.chosen_llm,
            linkedin_custom_content: c.linkedin.custom_content,
            x_grok_content: c.x.grok_content,
            x_o3_content: c.x.o3_content,
            x_gemini_content: c.x.gemini_content,
            x_feedback: c.x.feedback,
            x_chosen_llm: c.x.chosen_llm,
            x_custom_content: c.x.custom_content,
            stable_diffusion_image_url: c.images.stable_diffusion_image_url,
            pixabay_image_url: c.images.pixabay_image_url,
            gpt1_image_url: c.images.gpt1_image_url,
            image_feedback: c.images.image_feedback,
            image_chosen_llm: c.images.image_chosen_llm,
            image_url: c.delivery.image_url,
            uploaded_image_url: c.delivery.uploaded_image_url,
            linkedin_image_llm: c.linkedin_image_llm,
            twitter_image_llm: c.twitter_image_llm,
            updated_at: submission.updated_at(),
        }
    }
}

impl From<FeedbackSubmissionModel> for FeedbackSubmission {
    fn from(model: FeedbackSubmissionModel) -> Self {
        let content = FeedbackContent {
            n8n_execution_id: model.n8n_execution_id,
            email: model.email,
            linkedin: PlatformDrafts {
                grok_content: model.linkedin_grok_content,
                o3_content: model.linkedin_o3_content,
                gemini_content: model.linkedin_gemini_content,
                feedback: model.linkedin_feedback,
                chosen_llm: model.linkedin_chosen_llm,
                custom_content: model.linkedin_custom_content,
            },
            x: PlatformDrafts {
                grok_content: model.x_grok_content,
                o3_content: model.x_o3_content,
                gemini_content: model.x_gemini_content,
                feedback: model.x_feedback,
                chosen_llm: model.x_chosen_llm,
                custom_content: model.x_custom_content,
            },
            images: ImageDrafts {
                stable_diffusion_image_url: model.stable_diffusion_image_url,
                pixabay_image_url: model.pixabay_image_url,
                gpt1_image_url: model.gpt1_image_url,
                image_feedback: model.image_feedback,
                image_chosen_llm: model.image_chosen_llm,
            },
            delivery: ImageFields::new(model.image_url, model.uploaded_image_url),
            linkedin_image_llm: model.linkedin_image_llm,
            twitter_image_llm: model.twitter_image_llm,
        };

        FeedbackSubmission::restore(
            model.id,
            model.submission_id,
            content,
            model.created_at,
            model.updated_at,
        )
    }
}
