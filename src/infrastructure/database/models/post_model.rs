use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::entities::{PostDetails, SocialMediaPost};
use crate::domain::value_objects::{ImageFields, PostImageType, PostStatus};
use crate::infrastructure::database::schema::social_media_posts;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = social_media_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SocialMediaPostModel {
    pub id: i32,
    pub post_id: String,
    pub content_creator: Option<String>,
    pub email: Option<String>,
    pub feedback_submission_id: Option<String>,
    pub social_platform: Option<String>,
    pub custom_content: Option<String>,
    pub ai_prompt: Option<String>,
    pub excluded_llms: Option<String>,
    pub post_image_type: Option<String>,
    pub image_url: Option<String>,
    pub uploaded_image_url: Option<String>,
    pub image_file_path: Option<String>,
    pub ai_image_style: Option<String>,
    pub ai_image_description: Option<String>,
    pub linkedin_image_llm: Option<String>,
    pub twitter_image_llm: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = social_media_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewSocialMediaPostModel {
    pub post_id: String,
    pub content_creator: Option<String>,
    pub email: Option<String>,
    pub feedback_submission_id: Option<String>,
    pub social_platform: Option<String>,
    pub custom_content: Option<String>,
    pub ai_prompt: Option<String>,
    pub excluded_llms: Option<String>,
    pub post_image_type: Option<String>,
    pub image_url: Option<String>,
    pub uploaded_image_url: Option<String>,
    pub image_file_path: Option<String>,
    pub ai_image_style: Option<String>,
    pub ai_image_description: Option<String>,
    pub linkedin_image_llm: Option<String>,
    pub twitter_image_llm: Option<String>,
    pub status: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&SocialMediaPost> for NewSocialMediaPostModel {
    fn from(post: &SocialMediaPost) -> Self {
        let d = post.details().clone();
        let images = post.images().clone();
        Self {
            post_id: post.post_id().to_string(),
            content_creator: d.content_creator,
            email: d.email,
            feedback_submission_id: d.feedback_submission_id,
            social_platform: d.social_platform,
            custom_content: d.custom_content,
            ai_prompt: d.ai_prompt,
            excluded_llms: d.excluded_llms,
            post_image_type: Some(post.post_image_type().as_str().to_string()),
            image_url: images.image_url,
            uploaded_image_url: images.uploaded_image_url,
            image_file_path: d.image_file_path,
            ai_image_style: d.ai_image_style,
            ai_image_description: d.ai_image_description,
            linkedin_image_llm: d.linkedin_image_llm,
            twitter_image_llm: d.twitter_image_llm,
            status: post.status().as_str().to_string(),
            updated_at: post.updated_at(),
        }
    }
}

impl From<SocialMediaPostModel> for SocialMediaPost {
    fn from(model: SocialMediaPostModel) -> Self {
        let details = PostDetails {
            content_creator: model.content_creator,
            email: model.email,
            feedback_submission_id: model.feedback_submission_id,
            social_platform: model.social_platform,
            custom_content: model.custom_content,
            ai_prompt: model.ai_prompt,
            excluded_llms: model.excluded_llms,
            image_file_path: model.image_file_path,
            ai_image_style: model.ai_image_style,
            ai_image_description: model.ai_image_description,
            linkedin_image_llm: model.linkedin_image_llm,
            twitter_image_llm: model.twitter_image_llm,
        };

        SocialMediaPost::restore(
            model.id,
            model.post_id,
            details,
            PostImageType::from_label(model.post_image_type.as_deref()),
            ImageFields::new(model.image_url, model.uploaded_image_url),
            PostStatus::from(model.status),
            model.created_at,
            model.updated_at,
        )
    }
}
