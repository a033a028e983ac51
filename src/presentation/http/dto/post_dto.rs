use serde::{Deserialize, Deserializer, Serialize};

use crate::application::use_cases::create_post::CreatePostRequest;
use crate::domain::entities::{PostDetails, PostPatch, SocialMediaPost};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostDto {
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
    pub status: Option<String>,
}

impl From<CreatePostDto> for CreatePostRequest {
    fn from(dto: CreatePostDto) -> Self {
        Self {
            details: PostDetails {
                content_creator: dto.content_creator,
                email: dto.email,
                feedback_submission_id: dto.feedback_submission_id,
                social_platform: dto.social_platform,
                custom_content: dto.custom_content,
                ai_prompt: dto.ai_prompt,
                excluded_llms: dto.excluded_llms,
                image_file_path: dto.image_file_path,
                ai_image_style: dto.ai_image_style,
                ai_image_description: dto.ai_image_description,
                linkedin_image_llm: dto.linkedin_image_llm,
                twitter_image_llm: dto.twitter_image_llm,
            },
            post_image_type: dto.post_image_type,
            image_url: dto.image_url,
            uploaded_image_url: dto.uploaded_image_url,
            status: dto.status,
        }
    }
}

/// Present keys become `Some`, so an explicit `null` is `Some(None)`.
fn deserialize_some<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostDto {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub content_creator: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub feedback_submission_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub social_platform: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub custom_content: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub ai_prompt: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub excluded_llms: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub post_image_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub uploaded_image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub image_file_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub ai_image_style: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub ai_image_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub linkedin_image_llm: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub twitter_image_llm: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<String>>,
}

impl From<UpdatePostDto> for PostPatch {
    fn from(dto: UpdatePostDto) -> Self {
        Self {
            content_creator: dto.content_creator,
            email: dto.email,
            feedback_submission_id: dto.feedback_submission_id,
            social_platform: dto.social_platform,
            custom_content: dto.custom_content,
            ai_prompt: dto.ai_prompt,
            excluded_llms: dto.excluded_llms,
            post_image_type: dto.post_image_type,
            image_url: dto.image_url,
            uploaded_image_url: dto.uploaded_image_url,
            image_file_path: dto.image_file_path,
            ai_image_style: dto.ai_image_style,
            ai_image_description: dto.ai_image_description,
            linkedin_image_llm: dto.linkedin_image_llm,
            twitter_image_llm: dto.twitter_image_llm,
            status: dto.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDto {
    pub id: Option<i32>,
    pub post_id: String,
    pub content_creator: Option<String>,
    pub email: Option<String>,
    pub feedback_submission_id: Option<String>,
    pub social_platform: Option<String>,
    pub custom_content: Option<String>,
    pub ai_prompt: Option<String>,
    pub excluded_llms: Option<String>,
    pub post_image_type: String,
    pub image_url: Option<String>,
    pub uploaded_image_url: Option<String>,
    pub image_file_path: Option<String>,
    pub ai_image_style: Option<String>,
    pub ai_image_description: Option<String>,
    pub linkedin_image_llm: Option<String>,
    pub twitter_image_llm: Option<String>,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<SocialMediaPost> for PostDto {
    fn from(post: SocialMediaPost) -> Self {
        let d = post.details().clone();
        let images = post.images().clone();
        Self {
            id: post.id(),
            post_id: post.post_id().to_string(),
            content_creator: d.content_creator,
            email: d.email,
            feedback_submission_id: d.feedback_submission_id,
            social_platform: d.social_platform,
            custom_content: d.custom_content,
            ai_prompt: d.ai_prompt,
            excluded_llms: d.excluded_llms,
            post_image_type: post.post_image_type().as_str().to_string(),
            image_url: images.image_url,
            uploaded_image_url: images.uploaded_image_url,
            image_file_path: d.image_file_path,
            ai_image_style: d.ai_image_style,
            ai_image_description: d.ai_image_description,
            linkedin_image_llm: d.linkedin_image_llm,
            twitter_image_llm: d.twitter_image_llm,
            status: post.status().as_str().to_string(),
            created_at: post.created_at().map(|t| t.to_rfc3339()),
            updated_at: post.updated_at().map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub status: Option<String>,
}

fn default_limit() -> i64 {
    100
}
