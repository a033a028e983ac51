use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ImageFields, PostImageType, PostStatus};

/// Free-form request details of a post. None of these carry invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetails {
    pub content_creator: Option<String>,
    pub email: Option<String>,
    pub feedback_submission_id: Option<String>,
    pub social_platform: Option<String>,
    pub custom_content: Option<String>,
    pub ai_prompt: Option<String>,
    pub excluded_llms: Option<String>,
    pub image_file_path: Option<String>,
    pub ai_image_style: Option<String>,
    pub ai_image_description: Option<String>,
    pub linkedin_image_llm: Option<String>,
    pub twitter_image_llm: Option<String>,
}

/// Partial update of a post. The outer `Option` says whether a key was
/// supplied, the inner one carries an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub content_creator: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub feedback_submission_id: Option<Option<String>>,
    pub social_platform: Option<Option<String>>,
    pub custom_content: Option<Option<String>>,
    pub ai_prompt: Option<Option<String>>,
    pub excluded_llms: Option<Option<String>>,
    pub post_image_type: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub uploaded_image_url: Option<Option<String>>,
    pub image_file_path: Option<Option<String>>,
    pub ai_image_style: Option<Option<String>>,
    pub ai_image_description: Option<Option<String>>,
    pub linkedin_image_llm: Option<Option<String>>,
    pub twitter_image_llm: Option<Option<String>>,
    pub status: Option<Option<String>>,
}

fn apply<T>(target: &mut Option<T>, update: Option<Option<T>>) {
    if let Some(value) = update {
        *target = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMediaPost {
    id: Option<i32>,
    post_id: String,
    details: PostDetails,
    post_image_type: PostImageType,
    images: ImageFields,
    status: PostStatus,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl SocialMediaPost {
    /// Builds a new post, reconciling the image fields against `image_type`.
    pub fn new(
        details: PostDetails,
        image_type: PostImageType,
        images: ImageFields,
        status: Option<PostStatus>,
    ) -> Self {
        let images = images.reconcile(&image_type);
        Self {
            id: None,
            post_id: Uuid::new_v4().to_string(),
            details,
            post_image_type: image_type,
            images,
            status: status.unwrap_or_default(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    /// Rebuilds a stored post as-is, without reconciling.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: i32,
        post_id: String,
        details: PostDetails,
        post_image_type: PostImageType,
        images: ImageFields,
        status: PostStatus,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Some(id),
            post_id,
            details,
            post_image_type,
            images,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn details(&self) -> &PostDetails {
        &self.details
    }

    pub fn post_image_type(&self) -> &PostImageType {
        &self.post_image_type
    }

    pub fn images(&self) -> &ImageFields {
        &self.images
    }

    pub fn status(&self) -> &PostStatus {
        &self.status
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn feedback_submission_id(&self) -> Option<&str> {
        self.details.feedback_submission_id.as_deref()
    }

    /// Applies the supplied keys. Image values sent in the patch are
    /// reconciled against the resulting image type first and win over the
    /// stored ones; only when the patch carries no usable image is the
    /// stored pair reconciled instead.
    pub fn apply_patch(&mut self, patch: PostPatch) {
        let d = &mut self.details;
        apply(&mut d.content_creator, patch.content_creator);
        apply(&mut d.email, patch.email);
        apply(&mut d.feedback_submission_id, patch.feedback_submission_id);
        apply(&mut d.social_platform, patch.social_platform);
        apply(&mut d.custom_content, patch.custom_content);
        apply(&mut d.ai_prompt, patch.ai_prompt);
        apply(&mut d.excluded_llms, patch.excluded_llms);
        apply(&mut d.image_file_path, patch.image_file_path);
        apply(&mut d.ai_image_style, patch.ai_image_style);
        apply(&mut d.ai_image_description, patch.ai_image_description);
        apply(&mut d.linkedin_image_llm, patch.linkedin_image_llm);
        apply(&mut d.twitter_image_llm, patch.twitter_image_llm);

        if let Some(label) = patch.post_image_type {
            self.post_image_type = PostImageType::from_label(label.as_deref());
        }
        if let Some(status) = patch.status {
            self.status = status.map(PostStatus::from).unwrap_or_default();
        }

        let incoming = ImageFields::new(
            patch.image_url.clone().flatten(),
            patch.uploaded_image_url.clone().flatten(),
        )
        .reconcile(&self.post_image_type);

        self.images = if incoming.is_empty() {
            let mut merged = std::mem::take(&mut self.images);
            apply(&mut merged.image_url, patch.image_url);
            apply(&mut merged.uploaded_image_url, patch.uploaded_image_url);
            merged.reconcile(&self.post_image_type)
        } else {
            incoming
        };

        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_post() -> SocialMediaPost {
        SocialMediaPost::new(
            PostDetails {
                content_creator: Some("a@b.com".to_string()),
                ..PostDetails::default()
            },
            PostImageType::from_label(Some("Yes, I have an image URL")),
            ImageFields::new(
                Some("http://x/y.jpg".to_string()),
                Some("http://u/z.jpg".to_string()),
            ),
            None,
        )
    }

    #[test]
    fn test_new_post_reconciles_images() {
        let post = url_post();
        assert_eq!(post.post_image_type(), &PostImageType::ImageUrl);
        assert_eq!(post.images().image_url.as_deref(), Some("http://x/y.jpg"));
        assert_eq!(post.images().uploaded_image_url, None);
        assert!(post.status().is_pending());
        assert!(Uuid::parse_str(post.post_id()).is_ok());
    }

    #[test]
    fn test_patch_switching_type_moves_image() {
        let mut post = url_post();
        post.apply_patch(PostPatch {
            post_image_type: Some(Some("Upload my own".to_string())),
            ..PostPatch::default()
        });

        assert_eq!(post.post_image_type(), &PostImageType::UploadImage);
        assert_eq!(post.images().image_url, None);
        assert_eq!(post.images().uploaded_image_url.as_deref(), Some("http://x/y.jpg"));
        assert!(post.updated_at().is_some());
    }

    #[test]
    fn test_patch_without_image_keys_keeps_images() {
        let mut post = url_post();
        post.apply_patch(PostPatch {
            status: Some(Some("completed".to_string())),
            social_platform: Some(Some("LinkedIn".to_string())),
            ..PostPatch::default()
        });

        assert_eq!(post.status(), &PostStatus::Completed);
        assert_eq!(post.details().social_platform.as_deref(), Some("LinkedIn"));
        assert_eq!(post.images().image_url.as_deref(), Some("http://x/y.jpg"));
    }

    #[test]
    fn test_patch_image_beats_stored_image() {
        let mut post = SocialMediaPost::new(
            PostDetails::default(),
            PostImageType::UploadImage,
            ImageFields::new(None, Some("http://u/old.jpg".to_string())),
            None,
        );
        post.apply_patch(PostPatch {
            post_image_type: Some(Some("Yes, Upload Image".to_string())),
            image_url: Some(Some("http://x/new.jpg".to_string())),
            ..PostPatch::default()
        });

        assert_eq!(post.images().image_url, None);
        assert_eq!(post.images().uploaded_image_url.as_deref(), Some("http://x/new.jpg"));
    }

    #[test]
    fn test_patch_image_without_type_uses_stored_type() {
        let mut post = url_post();
        post.apply_patch(PostPatch {
            uploaded_image_url: Some(Some("http://u/fresh.jpg".to_string())),
            ..PostPatch::default()
        });

        assert_eq!(post.images().image_url.as_deref(), Some("http://u/fresh.jpg"));
        assert_eq!(post.images().uploaded_image_url, None);
    }

    #[test]
    fn test_patch_null_clears_field() {
        let mut post = url_post();
        post.apply_patch(PostPatch {
            content_creator: Some(None),
            post_image_type: Some(None),
            ..PostPatch::default()
        });

        assert_eq!(post.details().content_creator, None);
        assert_eq!(post.post_image_type(), &PostImageType::NoImageNeeded);
        assert!(post.images().is_empty());
    }
}
