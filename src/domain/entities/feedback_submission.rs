use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{FeedbackField, ImageFields};

/// Three candidate drafts for one platform plus the reviewer's verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDrafts {
    pub grok_content: Option<String>,
    pub o3_content: Option<String>,
    pub gemini_content: Option<String>,
    pub feedback: Option<String>,
    pub chosen_llm: Option<String>,
    pub custom_content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDrafts {
    pub stable_diffusion_image_url: Option<String>,
    pub pixabay_image_url: Option<String>,
    pub gpt1_image_url: Option<String>,
    pub image_feedback: Option<String>,
    pub image_chosen_llm: Option<String>,
}

/// Everything about a submission a client is allowed to write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackContent {
    pub n8n_execution_id: Option<String>,
    pub email: Option<String>,
    pub linkedin: PlatformDrafts,
    pub x: PlatformDrafts,
    pub images: ImageDrafts,
    pub delivery: ImageFields,
    pub linkedin_image_llm: Option<String>,
    pub twitter_image_llm: Option<String>,
}

impl FeedbackContent {
    pub fn field(&self, field: FeedbackField) -> Option<&str> {
        let value = match field {
            FeedbackField::N8nExecutionId => &self.n8n_execution_id,
            FeedbackField::Email => &self.email,
            FeedbackField::LinkedinGrokContent => &self.linkedin.grok_content,
            FeedbackField::LinkedinO3Content => &self.linkedin.o3_content,
            FeedbackField::LinkedinGeminiContent => &self.linkedin.gemini_content,
            FeedbackField::LinkedinFeedback => &self.linkedin.feedback,
            FeedbackField::LinkedinChosenLlm => &self.linkedin.chosen_llm,
            FeedbackField::LinkedinCustomContent => &self.linkedin.custom_content,
            FeedbackField::XGrokContent => &self.x.grok_content,
            FeedbackField::XO3Content => &self.x.o3_content,
            FeedbackField::XGeminiContent => &self.x.gemini_content,
            FeedbackField::XFeedback => &self.x.feedback,
            FeedbackField::XChosenLlm => &self.x.chosen_llm,
            FeedbackField::XCustomContent => &self.x.custom_content,
            FeedbackField::StableDiffusionImageUrl => &self.images.stable_diffusion_image_url,
            FeedbackField::PixabayImageUrl => &self.images.pixabay_image_url,
            FeedbackField::Gpt1ImageUrl => &self.images.gpt1_image_url,
            FeedbackField::ImageFeedback => &self.images.image_feedback,
            FeedbackField::ImageChosenLlm => &self.images.image_chosen_llm,
            FeedbackField::ImageUrl => &self.delivery.image_url,
            FeedbackField::UploadedImageUrl => &self.delivery.uploaded_image_url,
            FeedbackField::LinkedinImageLlm => &self.linkedin_image_llm,
            FeedbackField::TwitterImageLlm => &self.twitter_image_llm,
        };
        value.as_deref()
    }

    fn field_mut(&mut self, field: FeedbackField) -> &mut Option<String> {
        match field {
            FeedbackField::N8nExecutionId => &mut self.n8n_execution_id,
            FeedbackField::Email => &mut self.email,
            FeedbackField::LinkedinGrokContent => &mut self.linkedin.grok_content,
            FeedbackField::LinkedinO3Content => &mut self.linkedin.o3_content,
            FeedbackField::LinkedinGeminiContent => &mut self.linkedin.gemini_content,
            FeedbackField::LinkedinFeedback => &mut self.linkedin.feedback,
            FeedbackField::LinkedinChosenLlm => &mut self.linkedin.chosen_llm,
            FeedbackField::LinkedinCustomContent => &mut self.linkedin.custom_content,
            FeedbackField::XGrokContent => &mut self.x.grok_content,
            FeedbackField::XO3Content => &mut self.x.o3_content,
            FeedbackField::XGeminiContent => &mut self.x.gemini_content,
            FeedbackField::XFeedback => &mut self.x.feedback,
            FeedbackField::XChosenLlm => &mut self.x.chosen_llm,
            FeedbackField::XCustomContent => &mut self.x.custom_content,
            FeedbackField::StableDiffusionImageUrl => &mut self.images.stable_diffusion_image_url,
            FeedbackField::PixabayImageUrl => &mut self.images.pixabay_image_url,
            FeedbackField::Gpt1ImageUrl => &mut self.images.gpt1_image_url,
            FeedbackField::ImageFeedback => &mut self.images.image_feedback,
            FeedbackField::ImageChosenLlm => &mut self.images.image_chosen_llm,
            FeedbackField::ImageUrl => &mut self.delivery.image_url,
            FeedbackField::UploadedImageUrl => &mut self.delivery.uploaded_image_url,
            FeedbackField::LinkedinImageLlm => &mut self.linkedin_image_llm,
            FeedbackField::TwitterImageLlm => &mut self.twitter_image_llm,
        }
    }

    pub fn set_field(&mut self, field: FeedbackField, value: Option<String>) {
        *self.field_mut(field) = value;
    }

    /// Iterates `(field, value)` for every writable field, in wire order.
    pub fn entries(&self) -> impl Iterator<Item = (FeedbackField, Option<&str>)> + '_ {
        FeedbackField::ALL
            .into_iter()
            .map(move |field| (field, self.field(field)))
    }
}

/// A content category in which reviewers pick one feedback method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCategory {
    LinkedinText,
    XText,
    Image,
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeedbackCategory::LinkedinText => "linkedin",
            FeedbackCategory::XText => "x",
            FeedbackCategory::Image => "image",
        };
        f.write_str(name)
    }
}

/// How an `n8n_execution_id` in an update is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionIdPolicy {
    Overwrite,
    /// Only written while the stored value is empty.
    FirstWriteWins,
}

/// An ordered set of field assignments; `None` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackPatch {
    entries: Vec<(FeedbackField, Option<String>)>,
}

impl FeedbackPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FeedbackField, value: Option<String>) {
        self.entries.retain(|(existing, _)| *existing != field);
        self.entries.push((field, value));
    }

    pub fn remove(&mut self, field: FeedbackField) -> Option<Option<String>> {
        let index = self.entries.iter().position(|(f, _)| *f == field)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, field: FeedbackField) -> Option<&Option<String>> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> Vec<FeedbackField> {
        self.entries.iter().map(|(f, _)| *f).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FeedbackField, Option<String>)> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    id: Option<i32>,
    submission_id: String,
    content: FeedbackContent,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl FeedbackSubmission {
    pub fn new(content: FeedbackContent) -> Self {
        Self {
            id: None,
            submission_id: Uuid::new_v4().to_string(),
            content,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    pub fn restore(
        id: i32,
        submission_id: String,
        content: FeedbackContent,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Some(id),
            submission_id,
            content,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    pub fn content(&self) -> &FeedbackContent {
        &self.content
    }

    pub fn n8n_execution_id(&self) -> Option<&str> {
        self.content.n8n_execution_id.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.content.email.as_deref()
    }

    pub fn image_fields(&self) -> &ImageFields {
        &self.content.delivery
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn field(&self, field: FeedbackField) -> Option<&str> {
        self.content.field(field)
    }

    /// Applies `patch` and returns the fields that were actually written.
    pub fn apply_patch(
        &mut self,
        patch: &FeedbackPatch,
        policy: ExecutionIdPolicy,
    ) -> Vec<FeedbackField> {
        let mut written = Vec::with_capacity(patch.len());

        for (field, value) in patch.iter() {
            if *field == FeedbackField::N8nExecutionId
                && policy == ExecutionIdPolicy::FirstWriteWins
                && !self.assign_execution_id_once(value.clone())
            {
                continue;
            }

            self.content.set_field(*field, value.clone());
            written.push(*field);
        }

        if !written.is_empty() {
            self.touch();
        }
        written
    }

    /// Writes the execution id only while the stored one is null or blank.
    /// Returns whether the value was written.
    pub fn assign_execution_id_once(&mut self, value: Option<String>) -> bool {
        let current = self.content.n8n_execution_id.as_deref().unwrap_or("");
        if !current.trim().is_empty() {
            tracing::info!(
                "Keeping n8n_execution_id '{}' for submission {}",
                current,
                self.submission_id
            );
            return false;
        }

        tracing::info!(
            "Setting n8n_execution_id for submission {} to {:?}",
            self.submission_id,
            value
        );
        self.content.n8n_execution_id = value;
        true
    }

    /// Replaces the delivery image fields with those of a linked post.
    pub fn overlay_images(&mut self, images: ImageFields) {
        self.content.delivery = images;
    }

    /// Categories where more than one feedback method is filled in.
    pub fn conflicting_feedback_categories(&self) -> Vec<FeedbackCategory> {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        let count = |values: [&Option<String>; 3]| values.into_iter().filter(|v| filled(v)).count();

        let mut conflicts = Vec::new();
        let linkedin = &self.content.linkedin;
        if count([&linkedin.feedback, &linkedin.chosen_llm, &linkedin.custom_content]) > 1 {
            conflicts.push(FeedbackCategory::LinkedinText);
        }
        let x = &self.content.x;
        if count([&x.feedback, &x.chosen_llm, &x.custom_content]) > 1 {
            conflicts.push(FeedbackCategory::XText);
        }
        // Images have no custom-content option.
        let images = &self.content.images;
        if count([&images.image_feedback, &images.image_chosen_llm, &None]) > 1 {
            conflicts.push(FeedbackCategory::Image);
        }
        conflicts
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
