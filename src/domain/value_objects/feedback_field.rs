/// Every client-writable column of a feedback submission.
///
/// Keeps the wire name of each field in one place so typed updates, raw JSON
/// updates and webhook payloads agree on spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackField {
    N8nExecutionId,
    Email,
    LinkedinGrokContent,
    LinkedinO3Content,
    LinkedinGeminiContent,
    LinkedinFeedback,
    LinkedinChosenLlm,
    LinkedinCustomContent,
    XGrokContent,
    XO3Content,
    XGeminiContent,
    XFeedback,
    XChosenLlm,
    XCustomContent,
    StableDiffusionImageUrl,
    PixabayImageUrl,
    Gpt1ImageUrl,
    ImageFeedback,
    ImageChosenLlm,
    ImageUrl,
    UploadedImageUrl,
    LinkedinImageLlm,
    TwitterImageLlm,
}

/// Keys a client may send but which are never written.
pub const PROTECTED_FIELDS: [&str; 4] = ["id", "submission_id", "created_at", "updated_at"];

impl FeedbackField {
    pub const ALL: [FeedbackField; 23] = [
        FeedbackField::N8nExecutionId,
        FeedbackField::Email,
        FeedbackField::LinkedinGrokContent,
        FeedbackField::LinkedinO3Content,
        FeedbackField::LinkedinGeminiContent,
        FeedbackField::LinkedinFeedback,
        FeedbackField::LinkedinChosenLlm,
        FeedbackField::LinkedinCustomContent,
        FeedbackField::XGrokContent,
        FeedbackField::XO3Content,
        FeedbackField::XGeminiContent,
        FeedbackField::XFeedback,
        FeedbackField::XChosenLlm,
        FeedbackField::XCustomContent,
        FeedbackField::StableDiffusionImageUrl,
        FeedbackField::PixabayImageUrl,
        FeedbackField::Gpt1ImageUrl,
        FeedbackField::ImageFeedback,
        FeedbackField::ImageChosenLlm,
        FeedbackField::ImageUrl,
        FeedbackField::UploadedImageUrl,
        FeedbackField::LinkedinImageLlm,
        FeedbackField::TwitterImageLlm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackField::N8nExecutionId => "n8n_execution_id",
            FeedbackField::Email => "email",
            FeedbackField::LinkedinGrokContent => "linkedin_grok_content",
            FeedbackField::LinkedinO3Content => "linkedin_o3_content",
            FeedbackField::LinkedinGeminiContent => "linkedin_gemini_content",
            FeedbackField::LinkedinFeedback => "linkedin_feedback",
            FeedbackField::LinkedinChosenLlm => "linkedin_chosen_llm",
            FeedbackField::LinkedinCustomContent => "linkedin_custom_content",
            FeedbackField::XGrokContent => "x_grok_content",
            FeedbackField::XO3Content => "x_o3_content",
            FeedbackField::XGeminiContent => "x_gemini_content",
            FeedbackField::XFeedback => "x_feedback",
            FeedbackField::XChosenLlm => "x_chosen_llm",
            FeedbackField::XCustomContent => "x_custom_content",
            FeedbackField::StableDiffusionImageUrl => "stable_diffusion_image_url",
            FeedbackField::PixabayImageUrl => "pixabay_image_url",
            FeedbackField::Gpt1ImageUrl => "gpt1_image_url",
            FeedbackField::ImageFeedback => "image_feedback",
            FeedbackField::ImageChosenLlm => "image_chosen_llm",
            FeedbackField::ImageUrl => "image_url",
            FeedbackField::UploadedImageUrl => "uploaded_image_url",
            FeedbackField::LinkedinImageLlm => "linkedin_image_llm",
            FeedbackField::TwitterImageLlm => "twitter_image_llm",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    pub fn is_protected(name: &str) -> bool {
        PROTECTED_FIELDS.contains(&name)
    }
}

impl std::fmt::Display for FeedbackField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
