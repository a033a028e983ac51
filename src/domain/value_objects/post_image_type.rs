use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const IMAGE_URL: &str = "Yes, Image URL";
pub const UPLOAD_IMAGE: &str = "Yes, Upload Image";
pub const AI_GENERATED: &str = "Yes, AI Generated";
pub const NO_IMAGE_NEEDED: &str = "No Image Needed";

/// Canonical classification of how a post gets its image.
///
/// Upstream form systems send free-form radio labels such as
/// `"Yes, I have an image URL"`; [`PostImageType::from_label`] folds them onto
/// the four canonical tokens. Labels that match nothing are kept verbatim in
/// [`PostImageType::Other`] so the caller's value is never lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostImageType {
    ImageUrl,
    UploadImage,
    AiGenerated,
    NoImageNeeded,
    Other(String),
}

impl PostImageType {
    /// Substring rules checked in priority order, first match wins.
    const RULES: [(&'static str, PostImageType); 4] = [
        ("image url", PostImageType::ImageUrl),
        ("upload", PostImageType::UploadImage),
        ("ai generated", PostImageType::AiGenerated),
        ("no image", PostImageType::NoImageNeeded),
    ];

    pub fn from_label(label: Option<&str>) -> Self {
        let label = match label {
            Some(l) if !l.trim().is_empty() => l,
            _ => {
                tracing::debug!("Empty post image label, defaulting to '{}'", NO_IMAGE_NEEDED);
                return PostImageType::NoImageNeeded;
            }
        };

        let lowered = label.to_lowercase();
        for (needle, kind) in Self::RULES {
            if lowered.contains(needle) {
                tracing::debug!("Post image label '{}' classified as '{}'", label, kind);
                return kind;
            }
        }

        tracing::debug!("Post image label '{}' not recognised, keeping it as-is", label);
        PostImageType::Other(label.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            PostImageType::ImageUrl => IMAGE_URL,
            PostImageType::UploadImage => UPLOAD_IMAGE,
            PostImageType::AiGenerated => AI_GENERATED,
            PostImageType::NoImageNeeded => NO_IMAGE_NEEDED,
            PostImageType::Other(raw) => raw,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, PostImageType::Other(_))
    }

    pub fn canonical_values() -> [PostImageType; 4] {
        [
            PostImageType::ImageUrl,
            PostImageType::UploadImage,
            PostImageType::AiGenerated,
            PostImageType::NoImageNeeded,
        ]
    }
}

impl Default for PostImageType {
    fn default() -> Self {
        PostImageType::NoImageNeeded
    }
}

impl std::fmt::Display for PostImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PostImageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PostImageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(PostImageType::from_label(raw.as_deref()))
    }
}
