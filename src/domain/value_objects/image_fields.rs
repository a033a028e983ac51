use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PostImageType;

/// The pair of delivery image fields shared by posts and submissions.
///
/// A field counts as present when it holds a value; `None` is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFields {
    pub image_url: Option<String>,
    pub uploaded_image_url: Option<String>,
}

impl ImageFields {
    pub fn new(image_url: Option<String>, uploaded_image_url: Option<String>) -> Self {
        Self {
            image_url,
            uploaded_image_url,
        }
    }

    /// Enforces the one-field-populated invariant for `image_type`.
    ///
    /// For URL and Upload types the field named by the type survives; if only
    /// the other field is set its value is moved across. Every other type
    /// clears both fields.
    pub fn reconcile(self, image_type: &PostImageType) -> Self {
        let ImageFields {
            image_url,
            uploaded_image_url,
        } = self;

        let reconciled = match image_type {
            PostImageType::ImageUrl => Self {
                image_url: image_url.or(uploaded_image_url),
                uploaded_image_url: None,
            },
            PostImageType::UploadImage => Self {
                image_url: None,
                uploaded_image_url: uploaded_image_url.or(image_url),
            },
            _ => Self::default(),
        };

        tracing::debug!(
            "Image fields reconciled for '{}': image_url={:?}, uploaded_image_url={:?}",
            image_type,
            reconciled.image_url,
            reconciled.uploaded_image_url
        );

        reconciled
    }

    pub fn populated_count(&self) -> usize {
        usize::from(self.image_url.is_some()) + usize::from(self.uploaded_image_url.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.populated_count() == 0
    }
}
