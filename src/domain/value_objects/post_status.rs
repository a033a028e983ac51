use serde::{Deserialize, Serialize};

/// Lifecycle status of a social media post.
///
/// The column is a free string; the four conventional values get their own
/// variants and anything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Custom(String),
}

impl PostStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, PostStatus::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PostStatus::Completed | PostStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Pending => "pending",
            PostStatus::Processing => "processing",
            PostStatus::Completed => "completed",
            PostStatus::Failed => "failed",
            PostStatus::Custom(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" => PostStatus::Pending,
            "processing" => PostStatus::Processing,
            "completed" => PostStatus::Completed,
            "failed" => PostStatus::Failed,
            _ => PostStatus::Custom(s.to_string()),
        }
    }
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Pending
    }
}

impl From<String> for PostStatus {
    fn from(value: String) -> Self {
        PostStatus::parse(&value)
    }
}

impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_values() {
        assert_eq!(PostStatus::parse("pending"), PostStatus::Pending);
        assert_eq!(PostStatus::parse("Processing"), PostStatus::Processing);
        assert_eq!(PostStatus::parse("completed"), PostStatus::Completed);
        assert_eq!(PostStatus::parse("FAILED"), PostStatus::Failed);
        assert!(PostStatus::default().is_pending());
        assert!(PostStatus::Completed.is_terminal());
        assert!(!PostStatus::Processing.is_terminal());
    }

    #[test]
    fn test_free_form_status_is_preserved() {
        let status = PostStatus::parse("awaiting-review");
        assert_eq!(status.as_str(), "awaiting-review");
        assert_eq!(String::from(status), "awaiting-review");
    }
}
