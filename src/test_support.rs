//! In-memory fakes for the repository and outbound ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{
    DatabaseAdmin, ImageUpload, ImageUploader, MigrationStatus, UpstreamError, WebhookClient,
    WebhookReply, WebhookTarget,
};
use crate::domain::entities::{
    ExecutionIdPolicy, FeedbackPatch, FeedbackSubmission, SocialMediaPost, User,
};
use crate::domain::repositories::{
    FeedbackRepository, FeedbackRepositoryError, PostRepository, PostRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::value_objects::{FeedbackField, PasswordHash};

/// Rows shared by the feedback and post fakes, like the two real tables.
#[derive(Default)]
pub struct InMemoryStore {
    submissions: Mutex<Vec<FeedbackSubmission>>,
    posts: Mutex<Vec<SocialMediaPost>>,
}

impl InMemoryStore {
    fn next_id<T>(rows: &[T]) -> i32 {
        rows.len() as i32 + 1
    }

    fn stored_submission(rows: &[FeedbackSubmission], submission: &FeedbackSubmission) -> FeedbackSubmission {
        FeedbackSubmission::restore(
            Self::next_id(rows),
            submission.submission_id().to_string(),
            submission.content().clone(),
            submission.created_at(),
            submission.updated_at(),
        )
    }

    fn stored_post(rows: &[SocialMediaPost], post: &SocialMediaPost) -> SocialMediaPost {
        SocialMediaPost::restore(
            Self::next_id(rows),
            post.post_id().to_string(),
            post.details().clone(),
            post.post_image_type().clone(),
            post.images().clone(),
            post.status().clone(),
            post.created_at(),
            post.updated_at(),
        )
    }
}

#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    store: Arc<InMemoryStore>,
    fail_writes: bool,
}

impl InMemoryFeedbackRepository {
    pub fn with_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            fail_writes: false,
        }
    }

    /// Every write fails as if the database were down.
    pub fn failing() -> Self {
        Self {
            store: Arc::default(),
            fail_writes: true,
        }
    }

    pub fn len(&self) -> usize {
        self.store.submissions.lock().unwrap().len()
    }

    pub fn get(&self, submission_id: &str) -> Option<FeedbackSubmission> {
        self.store
            .submissions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.submission_id() == submission_id)
            .cloned()
    }

    pub fn linked_post(&self, submission_id: &str) -> Option<SocialMediaPost> {
        self.store
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.feedback_submission_id() == Some(submission_id))
            .cloned()
    }

    fn check_writable(&self) -> Result<(), FeedbackRepositoryError> {
        if self.fail_writes {
            return Err(FeedbackRepositoryError::DatabaseError(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn save(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<FeedbackSubmission, FeedbackRepositoryError> {
        self.check_writable()?;
        let mut rows = self.store.submissions.lock().unwrap();
        if rows.iter().any(|s| s.submission_id() == submission.submission_id()) {
            return Err(FeedbackRepositoryError::IntegrityError(
                "duplicate submission_id".to_string(),
            ));
        }
        let stored = InMemoryStore::stored_submission(&rows, submission);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn save_with_post(
        &self,
        submission: &FeedbackSubmission,
        post: &SocialMediaPost,
    ) -> Result<(FeedbackSubmission, SocialMediaPost), FeedbackRepositoryError> {
        let stored = self.save(submission).await?;
        let mut posts = self.store.posts.lock().unwrap();
        let stored_post = InMemoryStore::stored_post(&posts, post);
        posts.push(stored_post.clone());
        Ok((stored, stored_post))
    }

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<FeedbackSubmission>, FeedbackRepositoryError> {
        Ok(self.get(submission_id))
    }

    async fn find_all(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FeedbackSubmission>, FeedbackRepositoryError> {
        let rows = self.store.submissions.lock().unwrap();
        Ok(rows
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_execution_id(
        &self,
        execution_id: &str,
    ) -> Result<Vec<FeedbackSubmission>, FeedbackRepositoryError> {
        let rows = self.store.submissions.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|s| s.n8n_execution_id() == Some(execution_id))
            .cloned()
            .collect())
    }

    async fn apply_patch(
        &self,
        submission_id: &str,
        patch: &FeedbackPatch,
        policy: ExecutionIdPolicy,
    ) -> Result<(FeedbackSubmission, Vec<FeedbackField>), FeedbackRepositoryError> {
        self.check_writable()?;
        let mut rows = self.store.submissions.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.submission_id() == submission_id)
            .ok_or_else(|| FeedbackRepositoryError::NotFound(submission_id.to_string()))?;
        let written = row.apply_patch(patch, policy);
        Ok((row.clone(), written))
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn with_store(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save(&self, post: &SocialMediaPost) -> Result<SocialMediaPost, PostRepositoryError> {
        let mut rows = self.store.posts.lock().unwrap();
        let stored = InMemoryStore::stored_post(&rows, post);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_post_id(
        &self,
        post_id: &str,
    ) -> Result<Option<SocialMediaPost>, PostRepositoryError> {
        let rows = self.store.posts.lock().unwrap();
        Ok(rows.iter().find(|p| p.post_id() == post_id).cloned())
    }

    async fn find_all(
        &self,
        skip: i64,
        limit: i64,
        status: Option<&str>,
    ) -> Result<Vec<SocialMediaPost>, PostRepositoryError> {
        let rows = self.store.posts.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|p| status.is_none_or(|s| p.status().as_str() == s))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_creator(
        &self,
        content_creator: &str,
    ) -> Result<Vec<SocialMediaPost>, PostRepositoryError> {
        let rows = self.store.posts.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|p| p.details().content_creator.as_deref() == Some(content_creator))
            .cloned()
            .collect())
    }

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<SocialMediaPost>, PostRepositoryError> {
        let rows = self.store.posts.lock().unwrap();
        Ok(rows
            .iter()
            .find(|p| p.feedback_submission_id() == Some(submission_id))
            .cloned())
    }

    async fn update(&self, post: &SocialMediaPost) -> Result<SocialMediaPost, PostRepositoryError> {
        let mut rows = self.store.posts.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.post_id() == post.post_id())
            .ok_or_else(|| PostRepositoryError::NotFound(post.post_id().to_string()))?;
        *row = post.clone();
        Ok(post.clone())
    }

    async fn delete(&self, post_id: &str) -> Result<bool, PostRepositoryError> {
        let mut rows = self.store.posts.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.post_id() != post_id);
        Ok(rows.len() != before)
    }
}

pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// The three seeded accounts plus one deactivated account, `retired`.
    pub fn seeded() -> Self {
        let user = |id: i32, username: &str, active: bool| {
            User::restore(
                id,
                username.to_string(),
                username.to_uppercase(),
                format!("{username}@example.com"),
                PasswordHash::from_plain("Pass@1234"),
                Some(active),
                None,
                None,
            )
        };
        Self {
            users: Mutex::new(vec![
                user(1, "bob", true),
                user(2, "leah", true),
                user(3, "matthew", true),
                user(4, "retired", false),
            ]),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_active(&self) -> Result<Vec<User>, UserRepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|u| u.is_active()).cloned().collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username() == username).cloned())
    }

    async fn update_password(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        let row = users
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_else(|| UserRepositoryError::NotFound(user.username().to_string()))?;
        *row = user.clone();
        Ok(())
    }
}

/// Records every payload and answers with a fixed reply or error.
pub struct RecordingWebhookClient {
    answer: Result<WebhookReply, UpstreamError>,
    sent: Mutex<Vec<(WebhookTarget, Value)>>,
}

impl RecordingWebhookClient {
    pub fn ok() -> Self {
        Self::replying(WebhookReply {
            status: 200,
            body: json!({"ok": true}).to_string(),
        })
    }

    pub fn replying(reply: WebhookReply) -> Self {
        Self {
            answer: Ok(reply),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: UpstreamError) -> Self {
        Self {
            answer: Err(error),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn last(&self) -> Option<(WebhookTarget, Value)> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl WebhookClient for RecordingWebhookClient {
    async fn send(
        &self,
        target: WebhookTarget,
        payload: &Value,
    ) -> Result<WebhookReply, UpstreamError> {
        self.sent.lock().unwrap().push((target, payload.clone()));
        self.answer.clone()
    }
}

pub struct RecordingUploader {
    answer: Result<Value, UpstreamError>,
    uploads: Mutex<Vec<ImageUpload>>,
}

impl RecordingUploader {
    pub fn answering(answer: Value) -> Self {
        Self {
            answer: Ok(answer),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: UpstreamError) -> Self {
        Self {
            answer: Err(error),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.file_name.clone())
            .collect()
    }
}

#[async_trait]
impl ImageUploader for RecordingUploader {
    async fn upload(&self, upload: ImageUpload) -> Result<Value, UpstreamError> {
        self.uploads.lock().unwrap().push(upload);
        self.answer.clone()
    }
}

/// Database admin stand-in; `down` makes every call fail.
#[derive(Default)]
pub struct FakeDatabaseAdmin {
    pub down: bool,
}

#[async_trait]
impl DatabaseAdmin for FakeDatabaseAdmin {
    async fn ping(&self) -> Result<(), String> {
        if self.down {
            return Err("connection refused".to_string());
        }
        Ok(())
    }

    async fn migration_status(&self) -> Result<MigrationStatus, String> {
        self.ping().await?;
        Ok(MigrationStatus {
            applied: vec!["00000000000001".to_string()],
            pending: Vec::new(),
        })
    }

    async fn run_migrations(&self) -> Result<Vec<String>, String> {
        self.ping().await?;
        Ok(Vec::new())
    }
}
