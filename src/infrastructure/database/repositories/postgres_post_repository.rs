use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::is_integrity_violation;
use crate::domain::entities::SocialMediaPost;
use crate::domain::repositories::{PostRepository, PostRepositoryError};
use crate::infrastructure::database::models::{NewSocialMediaPostModel, SocialMediaPostModel};
use crate::infrastructure::database::schema::social_media_posts;
use crate::infrastructure::database::{Database, DbConnection};

pub struct PostgresPostRepository {
    database: Arc<Database>,
}

impl PostgresPostRepository {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    fn get_connection(&self) -> Result<DbConnection, PostRepositoryError> {
        self.database.connection().map_err(|e| {
            PostRepositoryError::DatabaseError(format!("Failed to get database connection: {}", e))
        })
    }
}

fn write_error(action: &str, e: diesel::result::Error) -> PostRepositoryError {
    if is_integrity_violation(&e) {
        PostRepositoryError::IntegrityError(format!("Failed to {}: {}", action, e))
    } else {
        PostRepositoryError::DatabaseError(format!("Failed to {}: {}", action, e))
    }
}

fn read_error(action: &str, e: diesel::result::Error) -> PostRepositoryError {
    PostRepositoryError::DatabaseError(format!("Failed to {}: {}", action, e))
}

fn join_error(e: tokio::task::JoinError) -> PostRepositoryError {
    PostRepositoryError::DatabaseError(format!("Task join error: {}", e))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn save(&self, post: &SocialMediaPost) -> Result<SocialMediaPost, PostRepositoryError> {
        let new_post = NewSocialMediaPostModel::from(post);
        let mut conn = self.get_connection()?;

        let model = tokio::task::spawn_blocking(move || {
            diesel::insert_into(social_media_posts::table)
                .values(&new_post)
                .returning(SocialMediaPostModel::as_returning())
                .get_result::<SocialMediaPostModel>(&mut conn)
                .map_err(|e| write_error("save social media post", e))
        })
        .await
        .map_err(join_error)??;

        Ok(SocialMediaPost::from(model))
    }

    async fn find_by_post_id(
        &self,
        post_id: &str,
    ) -> Result<Option<SocialMediaPost>, PostRepositoryError> {
        let post_id = post_id.to_string();
        let mut conn = self.get_connection()?;

        let result = tokio::task::spawn_blocking(move || {
            social_media_posts::table
                .filter(social_media_posts::post_id.eq(post_id))
                .select(SocialMediaPostModel::as_select())
                .first::<SocialMediaPostModel>(&mut conn)
                .optional()
                .map_err(|e| read_error("find social media post", e))
        })
        .await
        .map_err(join_error)??;

        Ok(result.map(SocialMediaPost::from))
    }

    async fn find_all(
        &self,
        skip: i64,
        limit: i64,
        status: Option<&str>,
    ) -> Result<Vec<SocialMediaPost>, PostRepositoryError> {
        let status = status.map(str::to_string);
        let mut conn = self.get_connection()?;

        let models = tokio::task::spawn_blocking(move || {
            let mut query = social_media_posts::table
                .select(SocialMediaPostModel::as_select())
                .into_boxed();
            if let Some(status) = status {
                query = query.filter(social_media_posts::status.eq(status));
            }
            query
                .order(social_media_posts::id.asc())
                .offset(skip)
                .limit(limit)
                .load::<SocialMediaPostModel>(&mut conn)
                .map_err(|e| read_error("list social media posts", e))
        })
        .await
        .map_err(join_error)??;

        Ok(models.into_iter().map(SocialMediaPost::from).collect())
    }

    async fn find_by_creator(
        &self,
        content_creator: &str,
    ) -> Result<Vec<SocialMediaPost>, PostRepositoryError> {
        let content_creator = content_creator.to_string();
        let mut conn = self.get_connection()?;

        let models = tokio::task::spawn_blocking(move || {
            social_media_posts::table
                .filter(social_media_posts::content_creator.eq(content_creator))
                .order(social_media_posts::id.asc())
                .select(SocialMediaPostModel::as_select())
                .load::<SocialMediaPostModel>(&mut conn)
                .map_err(|e| read_error("find posts by creator", e))
        })
        .await
        .map_err(join_error)??;

        Ok(models.into_iter().map(SocialMediaPost::from).collect())
    }

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<SocialMediaPost>, PostRepositoryError> {
        let submission_id = submission_id.to_string();
        let mut conn = self.get_connection()?;

        let result = tokio::task::spawn_blocking(move || {
            social_media_posts::table
                .filter(social_media_posts::feedback_submission_id.eq(submission_id))
                .order(social_media_posts::id.desc())
                .select(SocialMediaPostModel::as_select())
                .first::<SocialMediaPostModel>(&mut conn)
                .optional()
                .map_err(|e| read_error("find post by submission id", e))
        })
        .await
        .map_err(join_error)??;

        Ok(result.map(SocialMediaPost::from))
    }

    async fn update(&self, post: &SocialMediaPost) -> Result<SocialMediaPost, PostRepositoryError> {
        let changes = NewSocialMediaPostModel::from(post);
        let post_id = post.post_id().to_string();
        let mut conn = self.get_connection()?;

        let lookup = post_id.clone();
        let model = tokio::task::spawn_blocking(move || {
            diesel::update(social_media_posts::table.filter(social_media_posts::post_id.eq(lookup)))
                .set(&changes)
                .returning(SocialMediaPostModel::as_returning())
                .get_result::<SocialMediaPostModel>(&mut conn)
                .optional()
                .map_err(|e| write_error("update social media post", e))
        })
        .await
        .map_err(join_error)??;

        model
            .map(SocialMediaPost::from)
            .ok_or(PostRepositoryError::NotFound(post_id))
    }

    async fn delete(&self, post_id: &str) -> Result<bool, PostRepositoryError> {
        let post_id = post_id.to_string();
        let mut conn = self.get_connection()?;

        let deleted = tokio::task::spawn_blocking(move || {
            diesel::delete(social_media_posts::table.filter(social_media_posts::post_id.eq(post_id)))
                .execute(&mut conn)
                .map_err(|e| write_error("delete social media post", e))
        })
        .await
        .map_err(join_error)??;

        Ok(deleted > 0)
    }
}
