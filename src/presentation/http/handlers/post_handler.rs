use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::application::use_cases::{
    CreatePostUseCase, DeletePostUseCase, GetPostUseCase, ListPostsUseCase, UpdatePostUseCase,
    create_post::CreatePostRequest,
    delete_post::DeletePostRequest,
    get_post::GetPostRequest,
    list_posts::{ListPostsRequest, PostFilter},
    update_post::UpdatePostRequest,
};
use crate::domain::entities::SocialMediaPost;
use crate::presentation::http::dto::{
    CreatePostDto, MessageResponseDto, PostDto, PostListQuery, UpdatePostDto,
};
use crate::presentation::http::error::AppError;
use crate::presentation::http::extract::ApiJson;

pub struct PostHandler {
    create_use_case: Arc<CreatePostUseCase>,
    get_use_case: Arc<GetPostUseCase>,
    list_use_case: Arc<ListPostsUseCase>,
    update_use_case: Arc<UpdatePostUseCase>,
    delete_use_case: Arc<DeletePostUseCase>,
}

impl PostHandler {
    pub fn new(
        create_use_case: Arc<CreatePostUseCase>,
        get_use_case: Arc<GetPostUseCase>,
        list_use_case: Arc<ListPostsUseCase>,
        update_use_case: Arc<UpdatePostUseCase>,
        delete_use_case: Arc<DeletePostUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_use_case,
            list_use_case,
            update_use_case,
            delete_use_case,
        }
    }

    pub async fn create_post(
        State(handler): State<Arc<PostHandler>>,
        ApiJson(body): ApiJson<CreatePostDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let response = handler
            .create_use_case
            .execute(CreatePostRequest::from(body))
            .await?;

        Ok(Json(PostDto::from(response.post)))
    }

    pub async fn list_posts(
        State(handler): State<Arc<PostHandler>>,
        Query(query): Query<PostListQuery>,
    ) -> Result<impl IntoResponse, AppError> {
        let request = ListPostsRequest {
            filter: PostFilter::All {
                skip: query.skip,
                limit: query.limit,
                status: query.status,
            },
        };
        let response = handler.list_use_case.execute(request).await?;

        Ok(Json(to_dtos(response.posts)))
    }

    pub async fn list_by_creator(
        State(handler): State<Arc<PostHandler>>,
        Path(content_creator): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let request = ListPostsRequest {
            filter: PostFilter::ByCreator(content_creator),
        };
        let response = handler.list_use_case.execute(request).await?;

        Ok(Json(to_dtos(response.posts)))
    }

    pub async fn get_post(
        State(handler): State<Arc<PostHandler>>,
        Path(post_id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let response = handler.get_use_case.execute(GetPostRequest { post_id }).await?;
        Ok(Json(PostDto::from(response.post)))
    }

    pub async fn update_post(
        State(handler): State<Arc<PostHandler>>,
        Path(post_id): Path<String>,
        ApiJson(body): ApiJson<UpdatePostDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let request = UpdatePostRequest {
            post_id,
            patch: body.into(),
        };
        let response = handler.update_use_case.execute(request).await?;

        Ok(Json(PostDto::from(response.post)))
    }

    pub async fn delete_post(
        State(handler): State<Arc<PostHandler>>,
        Path(post_id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        handler
            .delete_use_case
            .execute(DeletePostRequest { post_id })
            .await?;

        Ok(Json(MessageResponseDto::new(
            "Social media post deleted successfully",
        )))
    }
}

fn to_dtos(posts: Vec<SocialMediaPost>) -> Vec<PostDto> {
    posts.into_iter().map(PostDto::from).collect()
}
