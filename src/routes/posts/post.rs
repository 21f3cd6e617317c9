use actix_web::ResponseError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::authentication::{UserId, UserRole};
use crate::domain::{
    CreatePostPayload, CreatePostResponse, ListPostsQuery, Metadata, Post, PostQuery,
    UpdatePostPayload,
};
use crate::repository;
use crate::utils::{build_error_response, error_chain_fmt};

#[derive(thiserror::Error)]
pub enum PostError {
    #[error("{0}")]
    ValidationError(String),

    #[error("post not found")]
    NotFound,

    #[error("not authorized to perform this action")]
    Forbidden,

    #[error("edit conflict: post was modified by another request")]
    EditConflict,

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for PostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for PostError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            PostError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PostError::NotFound => StatusCode::NOT_FOUND,
            PostError::Forbidden => StatusCode::FORBIDDEN,
            PostError::EditConflict => StatusCode::CONFLICT,
            PostError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        build_error_response(status_code, self.to_string())
    }
}

#[derive(Deserialize, Debug)]
pub struct PostPathParams {
    pub id: String,
}

impl PostPathParams {
    fn parse(&self) -> Result<Uuid, PostError> {
        Uuid::parse_str(&self.id)
            .map_err(|_| PostError::ValidationError("Invalid post id: must be a valid UUID".into()))
    }
}

#[tracing::instrument(
    skip(pool, query),
    fields(
        keyword = %query.keyword,
        option = %query.option,
        page = %query.page,
        size = %query.size
    )
)]
pub async fn get_all_posts(
    query: web::Query<ListPostsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, PostError> {
    let query: PostQuery = query
        .into_inner()
        .try_into()
        .map_err(PostError::ValidationError)?;

    let (posts, total_records) = repository::get_all_posts(&query, &pool).await?;

    let metadata = Metadata::calculate(total_records, &query.pagination);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "posts": posts,
        "metadata": metadata
    })))
}

#[tracing::instrument(skip(pool), fields(post_id=%path.id))]
pub async fn get_post(
    path: web::Path<PostPathParams>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, PostError> {
    let post_id = path.parse()?;
    let post = repository::get_post(post_id, &pool).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "post": post })))
}

#[tracing::instrument(skip(payload, pool), fields(user_id=%&*user_id))]
pub async fn create_post(
    payload: web::Json<CreatePostPayload>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, PostError> {
    let user_id = user_id.into_inner();

    let post: Post = payload
        .into_inner()
        .try_into()
        .map_err(PostError::ValidationError)?;

    let (id, created_at) = repository::insert_post(&post, user_id, &pool).await?;

    let resp = CreatePostResponse {
        id,
        title: post.title.as_ref(),
        text: post.text.as_ref(),
        img: post.img.as_ref(),
        created_at,
        created_by: *user_id,
    };

    Ok(HttpResponse::Created().json(resp))
}

#[tracing::instrument(skip(payload, pool), fields(post_id=%path.id, user_id=%&*user_id))]
pub async fn update_post(
    path: web::Path<PostPathParams>,
    payload: web::Json<UpdatePostPayload>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, PostError> {
    let post_id = path.parse()?;
    let user_id = user_id.into_inner();

    let UpdatePostPayload {
        title,
        text,
        img,
        version,
    } = payload.into_inner();
    let post = Post::new(title, text, img).map_err(PostError::ValidationError)?;

    let author = repository::get_post_author(post_id, &pool)
        .await?
        .ok_or(PostError::NotFound)?;
    if author != *user_id {
        return Err(PostError::Forbidden);
    }

    let version = repository::update_post(post_id, &post, version, &pool).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": post_id,
        "version": version,
    })))
}

#[tracing::instrument(skip(pool), fields(post_id=%path.id, user_id=%&*user_id))]
pub async fn delete_post(
    path: web::Path<PostPathParams>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
    role: web::ReqData<UserRole>,
) -> Result<HttpResponse, PostError> {
    let post_id = path.parse()?;
    let user_id = user_id.into_inner();

    let author = repository::get_post_author(post_id, &pool)
        .await?
        .ok_or(PostError::NotFound)?;
    if author != *user_id && !role.is_admin() {
        return Err(PostError::Forbidden);
    }

    if !repository::soft_delete_post(post_id, *user_id, &pool).await? {
        return Err(PostError::NotFound);
    }

    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(pool), fields(post_id=%path.id, user_id=%&*user_id))]
pub async fn toggle_like(
    path: web::Path<PostPathParams>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, PostError> {
    let post_id = path.parse()?;
    let liked = repository::toggle_like(post_id, **user_id, &pool).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "liked": liked })))
}

#[tracing::instrument(skip(pool), fields(post_id=%path.id, user_id=%&*user_id))]
pub async fn toggle_bookmark(
    path: web::Path<PostPathParams>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, PostError> {
    let post_id = path.parse()?;
    let bookmarked = repository::toggle_bookmark(post_id, **user_id, &pool).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "bookmarked": bookmarked })))
}
