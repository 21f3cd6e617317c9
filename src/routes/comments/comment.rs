use std::fmt::{self, Debug, Formatter};

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    authentication::UserId,
    domain::{CommentMessage, CreateCommentPayload, EditCommentPayload, NewComment, TreeError},
    repository, utils,
};

#[derive(thiserror::Error)]
pub enum CommentError {
    #[error("{0}")]
    ValidationError(String),

    #[error("post not found")]
    PostNotFound,

    #[error("parent comment not found")]
    ParentNotFound,

    #[error("comment not found")]
    NotFound,

    #[error("not authorized to perform this action")]
    Forbidden,

    #[error("comment tree of post {post_id} is inconsistent")]
    Inconsistency {
        post_id: Uuid,
        #[source]
        source: TreeError,
    },

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for CommentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for CommentError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            CommentError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CommentError::PostNotFound
            | CommentError::ParentNotFound
            | CommentError::NotFound => StatusCode::NOT_FOUND,
            CommentError::Forbidden => StatusCode::FORBIDDEN,
            CommentError::Inconsistency { .. } | CommentError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match self {
            // interval details stay in the logs
            CommentError::Inconsistency { .. } => "comments are temporarily unavailable".to_string(),
            other => other.to_string(),
        };

        utils::build_error_response(status_code, message)
    }
}

#[derive(Deserialize, Debug)]
pub struct PostIdPath {
    pub post_id: String,
}

#[derive(Deserialize, Debug)]
pub struct CommentIdPath {
    pub comment_id: String,
}

fn parse_id(raw: &str, what: &str) -> Result<Uuid, CommentError> {
    Uuid::parse_str(raw)
        .map_err(|_| CommentError::ValidationError(format!("Invalid {what}: must be a valid UUID")))
}

async fn ensure_post_exists(post_id: Uuid, pool: &PgPool) -> Result<(), CommentError> {
    if !repository::post_exists(post_id, pool).await? {
        return Err(CommentError::PostNotFound);
    }
    Ok(())
}

#[tracing::instrument(skip(pool), fields(post_id=%path.post_id))]
pub async fn show_comment_tree(
    path: web::Path<PostIdPath>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, CommentError> {
    let post_id = parse_id(&path.post_id, "post id")?;
    ensure_post_exists(post_id, &pool).await?;

    let comments = repository::get_comment_tree(post_id, &pool).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "comments": comments })))
}

#[tracing::instrument(
    skip(payload, pool),
    fields(post_id=%path.post_id, user_id=%&*user_id)
)]
pub async fn create_comment(
    path: web::Path<PostIdPath>,
    payload: web::Json<CreateCommentPayload>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let user_id = user_id.into_inner();
    let post_id = parse_id(&path.post_id, "post id")?;

    let CreateCommentPayload { parent_id, message } = payload.into_inner();
    let comment =
        NewComment::new(post_id, parent_id, message).map_err(CommentError::ValidationError)?;

    ensure_post_exists(post_id, &pool).await?;

    let created = repository::insert_comment(&comment, *user_id, &pool).await?;

    Ok(HttpResponse::Created().json(created))
}

#[tracing::instrument(
    skip(payload, pool),
    fields(comment_id=%path.comment_id, user_id=%&*user_id)
)]
pub async fn edit_comment(
    path: web::Path<CommentIdPath>,
    payload: web::Json<EditCommentPayload>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let user_id = user_id.into_inner();
    let comment_id = parse_id(&path.comment_id, "comment id")?;

    let message =
        CommentMessage::parse(payload.into_inner().message).map_err(CommentError::ValidationError)?;

    repository::update_comment_message(comment_id, *user_id, message.as_ref(), &pool).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": comment_id,
        "message": message.as_ref(),
    })))
}
