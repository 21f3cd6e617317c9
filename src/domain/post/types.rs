use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Post;

#[derive(sqlx::FromRow)]
pub struct PostRecord {
    pub total_count: i64,
    pub id: Uuid,
    pub title: String,
    pub post_text: String,
    pub img: String,
    pub version: i32,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_by: Uuid,
    pub created_by_name: String,
    pub created_by_avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct PostAuthor {
    pub id: Uuid,
    pub display_name: String,
    pub avatar: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub img: String,
    pub version: i32,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_by: PostAuthor,
    pub created_at: DateTime<Utc>,
}

impl From<PostRecord> for PostResponse {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            text: record.post_text,
            img: record.img,
            version: record.version,
            like_count: record.like_count,
            comment_count: record.comment_count,
            created_by: PostAuthor {
                id: record.created_by,
                display_name: record.created_by_name,
                avatar: record.created_by_avatar,
            },
            created_at: record.created_at,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CreatePostPayload {
    title: String,
    text: String,
    img: String,
}

impl TryFrom<CreatePostPayload> for Post {
    type Error = String;

    fn try_from(payload: CreatePostPayload) -> Result<Self, Self::Error> {
        Post::new(payload.title, payload.text, payload.img)
    }
}

#[derive(Deserialize, Debug)]
pub struct UpdatePostPayload {
    pub title: String,
    pub text: String,
    pub img: String,
    pub version: i32,
}

#[derive(Serialize)]
pub struct CreatePostResponse<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub text: &'a str,
    pub img: &'a str,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
}
