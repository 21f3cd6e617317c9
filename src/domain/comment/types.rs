use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CommentMessage, Interval};

/// Message stored on every post's root sentinel; never shown to readers.
pub const ROOT_MESSAGE: &str = "root";

/// One flat `comments` row joined with its author's display data.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct CommentRecord {
    pub id: Uuid,
    pub post_id: Uuid,
    pub lft: i32,
    pub rgt: i32,
    pub message: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
}

impl CommentRecord {
    pub fn interval(&self) -> Interval {
        Interval {
            left: self.lft,
            right: self.rgt,
        }
    }
}

#[derive(Debug)]
pub struct NewComment {
    pub post_id: Uuid,
    /// `None` attaches the comment directly under the post's root.
    pub parent_id: Option<Uuid>,
    pub message: CommentMessage,
}

impl NewComment {
    pub fn new(post_id: Uuid, parent_id: Option<String>, message: String) -> Result<Self, String> {
        let parent_id = parent_id
            .map(|id| {
                Uuid::parse_str(id.trim())
                    .map_err(|_| "Invalid parent_id: must be a valid UUID".to_string())
            })
            .transpose()?;

        Ok(Self {
            post_id,
            parent_id,
            message: CommentMessage::parse(message)?,
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct CreateCommentPayload {
    #[serde(default)]
    pub parent_id: Option<String>,
    pub message: String,
}

#[derive(Deserialize, Debug)]
pub struct EditCommentPayload {
    pub message: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatedComment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Uuid,
    pub left: i32,
    pub right: i32,
    pub message: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}
