use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::Span;
use uuid::Uuid;

use crate::{
    authentication::UserId,
    domain::{Post, PostQuery, PostRecord, PostResponse},
    routes::PostError,
};

// Shared projection of a post row. The root sentinel is not counted as a comment.
const POST_COLUMNS: &str = r#"
    p.id, p.title, p.post_text, p.img, p.version,
    cardinality(p.liked_by)::BIGINT AS like_count,
    GREATEST(
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) - 1,
        0
    )::BIGINT AS comment_count,
    p.created_by,
    COALESCE(u.display_name, u.user_name) AS created_by_name,
    u.avatar AS created_by_avatar,
    p.created_at
"#;

#[tracing::instrument(skip(pool))]
pub async fn get_all_posts(
    query: &PostQuery,
    pool: &PgPool,
) -> Result<(Vec<PostResponse>, i64), anyhow::Error> {
    let keyword = query.keyword.clone().unwrap_or_default();

    let sql = format!(
        r#"
        SELECT COUNT(*) OVER()::BIGINT AS total_count, {POST_COLUMNS}
        FROM posts p
        INNER JOIN users u ON p.created_by = u.id
        WHERE (to_tsvector('english', p.title) @@ plainto_tsquery('english', $1) OR $1 = '')
        AND p.deleted_at IS NULL
        ORDER BY {}, p.id
        LIMIT $2 OFFSET $3
        "#,
        query.order.to_sql(),
    );

    let records = sqlx::query_as::<_, PostRecord>(&sql)
        .bind(&keyword)
        .bind(query.pagination.size())
        .bind(query.pagination.offset())
        .fetch_all(pool)
        .await
        .context("Failed to fetch posts")?;

    let total_count = records.first().map(|r| r.total_count).unwrap_or(0);

    let posts = records.into_iter().map(PostResponse::from).collect();

    Ok((posts, total_count))
}

#[tracing::instrument(skip(pool))]
pub async fn get_post(id: Uuid, pool: &PgPool) -> Result<PostResponse, PostError> {
    let sql = format!(
        r#"
        SELECT 0::BIGINT AS total_count, {POST_COLUMNS}
        FROM posts p
        INNER JOIN users u ON p.created_by = u.id
        WHERE p.id = $1 AND p.deleted_at IS NULL
        "#
    );

    let record = sqlx::query_as::<_, PostRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch post")?;

    match record {
        Some(rec) => Ok(PostResponse::from(rec)),
        None => Err(PostError::NotFound),
    }
}

#[tracing::instrument(skip(pool))]
pub async fn post_exists(id: Uuid, pool: &PgPool) -> Result<bool, anyhow::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1
            FROM posts
            WHERE id = $1 AND deleted_at IS NULL
        )
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .context("Failed to check whether the post exists")
}

#[tracing::instrument(
    skip_all,
    fields(post_id=tracing::field::Empty)
)]
pub async fn insert_post(
    post: &Post,
    created_by: UserId,
    pool: &PgPool,
) -> Result<(Uuid, DateTime<Utc>), anyhow::Error> {
    let (id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
        r#"
        INSERT INTO posts (id, title, post_text, img, created_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post.title.as_ref())
    .bind(post.text.as_ref())
    .bind(post.img.as_ref())
    .bind(*created_by)
    .fetch_one(pool)
    .await
    .context("Failed to insert new post")?;

    Span::current().record("post_id", tracing::field::display(&id));
    Ok((id, created_at))
}

/// Applies the update only if `version` still matches the stored row.
#[tracing::instrument(skip_all, fields(post_id=%id))]
pub async fn update_post(
    id: Uuid,
    post: &Post,
    version: i32,
    pool: &PgPool,
) -> Result<i32, PostError> {
    let new_version = sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE posts
        SET title = $1, post_text = $2, img = $3, version = version + 1
        WHERE id = $4 AND version = $5 AND deleted_at IS NULL
        RETURNING version
        "#,
    )
    .bind(post.title.as_ref())
    .bind(post.text.as_ref())
    .bind(post.img.as_ref())
    .bind(id)
    .bind(version)
    .fetch_optional(pool)
    .await
    .context("Failed to execute update query")?
    .ok_or(PostError::EditConflict)?;

    Ok(new_version)
}

#[tracing::instrument(skip(pool))]
pub async fn soft_delete_post(
    post_id: Uuid,
    deleted_by: Uuid,
    pool: &PgPool,
) -> Result<bool, anyhow::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET deleted_at = $1, deleted_by = $2
        WHERE id = $3 AND deleted_at IS NULL
        "#,
    )
    .bind(Utc::now())
    .bind(deleted_by)
    .bind(post_id)
    .execute(pool)
    .await
    .context("Failed to mark post as deleted")?;

    Ok(result.rows_affected() > 0)
}

/// Author of a live post, or `None` when the post does not exist.
#[tracing::instrument(skip(pool))]
pub async fn get_post_author(post_id: Uuid, pool: &PgPool) -> Result<Option<Uuid>, anyhow::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT created_by
        FROM posts
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
    .context("Failed to look up the post author")
}

/// Adds `user_id` to `liked_by` if absent, removes it otherwise.
/// Returns whether the user likes the post afterwards.
#[tracing::instrument(skip(pool))]
pub async fn toggle_like(post_id: Uuid, user_id: Uuid, pool: &PgPool) -> Result<bool, PostError> {
    let liked = sqlx::query_scalar::<_, bool>(
        r#"
        UPDATE posts
        SET liked_by = CASE
            WHEN $1 = ANY(liked_by) THEN array_remove(liked_by, $1)
            ELSE array_append(liked_by, $1)
        END
        WHERE id = $2 AND deleted_at IS NULL
        RETURNING $1 = ANY(liked_by)
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await
    .context("Failed to toggle like on post")?
    .ok_or(PostError::NotFound)?;

    Ok(liked)
}

#[tracing::instrument(skip(pool))]
pub async fn toggle_bookmark(
    post_id: Uuid,
    user_id: Uuid,
    pool: &PgPool,
) -> Result<bool, PostError> {
    let bookmarked = sqlx::query_scalar::<_, bool>(
        r#"
        UPDATE posts
        SET bookmarked_by = CASE
            WHEN $1 = ANY(bookmarked_by) THEN array_remove(bookmarked_by, $1)
            ELSE array_append(bookmarked_by, $1)
        END
        WHERE id = $2 AND deleted_at IS NULL
        RETURNING $1 = ANY(bookmarked_by)
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await
    .context("Failed to toggle bookmark on post")?
    .ok_or(PostError::NotFound)?;

    Ok(bookmarked)
}
