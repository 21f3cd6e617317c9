use std::ops::DerefMut;

use anyhow::Context;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    domain::{
        CommentNode, CommentRecord, CreatedComment, Interval, NewComment, ROOT_MESSAGE,
        assemble_tree,
    },
    repository::PgTransaction,
    routes::CommentError,
};

#[derive(sqlx::FromRow, Debug)]
struct Bounds {
    id: Uuid,
    lft: i32,
    rgt: i32,
}

impl Bounds {
    fn interval(&self) -> Interval {
        Interval {
            left: self.lft,
            right: self.rgt,
        }
    }
}

/// Creates the post's root sentinel unless it already exists.
///
/// Concurrent first calls race on the `comments_one_root_per_post` index and
/// the loser's insert becomes a no-op.
#[tracing::instrument(skip(executor))]
pub async fn ensure_root<'e, E>(post_id: Uuid, executor: E) -> Result<(), anyhow::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let root = Interval::ROOT;
    let result = sqlx::query(
        r#"
        INSERT INTO comments (id, post_id, lft, rgt, message, created_by)
        VALUES ($1, $2, $3, $4, $5, NULL)
        ON CONFLICT (post_id) WHERE lft = 1 DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(root.left)
    .bind(root.right)
    .bind(ROOT_MESSAGE)
    .execute(executor)
    .await
    .context("Failed to create the root comment")?;

    if result.rows_affected() > 0 {
        tracing::info!("Created root comment");
    }

    Ok(())
}

/// Inserts `comment` as the last child of its parent (the root when no parent
/// is given), opening a slot by moving every bound at or past the parent's
/// right edge.
///
/// Runs in one transaction that first locks the post's root row, so inserts
/// into the same post queue behind each other and always read fresh bounds.
#[tracing::instrument(
    skip(comment, pool),
    fields(post_id=%comment.post_id, parent_id=tracing::field::Empty, comment_id=tracing::field::Empty)
)]
pub async fn insert_comment(
    comment: &NewComment,
    author_id: Uuid,
    pool: &PgPool,
) -> Result<CreatedComment, CommentError> {
    ensure_root(comment.post_id, pool).await?;

    let mut transaction = pool
        .begin()
        .await
        .context("Failed to acquire a Postgres connection from the pool")?;

    let root = lock_root(&mut transaction, comment.post_id).await?;

    let parent = match comment.parent_id {
        None => root,
        Some(parent_id) => find_bounds(&mut transaction, comment.post_id, parent_id)
            .await?
            .ok_or(CommentError::ParentNotFound)?,
    };
    tracing::Span::current().record("parent_id", tracing::field::display(&parent.id));

    let parent_interval = parent.interval();
    open_slot(&mut transaction, comment.post_id, parent_interval.right).await?;

    let slot = parent_interval.next_child_slot();
    let (id, created_at) = sqlx::query_as::<_, (Uuid, chrono::DateTime<chrono::Utc>)>(
        r#"
        INSERT INTO comments (id, post_id, lft, rgt, message, created_by)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(comment.post_id)
    .bind(slot.left)
    .bind(slot.right)
    .bind(comment.message.as_ref())
    .bind(author_id)
    .fetch_one(transaction.deref_mut())
    .await
    .context("Failed to insert comment")?;

    transaction
        .commit()
        .await
        .context("Failed to commit SQL transaction to insert a comment")?;

    tracing::Span::current().record("comment_id", tracing::field::display(&id));

    Ok(CreatedComment {
        id,
        post_id: comment.post_id,
        parent_id: parent.id,
        left: slot.left,
        right: slot.right,
        message: comment.message.as_ref().to_string(),
        created_by: author_id,
        created_at,
    })
}

async fn lock_root(transaction: &mut PgTransaction, post_id: Uuid) -> Result<Bounds, anyhow::Error> {
    sqlx::query_as::<_, Bounds>(
        r#"
        SELECT id, lft, rgt
        FROM comments
        WHERE post_id = $1 AND lft = 1
        FOR UPDATE
        "#,
    )
    .bind(post_id)
    .fetch_one(transaction.deref_mut())
    .await
    .context("Failed to lock the root comment")
}

async fn find_bounds(
    transaction: &mut PgTransaction,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Bounds>, anyhow::Error> {
    sqlx::query_as::<_, Bounds>(
        r#"
        SELECT id, lft, rgt
        FROM comments
        WHERE post_id = $1 AND id = $2
        "#,
    )
    .bind(post_id)
    .bind(comment_id)
    .fetch_optional(transaction.deref_mut())
    .await
    .context("Failed to look up the parent comment")
}

// Both bounds move in one statement so the CHECK (lft < rgt) holds row by row.
async fn open_slot(
    transaction: &mut PgTransaction,
    post_id: Uuid,
    edge: i32,
) -> Result<(), anyhow::Error> {
    sqlx::query(
        r#"
        UPDATE comments
        SET lft = CASE WHEN lft >= $2 THEN lft + $3 ELSE lft END,
            rgt = rgt + $3
        WHERE post_id = $1 AND rgt >= $2
        "#,
    )
    .bind(post_id)
    .bind(edge)
    .bind(Interval::GAP)
    .execute(transaction.deref_mut())
    .await
    .context("Failed to shift comment bounds")?;

    Ok(())
}

#[tracing::instrument(skip(pool))]
pub async fn get_comment_records(
    post_id: Uuid,
    pool: &PgPool,
) -> Result<Vec<CommentRecord>, anyhow::Error> {
    sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT c.id, c.post_id, c.lft, c.rgt, c.message, c.created_by, c.created_at,
               COALESCE(u.display_name, u.user_name) AS author_name,
               u.avatar AS author_avatar
        FROM comments c
        LEFT JOIN users u ON c.created_by = u.id
        WHERE c.post_id = $1
        ORDER BY c.lft
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
    .context("Failed to load comments for post")
}

/// Loads the whole discussion of a post, creating its root on first access.
#[tracing::instrument(skip(pool))]
pub async fn get_comment_tree(
    post_id: Uuid,
    pool: &PgPool,
) -> Result<Option<CommentNode>, CommentError> {
    ensure_root(post_id, pool).await?;

    let records = get_comment_records(post_id, pool).await?;
    let tree = assemble_tree(records).map_err(|source| {
        let e = CommentError::Inconsistency { post_id, source };
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Stored comment intervals do not form a tree"
        );
        e
    })?;

    Ok(tree)
}

/// Replaces the message of a comment written by `author_id`. Bounds are untouched.
#[tracing::instrument(skip(message, pool))]
pub async fn update_comment_message(
    comment_id: Uuid,
    author_id: Uuid,
    message: &str,
    pool: &PgPool,
) -> Result<(), CommentError> {
    // the root sentinel has no author and is therefore never found here
    let owner = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT created_by
        FROM comments
        WHERE id = $1 AND created_by IS NOT NULL
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await
    .context("Failed to look up the comment author")?
    .ok_or(CommentError::NotFound)?;

    if owner != author_id {
        return Err(CommentError::Forbidden);
    }

    let result = sqlx::query(
        r#"
        UPDATE comments
        SET message = $1
        WHERE id = $2 AND created_by = $3
        "#,
    )
    .bind(message)
    .bind(comment_id)
    .bind(author_id)
    .execute(pool)
    .await
    .context("Failed to update comment message")?;

    if result.rows_affected() == 0 {
        return Err(CommentError::NotFound);
    }

    Ok(())
}
