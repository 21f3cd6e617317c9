use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{DisplayName, ImageUrl, Role, UserEmail, UserName, UserProfileRecord};

#[derive(thiserror::Error, Debug)]
pub enum InsertUserError {
    #[error("A user with this user name or email already exists")]
    AlreadyExists,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[tracing::instrument(skip_all, fields(user_name=%user_name.as_ref()))]
pub async fn insert_user(
    user_name: &UserName,
    email: &UserEmail,
    profile: (Option<&DisplayName>, Option<&ImageUrl>),
    password_hash: Secret<String>,
    pool: &PgPool,
) -> Result<Uuid, InsertUserError> {
    let (display_name, avatar) = profile;
    let user_id = Uuid::new_v4();
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, user_name, email, password_hash, display_name, avatar, role)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(user_id)
    .bind(user_name.as_ref())
    .bind(email.as_ref())
    .bind(password_hash.expose_secret())
    .bind(display_name.map(|d| d.as_ref()))
    .bind(avatar.map(|a| a.as_ref()))
    .bind(Role::User.as_str())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(user_id),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(InsertUserError::AlreadyExists)
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context("Failed to insert new user")
            .into()),
    }
}

pub async fn get_stored_credentials(
    user_name: &str,
    pool: &PgPool,
) -> Result<Option<(Uuid, Secret<String>)>, anyhow::Error> {
    let row = sqlx::query_as::<_, (Uuid, String)>(
        r#"
        SELECT id, password_hash
        FROM users
        WHERE user_name = $1
        "#,
    )
    .bind(user_name)
    .fetch_optional(pool)
    .await
    .context("Failed to perform a query to retrieve stored credentials.")?
    .map(|(id, password_hash)| (id, Secret::new(password_hash)));
    Ok(row)
}

#[tracing::instrument(skip(pool))]
pub async fn get_user_role(user_id: Uuid, pool: &PgPool) -> Result<Role, anyhow::Error> {
    let role = sqlx::query_scalar::<_, String>(
        r#"
        SELECT role
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to fetch the role of a user")?
    .ok_or_else(|| anyhow::anyhow!("No user found"))?;

    Role::parse(&role).map_err(|e| anyhow::anyhow!(e))
}

#[tracing::instrument(skip(pool))]
pub async fn get_profile(
    user_id: Uuid,
    pool: &PgPool,
) -> Result<Option<UserProfileRecord>, anyhow::Error> {
    sqlx::query_as::<_, UserProfileRecord>(
        r#"
        SELECT id, user_name, email, display_name, avatar, role
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to fetch user profile")
}
