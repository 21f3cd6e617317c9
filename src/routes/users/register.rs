use crate::authentication;
use crate::domain::{NewUser, RegisterPayload};
use crate::repository::{self, InsertUserError};
use crate::telemetry;
use crate::utils;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use anyhow::Context;
use sqlx::PgPool;
use std::fmt;
use std::fmt::{Debug, Formatter};
use tracing::{Span, field};

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    ValidationError(String),

    #[error("user name or email is already taken")]
    Conflict,

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for RegisterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for RegisterError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            RegisterError::ValidationError(_) => StatusCode::BAD_REQUEST,
            RegisterError::Conflict => StatusCode::CONFLICT,
            RegisterError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        utils::build_error_response(status_code, self.to_string())
    }
}

impl From<InsertUserError> for RegisterError {
    fn from(e: InsertUserError) -> Self {
        match e {
            InsertUserError::AlreadyExists => RegisterError::Conflict,
            InsertUserError::Unexpected(e) => RegisterError::UnexpectedError(e),
        }
    }
}

#[tracing::instrument(
    skip_all,
    fields(
        user_name = tracing::field::Empty,
        user_email = tracing::field::Empty,
        user_id = tracing::field::Empty
    )
)]
pub async fn register_user(
    payload: web::Json<RegisterPayload>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, RegisterError> {
    let NewUser {
        email,
        user_name,
        password,
        display_name,
        avatar,
    } = payload
        .into_inner()
        .try_into()
        .map_err(RegisterError::ValidationError)?;

    Span::current().record("user_name", field::display(user_name.as_ref()));
    Span::current().record("user_email", field::display(email.as_ref()));

    let password = password.into_secret();
    let password_hash = telemetry::spawn_blocking_with_tracing(move || {
        authentication::compute_password_hash(password)
    })
    .await
    .context("Failed to spawn the password hashing task")?
    .context("Failed to hash password")?;

    let user_id = repository::insert_user(
        &user_name,
        &email,
        (display_name.as_ref(), avatar.as_ref()),
        password_hash,
        &pool,
    )
    .await?;
    Span::current().record("user_id", field::display(&user_id));

    Ok(HttpResponse::Created().json(serde_json::json!({ "id": user_id })))
}
