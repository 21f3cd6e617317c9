use actix_web::{HttpResponse, web};
use anyhow::Context;
use sqlx::PgPool;

use crate::{
    authentication::UserId,
    domain::UserProfile,
    repository,
    utils::e500,
};

#[tracing::instrument(skip(pool), fields(user_id=%&*user_id))]
pub async fn get_profile(
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, actix_web::Error> {
    // a session can outlive its account only through manual database edits
    let record = repository::get_profile(**user_id, &pool)
        .await
        .map_err(e500)?
        .context("Logged-in user has no account")
        .map_err(e500)?;

    Ok(HttpResponse::Ok().json(UserProfile::from(record)))
}
