use std::ops::Deref;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::{FromRequest, HttpMessage};
use uuid::Uuid;

use crate::domain::Role;
use crate::session_state::TypedSession;
use crate::utils::{build_error_response, e500};

#[derive(Copy, Clone, Debug)]
pub struct UserId(Uuid);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for UserId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Copy, Clone, Debug)]
pub struct UserRole(Role);

impl Deref for UserRole {
    type Target = Role;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn reject(status_code: StatusCode, msg: &'static str) -> actix_web::Error {
    let response = build_error_response(status_code, msg.to_string());
    InternalError::from_response(anyhow::anyhow!(msg), response).into()
}

async fn session_identity(req: &mut ServiceRequest) -> Result<(Uuid, Role), actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;

    let user_id = session
        .get_user_id()
        .map_err(e500)?
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "User has not logged in"))?;

    // only reachable with a corrupted session, login always stores both keys
    let role = session
        .get_role()
        .map_err(e500)?
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Missing role in session"))?;

    Ok((user_id, role))
}

/// Lets the request through only with a logged-in session and exposes the
/// caller as `web::ReqData<UserId>` / `web::ReqData<UserRole>`.
pub async fn reject_anonymous_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let (user_id, role) = session_identity(&mut req).await?;

    req.extensions_mut().insert(UserId(user_id));
    req.extensions_mut().insert(UserRole(role));
    next.call(req).await
}

/// Same as [`reject_anonymous_users`], restricted to roles allowed to publish posts.
pub async fn reject_non_publishers(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let (user_id, role) = session_identity(&mut req).await?;

    if !role.can_publish() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            "Only doctors and admins can publish posts",
        ));
    }

    req.extensions_mut().insert(UserId(user_id));
    req.extensions_mut().insert(UserRole(role));
    next.call(req).await
}
