mod middleware;
mod password;

pub use middleware::{UserId, UserRole, reject_anonymous_users, reject_non_publishers};
pub use password::{AuthError, Credentials, compute_password_hash, validate_credentials};
