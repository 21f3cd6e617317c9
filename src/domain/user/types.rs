use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authentication::Credentials;
use crate::domain::{NewUser, UserName, UserPassword};

#[derive(Deserialize)]
pub struct LoginData {
    user_name: String,
    password: Secret<String>,
}

impl TryFrom<LoginData> for Credentials {
    type Error = String;

    fn try_from(payload: LoginData) -> Result<Self, Self::Error> {
        let user_name = UserName::parse(payload.user_name)?;
        let password = UserPassword::parse(payload.password.expose_secret().to_string())?;

        Ok(Credentials {
            user_name: user_name.as_ref().to_string(),
            password: password.into_secret(),
        })
    }
}

#[derive(Deserialize)]
pub struct RegisterPayload {
    email: String,
    user_name: String,
    password: Secret<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
}

impl TryFrom<RegisterPayload> for NewUser {
    type Error = String;

    fn try_from(payload: RegisterPayload) -> Result<Self, Self::Error> {
        NewUser::new(
            payload.email,
            payload.user_name,
            payload.password.expose_secret().to_string(),
            payload.display_name,
            payload.avatar,
        )
    }
}

#[derive(sqlx::FromRow)]
pub struct UserProfileRecord {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub role: String,
}

#[derive(Serialize, Debug)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub role: String,
}

impl From<UserProfileRecord> for UserProfile {
    fn from(record: UserProfileRecord) -> Self {
        Self {
            id: record.id,
            // accounts registered without a display name show their handle
            display_name: record
                .display_name
                .unwrap_or_else(|| record.user_name.clone()),
            user_name: record.user_name,
            email: record.email,
            avatar: record.avatar,
            role: record.role,
        }
    }
}
