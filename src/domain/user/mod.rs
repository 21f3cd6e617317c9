mod display_name;
mod role;
mod types;
mod user_email;
mod user_name;
mod user_password;

pub use display_name::DisplayName;
pub use role::Role;
pub use types::*;
pub use user_email::UserEmail;
pub use user_name::UserName;
pub use user_password::UserPassword;

use crate::domain::ImageUrl;

#[derive(Debug)]
pub struct NewUser {
    pub email: UserEmail,
    pub user_name: UserName,
    pub password: UserPassword,
    pub display_name: Option<DisplayName>,
    pub avatar: Option<ImageUrl>,
}

impl NewUser {
    pub fn new(
        email: String,
        user_name: String,
        password: String,
        display_name: Option<String>,
        avatar: Option<String>,
    ) -> Result<Self, String> {
        Ok(Self {
            email: UserEmail::parse(email)?,
            user_name: UserName::parse(user_name)?,
            password: UserPassword::parse(password)?,
            display_name: display_name.map(DisplayName::parse).transpose()?,
            avatar: avatar.map(ImageUrl::parse).transpose()?,
        })
    }
}
