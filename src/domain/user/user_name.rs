use std::fmt::{self, Display, Formatter};

/// Login handle. Display data lives in [`crate::domain::DisplayName`].
#[derive(Debug)]
pub struct UserName(String);

impl UserName {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid user name: cannot be empty or whitespace.".to_string());
        }

        let length = trimmed.chars().count();
        if length < 3 {
            return Err("Invalid user name: must be at least 3 characters long.".to_string());
        }

        if length > 64 {
            return Err("Invalid user name: cannot be longer than 64 characters.".to_string());
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(
                "Invalid user name: only letters, digits, '_', '.' and '-' are allowed."
                    .to_string(),
            );
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
