/// HTTPS link to an externally hosted image (post covers, avatars).
#[derive(Debug)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid image URL: cannot be empty.".to_string());
        }

        let Some(rest) = trimmed.strip_prefix("https://") else {
            return Err("Invalid image URL: must start with https://".to_string());
        };

        if rest.is_empty() || rest.starts_with('/') {
            return Err("Invalid image URL: missing host.".to_string());
        }

        if trimmed.len() > 2048 {
            return Err("Invalid image URL: cannot be longer than 2048 characters.".to_string());
        }

        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err("Invalid image URL: contains forbidden characters.".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
