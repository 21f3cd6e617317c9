use unicode_segmentation::UnicodeSegmentation;

/// Name shown next to a user's posts and comments.
#[derive(Debug)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid display name: cannot be empty.".to_string());
        }

        if trimmed.graphemes(true).count() > 100 {
            return Err("Invalid display name: cannot exceed 100 characters.".to_string());
        }

        if trimmed.chars().any(|c| c.is_control() || matches!(c, '<' | '>')) {
            return Err("Invalid display name: contains forbidden characters.".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
