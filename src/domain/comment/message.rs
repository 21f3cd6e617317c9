use unicode_segmentation::UnicodeSegmentation;

pub const MAX_MESSAGE_GRAPHEMES: usize = 2000;

#[derive(Debug)]
pub struct CommentMessage(String);

impl CommentMessage {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid comment: message cannot be empty.".to_string());
        }

        if trimmed.graphemes(true).count() > MAX_MESSAGE_GRAPHEMES {
            return Err(format!(
                "Invalid comment: message cannot exceed {MAX_MESSAGE_GRAPHEMES} characters."
            ));
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for CommentMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommentMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
