mod query;
mod text;
mod title;
mod types;

pub use query::*;
pub use text::PostText;
pub use title::PostTitle;
pub use types::*;

use crate::domain::ImageUrl;

#[derive(Debug)]
pub struct Post {
    pub title: PostTitle,
    pub text: PostText,
    pub img: ImageUrl,
}

impl Post {
    pub fn new(title: String, text: String, img: String) -> Result<Self, String> {
        Ok(Self {
            title: PostTitle::parse(title)?,
            text: PostText::parse(text)?,
            img: ImageUrl::parse(img)?,
        })
    }
}
