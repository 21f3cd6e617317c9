mod comment;
mod image_url;
mod post;
mod user;

pub use comment::*;
pub use image_url::ImageUrl;
pub use post::*;
pub use user::*;
