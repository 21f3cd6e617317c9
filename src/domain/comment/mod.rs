mod interval;
mod message;
mod tree;
mod types;

pub use interval::Interval;
pub use message::{CommentMessage, MAX_MESSAGE_GRAPHEMES};
pub use tree::{CommentAuthor, CommentNode, TreeError, assemble_tree};
pub use types::*;
