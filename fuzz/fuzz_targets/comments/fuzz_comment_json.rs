// Run with: cargo fuzz run fuzz_comment_json
#![no_main]

use clinichub::domain::{CommentMessage, CreateCommentPayload, EditCommentPayload, NewComment};
use libfuzzer_sys::fuzz_target;
use uuid::Uuid;

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = serde_json::from_slice::<CreateCommentPayload>(data) {
        let _ = NewComment::new(Uuid::nil(), payload.parent_id, payload.message);
    }

    if let Ok(payload) = serde_json::from_slice::<EditCommentPayload>(data) {
        if let Ok(message) = CommentMessage::parse(payload.message) {
            assert!(!message.as_ref().trim().is_empty());
        }
    }
});
