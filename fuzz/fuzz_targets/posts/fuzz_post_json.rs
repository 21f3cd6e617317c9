// Run with: cargo fuzz run fuzz_post_json
#![no_main]

use clinichub::domain::{CreatePostPayload, ListPostsQuery, Post, PostQuery};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = serde_json::from_slice::<CreatePostPayload>(data) {
        let _ = Post::try_from(payload);
    }

    // the listing query arrives as a query string, JSON is just a convenient carrier
    if let Ok(query) = serde_json::from_slice::<ListPostsQuery>(data) {
        if let Ok(query) = PostQuery::try_from(query) {
            assert!(query.pagination.offset() >= 0);
        }
    }
});
