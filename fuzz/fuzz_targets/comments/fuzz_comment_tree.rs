// Run with: cargo fuzz run fuzz_comment_tree
// Arbitrary interval sets must either assemble or be rejected, never panic,
// and an assembled tree must account for every record.
#![no_main]

use arbitrary::Arbitrary;
use clinichub::domain::{CommentNode, CommentRecord, assemble_tree};
use libfuzzer_sys::fuzz_target;
use uuid::Uuid;

#[derive(Arbitrary, Debug)]
struct Bounds {
    left: i16,
    right: i16,
}

fn count(node: &CommentNode) -> usize {
    1 + node.children.iter().map(count).sum::<usize>()
}

fuzz_target!(|bounds: Vec<Bounds>| {
    let records: Vec<CommentRecord> = bounds
        .iter()
        .map(|b| CommentRecord {
            id: Uuid::new_v4(),
            post_id: Uuid::nil(),
            lft: b.left.into(),
            rgt: b.right.into(),
            message: String::new(),
            created_by: None,
            created_at: chrono::Utc::now(),
            author_name: None,
            author_avatar: None,
        })
        .collect();
    let total = records.len();

    if let Ok(Some(root)) = assemble_tree(records) {
        assert_eq!(count(&root), total);
    }
});
