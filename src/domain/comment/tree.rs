use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{CommentRecord, Interval};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: Uuid,
    pub display_name: String,
    pub avatar: Option<String>,
}

/// One comment with its replies, as served to readers.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub id: Uuid,
    pub post_id: Uuid,
    pub left: i32,
    pub right: i32,
    pub message: String,
    pub created_by: Option<CommentAuthor>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "child", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    pub fn interval(&self) -> Interval {
        Interval {
            left: self.left,
            right: self.right,
        }
    }
}

impl From<CommentRecord> for CommentNode {
    fn from(record: CommentRecord) -> Self {
        let created_by = record.created_by.map(|id| CommentAuthor {
            id,
            display_name: record.author_name.unwrap_or_default(),
            avatar: record.author_avatar,
        });

        Self {
            id: record.id,
            post_id: record.post_id,
            left: record.lft,
            right: record.rgt,
            message: record.message,
            created_by,
            created_at: record.created_at,
            children: Vec::new(),
        }
    }
}

/// Stored intervals that do not describe a single rooted tree.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("no comment has left bound 1")]
    MissingRoot,

    #[error("comment {id} has an empty interval [{left}, {right}]")]
    EmptyInterval { id: Uuid, left: i32, right: i32 },

    #[error("no comment starts or ends at bound {expected}")]
    MissingBound { expected: i32 },

    #[error("comment {id} [{left}, {right}] is not nested inside its parent [{parent_left}, {parent_right}]")]
    Overlap {
        id: Uuid,
        left: i32,
        right: i32,
        parent_left: i32,
        parent_right: i32,
    },

    #[error("comment {id} lies outside the root interval")]
    OutsideRoot { id: Uuid },
}

/// Rebuilds a post's comment tree from its flat nested-set records.
///
/// The result depends only on the intervals, never on the order the records
/// arrive in. Returns `Ok(None)` when there are no records at all. Any gap,
/// duplicate bound or partial overlap is reported instead of being skipped,
/// so a corrupted tree is never served truncated.
pub fn assemble_tree(mut records: Vec<CommentRecord>) -> Result<Option<CommentNode>, TreeError> {
    records.sort_by_key(|r| r.lft);
    let mut records = records.into_iter();

    let Some(root) = records.next() else {
        return Ok(None);
    };
    if !root.interval().is_root() {
        return Err(TreeError::MissingRoot);
    }
    check_not_empty(&root)?;

    let mut assembler = Assembler::start(root.into());

    for record in records {
        assembler.close_finished();

        let Some(parent) = assembler.open.last() else {
            return Err(TreeError::OutsideRoot { id: record.id });
        };

        // duplicates and holes both show up as a left bound that skips the cursor
        if record.lft != assembler.cursor {
            return Err(TreeError::MissingBound {
                expected: assembler.cursor,
            });
        }
        check_not_empty(&record)?;

        let parent = parent.interval();
        if !parent.contains(&record.interval()) {
            return Err(TreeError::Overlap {
                id: record.id,
                left: record.lft,
                right: record.rgt,
                parent_left: parent.left,
                parent_right: parent.right,
            });
        }

        assembler.cursor = record.lft + 1;
        assembler.open.push(record.into());
    }

    assembler.close_finished();
    match assembler.finished {
        Some(root) if assembler.open.is_empty() => Ok(Some(root)),
        _ => Err(TreeError::MissingBound {
            expected: assembler.cursor,
        }),
    }
}

fn check_not_empty(record: &CommentRecord) -> Result<(), TreeError> {
    if record.lft >= record.rgt {
        return Err(TreeError::EmptyInterval {
            id: record.id,
            left: record.lft,
            right: record.rgt,
        });
    }
    Ok(())
}

/// Walks the bounds left to right. `open` holds the chain of comments whose
/// right bound has not been reached yet, innermost last.
struct Assembler {
    open: Vec<CommentNode>,
    cursor: i32,
    finished: Option<CommentNode>,
}

impl Assembler {
    fn start(root: CommentNode) -> Self {
        Self {
            cursor: root.left + 1,
            open: vec![root],
            finished: None,
        }
    }

    /// Pops every open comment whose right bound is the cursor and hangs it
    /// under the next open one.
    fn close_finished(&mut self) {
        while self.open.last().is_some_and(|node| node.right == self.cursor) {
            let Some(node) = self.open.pop() else {
                break;
            };
            self.cursor += 1;

            match self.open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => self.finished = Some(node),
            }
        }
    }
}
