/// Nested-set bounds of one comment.
///
/// A comment is a descendant of another exactly when its interval lies
/// strictly inside the other's. Every post's tree starts at [`Interval::ROOT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub left: i32,
    pub right: i32,
}

impl Interval {
    pub const ROOT: Interval = Interval { left: 1, right: 2 };

    /// Amount every bound at or past the insertion edge moves by to open a slot.
    pub const GAP: i32 = 2;

    pub fn is_root(&self) -> bool {
        self.left == Self::ROOT.left
    }

    /// Bounds of a new last child, valid once every bound `>= self.right`
    /// has been moved by [`Interval::GAP`].
    pub fn next_child_slot(&self) -> Interval {
        Interval {
            left: self.right,
            right: self.right + 1,
        }
    }

    pub fn contains(&self, other: &Interval) -> bool {
        self.left < other.left && other.right < self.right
    }
}
