//! Identity trees: the share of the id space a stamp owns.
//!
//! An id describes which parts of the unit interval `[0, 1)` a stamp may
//! record events in. `1` owns the whole interval, `0` owns nothing and a
//! node splits the interval in halves, each owned according to its child.
//! Siblings produced by [`Id::split`] own disjoint parts, and [`Id::sum`]
//! puts them back together.

use std::fmt;

/// An identity tree.
///
/// Ids produced by this crate are always in normal form: no node has two
/// equal leaf children (`(0, 0)` is `0` and `(1, 1)` is `1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Id {
    /// Owns nothing of this interval.
    Zero,
    /// Owns all of this interval.
    One,
    /// The interval split in halves.
    Node(Box<Id>, Box<Id>),
}

impl Default for Id {
    /// The seed id, owning everything.
    fn default() -> Self {
        Id::One
    }
}

impl Id {
    /// Builds a node, collapsing it to a leaf when both children are the
    /// same leaf.
    #[must_use]
    pub fn node(left: Id, right: Id) -> Id {
        match (left, right) {
            (Id::Zero, Id::Zero) => Id::Zero,
            (Id::One, Id::One) => Id::One,
            (left, right) => Id::Node(Box::new(left), Box::new(right)),
        }
    }

    /// Returns `true` for the empty share.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Id::Zero)
    }

    /// Returns `true` for the full share.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self, Id::One)
    }

    /// Splits the share into two disjoint halves whose sum is `self`.
    ///
    /// # Panics
    ///
    /// Panics on a `(0, 0)` node. Such an id is not in normal form and can
    /// only arise from a bug in this crate.
    #[must_use]
    pub fn split(self) -> (Id, Id) {
        match self {
            Id::Zero => (Id::Zero, Id::Zero),
            Id::One => (
                Id::Node(Box::new(Id::One), Box::new(Id::Zero)),
                Id::Node(Box::new(Id::Zero), Box::new(Id::One)),
            ),
            Id::Node(left, right) => match (*left, *right) {
                (Id::Zero, Id::Zero) => {
                    unreachable!("split called on an id that is not in normal form: (0, 0)")
                }
                (Id::Zero, right) => {
                    let (r1, r2) = right.split();
                    (
                        Id::Node(Box::new(Id::Zero), Box::new(r1)),
                        Id::Node(Box::new(Id::Zero), Box::new(r2)),
                    )
                }
                (left, Id::Zero) => {
                    let (l1, l2) = left.split();
                    (
                        Id::Node(Box::new(l1), Box::new(Id::Zero)),
                        Id::Node(Box::new(l2), Box::new(Id::Zero)),
                    )
                }
                (left, right) => (
                    Id::Node(Box::new(left), Box::new(Id::Zero)),
                    Id::Node(Box::new(Id::Zero), Box::new(right)),
                ),
            },
        }
    }

    /// Merges two shares back into one.
    ///
    /// Shares are expected to be disjoint, as produced by [`Id::split`].
    /// Overlapping shares saturate: a full leaf absorbs whatever it is
    /// summed with.
    #[must_use]
    pub fn sum(self, other: Id) -> Id {
        match (self, other) {
            (Id::Zero, id) | (id, Id::Zero) => id,
            (Id::One, _) | (_, Id::One) => Id::One,
            (Id::Node(l1, r1), Id::Node(l2, r2)) => Id::node(l1.sum(*l2), r1.sum(*r2)),
        }
    }

    /// Brings the tree into normal form, children first.
    #[must_use]
    pub fn normalize(self) -> Id {
        match self {
            Id::Node(left, right) => Id::node(left.normalize(), right.normalize()),
            leaf => leaf,
        }
    }

    /// Checks that no node in the tree has two equal leaf children.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        match self {
            Id::Zero | Id::One => true,
            Id::Node(left, right) => match (left.as_ref(), right.as_ref()) {
                (Id::Zero, Id::Zero) | (Id::One, Id::One) => false,
                (left, right) => left.is_normal() && right.is_normal(),
            },
        }
    }

    /// Depth of the tree; a leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Id::Zero | Id::One => 0,
            Id::Node(left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Zero => f.write_str("0"),
            Id::One => f.write_str("1"),
            Id::Node(left, right) => write!(f, "({left}, {right})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Id {
        s.parse().unwrap()
    }

    fn split_str(s: &str) -> String {
        let (i1, i2) = id(s).split();
        format!("({i1}, {i2})")
    }

    #[test]
    fn test_display() {
        assert_eq!(Id::One.to_string(), "1");
        assert_eq!(
            Id::Node(Box::new(Id::One), Box::new(Id::Zero)).to_string(),
            "(1, 0)"
        );
    }

    #[test]
    fn test_split_leaves() {
        assert_eq!(split_str("0"), "(0, 0)");
        assert_eq!(split_str("1"), "((1, 0), (0, 1))");
    }

    #[test]
    fn test_split_nodes() {
        assert_eq!(split_str("(0, 1)"), "((0, (1, 0)), (0, (0, 1)))");
        assert_eq!(split_str("(1, 0)"), "(((1, 0), 0), ((0, 1), 0))");
        assert_eq!(split_str("((0, 1), 1)"), "(((0, 1), 0), (0, 1))");
        // Not normal, but still splits along the halves.
        assert_eq!(split_str("(1, 1)"), "((1, 0), (0, 1))");
    }

    #[test]
    #[should_panic(expected = "not in normal form")]
    fn test_split_zero_node_panics() {
        let _ = Id::Node(Box::new(Id::Zero), Box::new(Id::Zero)).split();
    }

    #[test]
    fn test_normalize() {
        assert_eq!(id("(0, 0)").normalize(), Id::Zero);
        assert_eq!(id("(1, 1)").normalize(), Id::One);
        assert_eq!(id("((1, 1), (1, 1))").normalize(), Id::One);
        assert_eq!(id("((0, 0), 1)").normalize(), id("(0, 1)"));
        assert_eq!(id("((1, 0), 0)").normalize(), id("((1, 0), 0)"));
    }

    #[test]
    fn test_sum_leaves() {
        assert_eq!(Id::Zero.sum(Id::One), Id::One);
        assert_eq!(Id::One.sum(Id::Zero), Id::One);
        assert_eq!(Id::Zero.sum(Id::Zero), Id::Zero);
    }

    #[test]
    fn test_sum_of_split_restores() {
        for source in ["1", "(0, 1)", "(1, 0)", "((0, 1), 1)", "(((1, 0), 0), (0, 1))"] {
            let original = id(source);
            let (i1, i2) = original.clone().split();
            assert_eq!(i1.sum(i2), original, "sum(split({source}))");
        }
    }

    #[test]
    fn test_sum_overlapping_saturates() {
        assert_eq!(Id::One.sum(Id::One), Id::One);
        assert_eq!(Id::One.sum(id("(0, 1)")), Id::One);
    }

    #[test]
    fn test_is_normal() {
        assert!(id("((1, 0), 1)").is_normal());
        assert!(!id("((1, 1), 0)").is_normal());
        assert!(!id("(0, 0)").is_normal());
    }

    #[test]
    fn test_depth() {
        assert_eq!(Id::One.depth(), 0);
        assert_eq!(id("((1, 0), 1)").depth(), 2);
    }
}
