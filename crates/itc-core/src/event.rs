//! Event trees: the causal history a stamp knows about.
//!
//! An event tree maps the same interval partition as an [`Id`](crate::Id)
//! to event counters. A node carries a baseline that applies to its whole
//! interval; the values of its children are relative to that baseline.

use std::cmp::Ordering;
use std::fmt;

/// An event tree.
///
/// Trees held by a [`Stamp`](crate::Stamp) are always in normal form: no
/// node has two equal leaf children, and every node's baseline is as high
/// as possible, so the smaller of its children bottoms out at zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    /// A flat counter over the whole interval.
    Leaf(u64),
    /// A baseline plus two children offset by it.
    Node(u64, Box<Event>, Box<Event>),
}

impl Default for Event {
    /// The empty history, `0`.
    fn default() -> Self {
        Event::Leaf(0)
    }
}

impl Event {
    /// Builds a node from a baseline and two children, without normalizing.
    #[must_use]
    pub fn node(value: u64, left: Event, right: Event) -> Event {
        Event::Node(value, Box::new(left), Box::new(right))
    }

    /// The root value: the counter of a leaf or the baseline of a node.
    #[must_use]
    pub fn value(&self) -> u64 {
        match self {
            Event::Leaf(value) | Event::Node(value, _, _) => *value,
        }
    }

    /// Returns `true` for a leaf with value zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Event::Leaf(0))
    }

    /// The largest counter anywhere in the tree.
    #[must_use]
    pub fn max(&self) -> u64 {
        match self {
            Event::Leaf(value) => *value,
            Event::Node(value, left, right) => value + left.max().max(right.max()),
        }
    }

    /// Like [`max`](Self::max), but `None` when a counter does not fit in `u64`.
    pub(crate) fn checked_max(&self) -> Option<u64> {
        match self {
            Event::Leaf(value) => Some(*value),
            Event::Node(value, left, right) => {
                value.checked_add(left.checked_max()?.max(right.checked_max()?))
            }
        }
    }

    /// The smallest counter anywhere in the tree.
    #[must_use]
    pub fn min(&self) -> u64 {
        match self {
            Event::Leaf(value) => *value,
            Event::Node(value, left, right) => value + left.min().min(right.min()),
        }
    }

    /// Raises the root value by `by`.
    #[must_use]
    pub fn lift(self, by: u64) -> Event {
        match self {
            Event::Leaf(value) => Event::Leaf(value + by),
            Event::Node(value, left, right) => Event::Node(value + by, left, right),
        }
    }

    /// Lowers the root value by `by`.
    ///
    /// `by` must not exceed the root value.
    #[must_use]
    pub fn sink(self, by: u64) -> Event {
        match self {
            Event::Leaf(value) => Event::Leaf(value - by),
            Event::Node(value, left, right) => Event::Node(value - by, left, right),
        }
    }

    /// Brings the tree into normal form.
    ///
    /// Children are normalized first. Two equal leaves collapse into one;
    /// otherwise the common minimum of the children is moved up into the
    /// baseline.
    #[must_use]
    pub fn normalize(self) -> Event {
        let (value, left, right) = match self {
            Event::Leaf(_) => return self,
            Event::Node(value, left, right) => (value, left, right),
        };

        let left = left.normalize();
        let right = right.normalize();
        if let (Event::Leaf(l), Event::Leaf(r)) = (&left, &right) {
            if l == r {
                return Event::Leaf(value + l);
            }
        }

        let m = left.min().min(right.min());
        Event::node(value + m, left.sink(m), right.sink(m))
    }

    /// Returns the least upper bound of two histories.
    #[must_use]
    pub fn join(self, other: Event) -> Event {
        match (self, other) {
            (Event::Leaf(a), Event::Leaf(b)) => Event::Leaf(a.max(b)),
            (Event::Leaf(a), node @ Event::Node(..)) => {
                Event::node(a, Event::Leaf(0), Event::Leaf(0)).join(node)
            }
            (node @ Event::Node(..), Event::Leaf(b)) => {
                node.join(Event::node(b, Event::Leaf(0), Event::Leaf(0)))
            }
            (Event::Node(v1, l1, r1), Event::Node(v2, l2, r2)) => {
                if v1 > v2 {
                    return Event::Node(v2, l2, r2).join(Event::Node(v1, l1, r1));
                }
                let offset = v2 - v1;
                Event::node(
                    v1,
                    l1.join(l2.lift(offset)),
                    r1.join(r2.lift(offset)),
                )
                .normalize()
            }
        }
    }

    /// The causal order: `true` when every counter in `self` is at most
    /// the corresponding counter in `other`.
    #[must_use]
    pub fn leq(&self, other: &Event) -> bool {
        leq_from(self, 0, other, 0)
    }

    /// Compares two histories under the causal order.
    ///
    /// Returns `None` when neither is contained in the other.
    #[must_use]
    pub fn causal_cmp(&self, other: &Event) -> Option<Ordering> {
        match (self.leq(other), other.leq(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }

    /// Checks the normal form invariants over the whole tree.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        match self {
            Event::Leaf(_) => true,
            Event::Node(_, left, right) => {
                let equal_leaves =
                    matches!((left.as_ref(), right.as_ref()), (Event::Leaf(l), Event::Leaf(r)) if l == r);
                !equal_leaves
                    && left.min().min(right.min()) == 0
                    && left.is_normal()
                    && right.is_normal()
            }
        }
    }

    /// Depth of the tree; a leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Event::Leaf(_) => 0,
            Event::Node(_, left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}

/// `leq` with the baselines accumulated on the way down instead of lifting
/// cloned subtrees.
fn leq_from(a: &Event, base_a: u64, b: &Event, base_b: u64) -> bool {
    match (a, b) {
        (Event::Leaf(x), _) => base_a + x <= base_b + b.value(),
        (Event::Node(x, l, r), Event::Leaf(y)) => {
            let a_root = base_a + x;
            a_root <= base_b + y && leq_from(l, a_root, b, base_b) && leq_from(r, a_root, b, base_b)
        }
        (Event::Node(x, l1, r1), Event::Node(y, l2, r2)) => {
            let a_root = base_a + x;
            let b_root = base_b + y;
            a_root <= b_root && leq_from(l1, a_root, l2, b_root) && leq_from(r1, a_root, r2, b_root)
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Leaf(value) => write!(f, "{value}"),
            Event::Node(value, left, right) => write!(f, "({value}, {left}, {right})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(s: &str) -> Event {
        s.parse().unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(Event::Leaf(0).to_string(), "0");
        assert_eq!(
            Event::node(0, Event::Leaf(1), Event::Leaf(2)).to_string(),
            "(0, 1, 2)"
        );
    }

    #[test]
    fn test_lift_and_sink_touch_only_the_root() {
        assert_eq!(ev("4").lift(3), ev("7"));
        assert_eq!(ev("(1, 2, 3)").lift(3), ev("(4, 2, 3)"));
        assert_eq!(ev("4").sink(3), ev("1"));
        assert_eq!(ev("(4, 2, 3)").sink(3), ev("(1, 2, 3)"));
    }

    #[test]
    fn test_min_max() {
        let e = ev("(2, (1, 0, 3), 1)");
        assert_eq!(e.min(), 3);
        assert_eq!(e.max(), 6);
        assert_eq!(ev("4").min(), 4);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(ev("4").normalize(), ev("4"));
        assert_eq!(ev("(2, 1, 1)").normalize(), ev("3"));
        assert_eq!(ev("(2, (2, 1, 0), 3)").normalize(), ev("(4, (0, 1, 0), 1)"));
    }

    #[test]
    fn test_normalize_collapses_after_children() {
        // The children only become equal leaves once normalized themselves.
        let e = ev("(0, (1, 0, 0), 1)").normalize();
        assert_eq!(e, ev("1"));
        assert!(e.is_normal());
    }

    #[test]
    fn test_join_leaves() {
        assert_eq!(ev("7").join(ev("9")), ev("9"));
    }

    #[test]
    fn test_join_nodes() {
        assert_eq!(ev("(1, 2, 3)").join(ev("(4, 5, 6)")), ev("(9, 0, 1)"));
        assert_eq!(ev("(0, 0, 2)").join(ev("(0, 1, 0)")), ev("(1, 0, 1)"));
    }

    #[test]
    fn test_join_leaf_with_node() {
        assert_eq!(ev("(0, (1, 1, 0), 0)").join(ev("(1, 0, 1)")).to_string(), "(1, (0, 1, 0), 1)");
        assert_eq!(ev("3").join(ev("(1, 0, 4)")), ev("(3, 0, 2)"));
        assert_eq!(ev("(1, 0, 4)").join(ev("3")), ev("(3, 0, 2)"));
    }

    #[test]
    fn test_leq_leaves() {
        assert!(ev("1").leq(&ev("2")));
        assert!(!ev("2").leq(&ev("1")));
        assert!(ev("2").leq(&ev("2")));
    }

    #[test]
    fn test_leq_leaf_against_node() {
        assert!(ev("1").leq(&ev("(2, 1, 1)")));
        assert!(ev("1").leq(&ev("(1, 1, 1)")));
        assert!(!ev("3").leq(&ev("(2, 1, 1)")));
    }

    #[test]
    fn test_leq_node_against_leaf_and_node() {
        assert!(!ev("(2, 1, 1)").leq(&ev("2")));
        assert!(ev("(2, 1, 1)").leq(&ev("(2, 1, 1)")));
        assert!(ev("(0, 1, 0)").leq(&ev("1")));
        assert!(!ev("(0, 1, 0)").leq(&ev("(0, 0, 1)")));
    }

    #[test]
    fn test_causal_cmp() {
        assert_eq!(ev("0").causal_cmp(&ev("(0, 1, 0)")), Some(Ordering::Less));
        assert_eq!(ev("(0, 1, 0)").causal_cmp(&ev("0")), Some(Ordering::Greater));
        assert_eq!(ev("(0, 1, 0)").causal_cmp(&ev("(0, 0, 1)")), None);
        assert_eq!(ev("(1, 0, 2)").causal_cmp(&ev("(1, 0, 2)")), Some(Ordering::Equal));
    }

    #[test]
    fn test_is_normal() {
        assert!(ev("(1, 0, (0, 2, 0))").is_normal());
        assert!(!ev("(1, 1, 1)").is_normal());
        assert!(!ev("(0, 1, 2)").is_normal());
    }
}
