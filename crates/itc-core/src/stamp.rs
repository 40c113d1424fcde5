//! Stamps: the logical clock held by one participant.
//!
//! A stamp pairs an [`Id`] (the share of the id space the participant may
//! record events in) with an [`Event`] tree (the causal history it knows).
//! Participants are created by [`Stamp::fork`], record progress with
//! [`Stamp::event`] and retire by being [joined](Stamp::join) into another
//! stamp.

use std::cmp::Ordering;
use std::fmt;

use crate::bits::BitReader;
use crate::encode::{BitDecode, BitEncode};
use crate::error::Result;
use crate::event::Event;
use crate::id::Id;

/// Extra cost charged by [`grow`] for expanding a flat counter into a node.
///
/// Large enough that growing inside an existing branch always wins over
/// restructuring a leaf.
const EXPAND_COST: u64 = 99_999;

/// Largest counter a decoded or parsed stamp may carry.
///
/// One below `u64::MAX`, so every stamp accepted from bytes or text can
/// record at least one more event.
pub const MAX_COUNTER: u64 = u64::MAX - 1;

/// An interval tree clock stamp.
///
/// Both trees are kept in normal form by every operation, so structural
/// equality of two stamps means they hold the same share and know the same
/// history.
///
/// # Example
///
/// ```rust
/// use itc_core::Stamp;
///
/// let mut a = Stamp::seed();
/// let mut b = a.fork();
/// assert_eq!(a.to_string(), "((1, 0), 0)");
/// assert_eq!(b.to_string(), "((0, 1), 0)");
///
/// a.event();
/// b.event();
/// assert_eq!(a.to_string(), "((1, 0), (0, 1, 0))");
/// assert_eq!(b.to_string(), "((0, 1), (0, 0, 1))");
/// assert!(a.concurrent(&b));
///
/// a.join(b);
/// assert_eq!(a.to_string(), "(1, 1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Stamp {
    id: Id,
    event: Event,
}

impl Stamp {
    /// Creates the seed stamp `(1, 0)`: full ownership, empty history.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            id: Id::One,
            event: Event::Leaf(0),
        }
    }

    /// Same as [`Stamp::seed`].
    #[must_use]
    pub fn new() -> Self {
        Self::seed()
    }

    /// Builds a stamp from raw trees, normalizing both.
    #[must_use]
    pub fn from_parts(id: Id, event: Event) -> Self {
        Self {
            id: id.normalize(),
            event: event.normalize(),
        }
    }

    /// The identity component.
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// The event component.
    #[must_use]
    pub fn history(&self) -> &Event {
        &self.event
    }

    /// Splits the stamp into its components.
    #[must_use]
    pub fn into_parts(self) -> (Id, Event) {
        (self.id, self.event)
    }

    /// Returns `true` if the stamp owns no share of the id space.
    ///
    /// Anonymous stamps can carry history (see [`Stamp::peek`]) but cannot
    /// record events.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.id.is_zero()
    }

    /// Splits off a new stamp with half of this stamp's share and a copy of
    /// its history.
    #[must_use = "the forked stamp owns part of the id space"]
    pub fn fork(&mut self) -> Stamp {
        let (kept, given) = std::mem::take(&mut self.id).split();
        self.id = kept;
        let forked = Stamp {
            id: given,
            event: self.event.clone(),
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(kept = %self.id, given = %forked.id, "forked stamp");
        forked
    }

    /// Records a new event.
    ///
    /// The history is first raised as far as the owned share allows without
    /// changing its shape; only if that makes no progress does the tree grow
    /// by a single counter. Afterwards the old history is strictly below the
    /// new one. An anonymous stamp is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the new counter would not fit in a `u64`.
    pub fn event(&mut self) {
        if self.id.is_zero() {
            #[cfg(feature = "tracing")]
            tracing::trace!(event = %self.event, "event on anonymous stamp ignored");
            return;
        }

        let filled = fill(&self.id, &self.event);
        if filled != self.event {
            self.event = filled;
        } else {
            let (grown, _cost) = grow(&self.id, &self.event);
            self.event = grown.normalize();
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(id = %self.id, event = %self.event, "recorded event");
    }

    /// Merges `other` into this stamp: shares are summed and histories
    /// joined. `other` is consumed.
    pub fn join(&mut self, other: Stamp) {
        let id = std::mem::take(&mut self.id);
        let event = std::mem::take(&mut self.event);
        self.id = id.sum(other.id);
        self.event = event.join(other.event);

        #[cfg(feature = "tracing")]
        tracing::trace!(id = %self.id, event = %self.event, "joined stamp");
    }

    /// Returns `true` if this stamp's history is contained in `other`'s.
    #[must_use]
    pub fn leq(&self, other: &Stamp) -> bool {
        self.event.leq(&other.event)
    }

    /// Compares histories under the causal order; `None` when concurrent.
    #[must_use]
    pub fn compare(&self, other: &Stamp) -> Option<Ordering> {
        self.event.causal_cmp(&other.event)
    }

    /// Returns `true` if neither history contains the other.
    #[must_use]
    pub fn concurrent(&self, other: &Stamp) -> bool {
        self.compare(other).is_none()
    }

    /// An anonymous copy of this stamp's history, suitable for attaching
    /// to a message.
    #[must_use]
    pub fn peek(&self) -> Stamp {
        Stamp {
            id: Id::Zero,
            event: self.event.clone(),
        }
    }

    /// Records a send event and returns the anonymous stamp to transmit.
    #[must_use = "the returned stamp is the message timestamp"]
    pub fn send(&mut self) -> Stamp {
        self.event();
        self.peek()
    }

    /// Incorporates a received message stamp and records the receive event.
    pub fn receive(&mut self, message: Stamp) {
        self.join(message);
        self.event();
    }

    /// Synchronizes two participants: both end up with the joined history
    /// and a fresh split of their combined share.
    pub fn sync(&mut self, other: &mut Stamp) {
        self.join(std::mem::take(other));
        *other = self.fork();
    }

    /// Encodes the stamp in the binary wire format.
    ///
    /// The result is padded with zero bits to a multiple of 4 bytes.
    #[must_use]
    pub fn marshal(&self) -> Vec<u8> {
        self.to_bits().into_bytes()
    }

    /// Decodes a stamp from the binary wire format.
    ///
    /// Bits after the stamp are ignored. The decoded trees are normalized.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`](crate::DecodeError) if `bytes` is
    /// truncated or malformed.
    pub fn unmarshal(bytes: &[u8]) -> Result<Stamp> {
        let mut reader = BitReader::new(bytes);
        let decoded = Stamp::decode(&mut reader);
        #[cfg(feature = "tracing")]
        if let Err(ref error) = decoded {
            tracing::debug!(%error, len = bytes.len(), "failed to decode stamp");
        }
        decoded
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.id, self.event)
    }
}

/// Raises `e` inside the share owned by `id` as far as possible without
/// adding nodes.
fn fill(id: &Id, e: &Event) -> Event {
    match (id, e) {
        (Id::Zero, _) => e.clone(),
        (Id::One, _) => Event::Leaf(e.max()),
        (_, Event::Leaf(_)) => e.clone(),
        (Id::Node(il, ir), Event::Node(value, el, er)) => {
            let (left, right) = if il.is_one() {
                let right = fill(ir, er);
                let left = Event::Leaf(el.max().max(right.min()));
                (left, right)
            } else if ir.is_one() {
                let left = fill(il, el);
                let right = Event::Leaf(er.max().max(left.min()));
                (left, right)
            } else {
                (fill(il, el), fill(ir, er))
            };
            Event::node(*value, left, right).normalize()
        }
    }
}

/// Adds one to a single counter inside the share owned by `id`, picking
/// the place that changes the tree least. Returns the new tree and the cost
/// of the choice.
fn grow(id: &Id, e: &Event) -> (Event, u64) {
    match (id, e) {
        (Id::Zero, _) => unreachable!("grow called with an anonymous id"),
        (Id::One, _) => (Event::Leaf(increment(e.max())), 0),
        (Id::Node(..), Event::Leaf(value)) => {
            let expanded = Event::node(*value, Event::Leaf(0), Event::Leaf(0));
            let (grown, cost) = grow(id, &expanded);
            (grown, cost + EXPAND_COST)
        }
        (Id::Node(il, ir), Event::Node(value, el, er)) => {
            if il.is_zero() {
                let (right, cost) = grow(ir, er);
                return (Event::node(*value, el.as_ref().clone(), right), cost + 1);
            }
            if ir.is_zero() {
                let (left, cost) = grow(il, el);
                return (Event::node(*value, left, er.as_ref().clone()), cost + 1);
            }

            let (left, cost_left) = grow(il, el);
            let (right, cost_right) = grow(ir, er);
            if cost_left <= cost_right {
                (Event::node(*value, left, er.as_ref().clone()), cost_left + 1)
            } else {
                (Event::node(*value, el.as_ref().clone(), right), cost_right + 1)
            }
        }
    }
}

fn increment(value: u64) -> u64 {
    match value.checked_add(1) {
        Some(next) => next,
        None => panic!("event counter overflow"),
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Stamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Stamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
