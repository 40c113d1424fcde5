//! Error types for the interval tree clock library.
//!
//! Decoding and text parsing are the only fallible operations: every
//! other operation on ids, events and stamps is a total function over
//! values kept in normal form, short of a counter running past `u64::MAX`.

use thiserror::Error;

/// Convenience type alias for Results using [`DecodeError`].
pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

/// Errors encountered while decoding the binary wire format.
///
/// Bytes handed to [`Stamp::unmarshal`](crate::Stamp::unmarshal) may come
/// from an untrusted peer, so every malformed or truncated input maps to
/// one of these variants instead of a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The buffer ended before the grammar was complete.
    #[error("unexpected end of input at bit {position}: needed {needed} bits, {available} available")]
    UnexpectedEnd {
        /// Bit offset of the failed read.
        position: usize,
        /// Number of bits requested.
        needed: u32,
        /// Number of bits left in the buffer.
        available: usize,
    },

    /// A counter does not fit in 64 bits, either as written or once the
    /// baselines above it are added up. Stamps also need room for one more
    /// event, so a stamp counter may not reach `u64::MAX`.
    #[error("counter overflow in value starting at bit {position}")]
    Overflow {
        /// Bit offset where the offending value started.
        position: usize,
    },

    /// The encoded tree nests deeper than the decoder allows.
    #[error("tree nesting exceeds {limit} levels")]
    TooDeep {
        /// Maximum supported depth.
        limit: usize,
    },

    /// An event baseline was not introduced by a leaf marker bit.
    #[error("malformed event baseline marker at bit {position}")]
    MalformedValue {
        /// Bit offset of the marker.
        position: usize,
    },
}

/// Errors encountered while parsing the printed notation of ids,
/// events and stamps, e.g. `((1, 0), (0, 1, 0))`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input does not match the notation.
    #[error("invalid {kind} notation at offset {offset}")]
    Invalid {
        /// What was being parsed (`"id"`, `"event"` or `"stamp"`).
        kind: &'static str,
        /// Byte offset where parsing failed.
        offset: usize,
    },

    /// A complete value was parsed but input remained.
    #[error("trailing input after {kind}: {rest:?}")]
    Trailing {
        /// What was being parsed.
        kind: &'static str,
        /// The unparsed remainder.
        rest: String,
    },
}
