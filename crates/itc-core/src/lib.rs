//! # itc-core
//!
//! Interval tree clocks: causality tracking for a changing set of
//! participants, without a pre-registered identity space.
//!
//! ## Features
//!
//! - [`Stamp`] with fork, event and join, plus the derived send, receive,
//!   sync and peek operations
//! - Causal comparison of stamps (`leq`, `compare`, `concurrent`)
//! - Compact bit-level binary encoding of stamps and of the underlying trees
//! - Parsing of the printed notation, e.g. `((1, 0), (0, 1, 0))`
//! - Optional `tracing` instrumentation and `serde` support

#![deny(clippy::all)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ```rust
//! use itc_core::Stamp;
//!
//! // One participant owns the whole id space to begin with.
//! let mut a = Stamp::seed();
//! assert_eq!(a.to_string(), "(1, 0)");
//!
//! // Forking hands out half of it.
//! let mut b = a.fork();
//! a.event();
//! b.event();
//! assert!(a.concurrent(&b));
//!
//! // Stamps travel as bytes.
//! let bytes = b.marshal();
//! let received = Stamp::unmarshal(&bytes).unwrap();
//! assert_eq!(received, b);
//!
//! // Joining retires `b` and merges what both knew.
//! a.join(received);
//! assert_eq!(a.to_string(), "(1, 1)");
//! ```

pub mod bits;
pub mod encode;
pub mod error;
pub mod event;
pub mod id;
pub mod stamp;
mod text;

pub use self::encode::{BitDecode, BitEncode};
pub use self::error::{DecodeError, ParseError};
pub use self::event::Event;
pub use self::id::Id;
pub use self::stamp::Stamp;
