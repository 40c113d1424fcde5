//! Bit-level encoding of ids, events and stamps.
//!
//! This module provides the [`BitEncode`] and [`BitDecode`] traits, which
//! write trees to a [`BitWriter`] and read them back from a [`BitReader`].
//! The grammar is self-describing, so values are concatenated without
//! length prefixes.
//!
//! # Example
//!
//! ```
//! use itc_core::encode::{BitDecode, BitEncode};
//! use itc_core::Id;
//!
//! let id: Id = "(1, 0)".parse().unwrap();
//! let bits = id.to_bits();
//! assert_eq!(bits.to_string(), "<<2:2, 0:2, 1:1>>");
//!
//! let decoded = Id::from_bits(bits.as_bytes()).unwrap();
//! assert_eq!(decoded, id);
//! ```

use crate::bits::{BitReader, BitWriter};
use crate::error::Result;

mod event;
mod id;
mod stamp;

/// Deepest tree the decoders accept.
///
/// Bounds the recursion of decoding hostile input. Trees built by
/// repeated forking grow one level per fork of the same share, far below
/// this limit in practice.
pub const MAX_DEPTH: usize = 512;

/// A value that can be written to a bitstream.
pub trait BitEncode {
    /// Appends the encoding of this value to `writer`.
    fn encode(&self, writer: &mut BitWriter);

    /// Encodes this value into a fresh writer.
    #[must_use]
    fn to_bits(&self) -> BitWriter {
        let mut writer = BitWriter::new();
        self.encode(&mut writer);
        writer
    }
}

/// A value that can be read back from a bitstream.
pub trait BitDecode: Sized {
    /// Reads one value from `reader`, leaving it positioned after the value.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`](crate::DecodeError) on truncated or
    /// malformed input.
    fn decode(reader: &mut BitReader<'_>) -> Result<Self>;

    /// Decodes one value from the start of `bytes`, ignoring what follows.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`](crate::DecodeError) on truncated or
    /// malformed input.
    fn from_bits(bytes: &[u8]) -> Result<Self> {
        Self::decode(&mut BitReader::new(bytes))
    }
}
