//! Bit-packed buffers for the stamp wire format.
//!
//! The wire format is a bitstream: fields are written MSB-first with no
//! byte alignment between them, and the buffer is only zero-padded at the
//! end to complete its final 4-byte block.
//!
//! Unbounded counters use a bit-doubling variable-length code. With a
//! current width `B`, a value `n < 2^B` is written as a `0` bit followed by
//! `n` in `B` bits; larger values are written as a `1` bit followed by the
//! code for `n - 2^B` at width `B + 1`.

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

/// Size of one buffer block in bytes.
pub const BLOCK_BYTES: usize = 4;

const BLOCK_BITS: usize = BLOCK_BYTES * 8;
