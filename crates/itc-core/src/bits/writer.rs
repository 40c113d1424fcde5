//! Bit-level writer.

use std::fmt;

use super::{BLOCK_BITS, BLOCK_BYTES};

/// Appends fixed-width fields to a growing byte buffer, MSB-first.
///
/// Fields are packed back to back with no alignment; a field may cross
/// a byte or block boundary. The buffer always holds a whole number of
/// 4-byte blocks, so unused trailing bits are zero.
///
/// # Example
///
/// ```
/// use itc_core::bits::BitWriter;
///
/// let mut writer = BitWriter::new();
/// writer.push(2, 3);
/// writer.push(0, 1);
/// writer.push(1, 2);
///
/// assert_eq!(writer.to_bit_string(), "010001");
/// assert_eq!(writer.to_string(), "<<2:3, 0:1, 1:2>>");
/// assert_eq!(writer.as_bytes(), &[0x44, 0x00, 0x00, 0x00]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitWriter {
    buf: Vec<u8>,
    bit_len: usize,
    fields: Vec<(u64, u32)>,
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWriter {
    /// Creates a writer holding a single zeroed block.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0; BLOCK_BYTES],
            bit_len: 0,
            fields: Vec::new(),
        }
    }

    /// Appends the low `width` bits of `value`.
    ///
    /// `width` must be between 1 and 64; bits of `value` above `width`
    /// are ignored.
    pub fn push(&mut self, value: u64, width: u32) {
        debug_assert!((1..=64).contains(&width), "field width out of range: {width}");
        let width = width.min(64);

        let end = self.bit_len + width as usize;
        let needed = end.div_ceil(BLOCK_BITS) * BLOCK_BYTES;
        if self.buf.len() < needed {
            self.buf.resize(needed, 0);
        }

        for shift in (0..width).rev() {
            if (value >> shift) & 1 == 1 {
                self.buf[self.bit_len / 8] |= 0x80 >> (self.bit_len % 8);
            }
            self.bit_len += 1;
        }
        self.fields.push((value & low_mask(width), width));
    }

    /// Appends `n` using the bit-doubling variable-length code.
    ///
    /// While `n` does not fit in the current width a `1` is emitted, `2^width`
    /// is subtracted and the width grows by one; then a `0` and `n` in the
    /// current width follow.
    pub fn push_varint(&mut self, mut n: u64, mut width: u32) {
        loop {
            if width >= 64 || n < 1u64 << width {
                self.push(0, 1);
                self.push(n, width);
                return;
            }
            self.push(1, 1);
            n -= 1u64 << width;
            width += 1;
        }
    }

    /// Number of bits written so far.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// The packed, block-padded buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer, returning the packed, block-padded buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Renders exactly the written bits as a string of `0` and `1`.
    #[must_use]
    pub fn to_bit_string(&self) -> String {
        (0..self.bit_len)
            .map(|pos| {
                if self.buf[pos / 8] & (0x80 >> (pos % 8)) != 0 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }
}

/// Lists the pushed fields as `<<value:width, ...>>`.
impl fmt::Display for BitWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<<")?;
        for (i, (value, width)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}:{width}")?;
        }
        f.write_str(">>")
    }
}

fn low_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
