//! Bit-level reader.

use crate::error::{DecodeError, Result};

/// Consumes fixed-width fields from a byte buffer, MSB-first.
///
/// The mirror of [`BitWriter`](super::BitWriter). Reads never go past the
/// end of the borrowed buffer: a short buffer yields
/// [`DecodeError::UnexpectedEnd`].
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, position: 0 }
    }

    /// Bit offset of the next read.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bits.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() * 8 - self.position
    }

    /// Reads the next `width` bits (at most 64) as an unsigned integer.
    pub fn pop(&mut self, width: u32) -> Result<u64> {
        debug_assert!(width <= 64, "field width out of range: {width}");
        let available = self.remaining();
        if width as usize > available {
            return Err(DecodeError::UnexpectedEnd {
                position: self.position,
                needed: width,
                available,
            });
        }

        let mut value = 0u64;
        for _ in 0..width {
            let bit = (self.buf[self.position / 8] >> (7 - self.position % 8)) & 1;
            value = (value << 1) | u64::from(bit);
            self.position += 1;
        }
        Ok(value)
    }

    /// Reads a single bit.
    pub fn pop_bit(&mut self) -> Result<bool> {
        Ok(self.pop(1)? == 1)
    }

    /// Reads a value written by [`BitWriter::push_varint`](super::BitWriter::push_varint)
    /// with the same starting width.
    pub fn pop_varint(&mut self, mut width: u32) -> Result<u64> {
        let start = self.position;
        let mut base = 0u64;
        while self.pop_bit()? {
            if width >= 64 {
                return Err(DecodeError::Overflow { position: start });
            }
            base = base
                .checked_add(1u64 << width)
                .ok_or(DecodeError::Overflow { position: start })?;
            width += 1;
        }
        let low = self.pop(width)?;
        base.checked_add(low)
            .ok_or(DecodeError::Overflow { position: start })
    }
}
