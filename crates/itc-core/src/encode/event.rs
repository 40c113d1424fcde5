//! Encoding of event trees.
//!
//! Grammar, with counters written as varints of starting width 2:
//!
//! ```text
//! leaf n             1 varint(n)
//! node (0, 0, r)     0 00 enc(r)
//! node (0, l, 0)     0 01 enc(l)
//! node (0, l, r)     0 10 enc(l) enc(r)
//! node (v, 0, r)     0 11 0 0 enc(leaf v) enc(r)
//! node (v, l, 0)     0 11 0 1 enc(leaf v) enc(l)
//! node (v, l, r)     0 11 1 enc(leaf v) enc(l) enc(r)
//! ```

use crate::bits::{BitReader, BitWriter};
use crate::error::{DecodeError, Result};
use crate::event::Event;

use super::{BitDecode, BitEncode, MAX_DEPTH};

/// Starting width of the counter varint.
const VALUE_WIDTH: u32 = 2;

const SUB_ZERO_LEFT: u64 = 0;
const SUB_ZERO_RIGHT: u64 = 1;
const SUB_BOTH: u64 = 2;
const SUB_VALUED: u64 = 3;

fn encode_leaf(value: u64, w: &mut BitWriter) {
    w.push(1, 1);
    w.push_varint(value, VALUE_WIDTH);
}

impl BitEncode for Event {
    fn encode(&self, w: &mut BitWriter) {
        let (value, left, right) = match self {
            Event::Leaf(value) => return encode_leaf(*value, w),
            Event::Node(value, left, right) => (*value, left.as_ref(), right.as_ref()),
        };

        w.push(0, 1);
        if value == 0 {
            if left.is_zero() {
                w.push(SUB_ZERO_LEFT, 2);
                right.encode(w);
            } else if right.is_zero() {
                w.push(SUB_ZERO_RIGHT, 2);
                left.encode(w);
            } else {
                w.push(SUB_BOTH, 2);
                left.encode(w);
                right.encode(w);
            }
            return;
        }

        w.push(SUB_VALUED, 2);
        if left.is_zero() {
            w.push(0, 1);
            w.push(0, 1);
            encode_leaf(value, w);
            right.encode(w);
        } else if right.is_zero() {
            w.push(0, 1);
            w.push(1, 1);
            encode_leaf(value, w);
            left.encode(w);
        } else {
            w.push(1, 1);
            encode_leaf(value, w);
            left.encode(w);
            right.encode(w);
        }
    }
}

impl BitDecode for Event {
    /// Decodes an event tree as written, without normalizing it. Trees whose
    /// accumulated counters exceed `u64` are rejected.
    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        let position = reader.position();
        let event = decode_at(reader, 0)?;
        if event.checked_max().is_none() {
            return Err(DecodeError::Overflow { position });
        }
        Ok(event)
    }
}

/// Reads a baseline, which is written as a complete leaf.
fn decode_baseline(r: &mut BitReader<'_>) -> Result<u64> {
    let position = r.position();
    if !r.pop_bit()? {
        return Err(DecodeError::MalformedValue { position });
    }
    r.pop_varint(VALUE_WIDTH)
}

fn decode_at(r: &mut BitReader<'_>, depth: usize) -> Result<Event> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::TooDeep { limit: MAX_DEPTH });
    }

    if r.pop_bit()? {
        return Ok(Event::Leaf(r.pop_varint(VALUE_WIDTH)?));
    }

    let zero = || Event::Leaf(0);
    let event = match r.pop(2)? {
        SUB_ZERO_LEFT => Event::node(0, zero(), decode_at(r, depth + 1)?),
        SUB_ZERO_RIGHT => Event::node(0, decode_at(r, depth + 1)?, zero()),
        SUB_BOTH => {
            let left = decode_at(r, depth + 1)?;
            let right = decode_at(r, depth + 1)?;
            Event::node(0, left, right)
        }
        _ => {
            if r.pop_bit()? {
                let value = decode_baseline(r)?;
                let left = decode_at(r, depth + 1)?;
                let right = decode_at(r, depth + 1)?;
                Event::node(value, left, right)
            } else if r.pop_bit()? {
                let value = decode_baseline(r)?;
                Event::node(value, decode_at(r, depth + 1)?, zero())
            } else {
                let value = decode_baseline(r)?;
                Event::node(value, zero(), decode_at(r, depth + 1)?)
            }
        }
    };
    Ok(event)
}
