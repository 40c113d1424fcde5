//! Encoding of identity trees.
//!
//! A 2-bit tag selects the shape: `00` leaf (followed by its bit), `01`
//! node with a zero left child, `10` node with a zero right child, `11`
//! node with both children encoded.

use crate::bits::{BitReader, BitWriter};
use crate::error::{DecodeError, Result};
use crate::id::Id;

use super::{BitDecode, BitEncode, MAX_DEPTH};

const TAG_LEAF: u64 = 0;
const TAG_ZERO_LEFT: u64 = 1;
const TAG_ZERO_RIGHT: u64 = 2;
const TAG_BOTH: u64 = 3;

impl BitEncode for Id {
    fn encode(&self, w: &mut BitWriter) {
        match self {
            Id::Zero => {
                w.push(TAG_LEAF, 2);
                w.push(0, 1);
            }
            Id::One => {
                w.push(TAG_LEAF, 2);
                w.push(1, 1);
            }
            Id::Node(left, right) => match (left.as_ref(), right.as_ref()) {
                (Id::Zero, right) => {
                    w.push(TAG_ZERO_LEFT, 2);
                    right.encode(w);
                }
                (left, Id::Zero) => {
                    w.push(TAG_ZERO_RIGHT, 2);
                    left.encode(w);
                }
                (left, right) => {
                    w.push(TAG_BOTH, 2);
                    left.encode(w);
                    right.encode(w);
                }
            },
        }
    }
}

impl BitDecode for Id {
    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        decode_at(reader, 0)
    }
}

fn decode_at(r: &mut BitReader<'_>, depth: usize) -> Result<Id> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::TooDeep { limit: MAX_DEPTH });
    }

    let id = match r.pop(2)? {
        TAG_LEAF => {
            if r.pop_bit()? {
                Id::One
            } else {
                Id::Zero
            }
        }
        TAG_ZERO_LEFT => Id::Node(Box::new(Id::Zero), Box::new(decode_at(r, depth + 1)?)),
        TAG_ZERO_RIGHT => Id::Node(Box::new(decode_at(r, depth + 1)?), Box::new(Id::Zero)),
        _ => {
            let left = decode_at(r, depth + 1)?;
            let right = decode_at(r, depth + 1)?;
            Id::Node(Box::new(left), Box::new(right))
        }
    };
    Ok(id)
}
