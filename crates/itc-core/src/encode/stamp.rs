//! Encoding of stamps: the id immediately followed by the event tree.

use crate::bits::{BitReader, BitWriter};
use crate::error::{DecodeError, Result};
use crate::event::Event;
use crate::id::Id;
use crate::stamp::{Stamp, MAX_COUNTER};

use super::{BitDecode, BitEncode};

impl BitEncode for Stamp {
    fn encode(&self, w: &mut BitWriter) {
        self.id().encode(w);
        self.history().encode(w);
    }
}

impl BitDecode for Stamp {
    /// Decodes a stamp and brings both trees into normal form, so that no
    /// input can produce a stamp violating the invariants of [`Stamp`].
    /// Histories with a counter above [`MAX_COUNTER`] are rejected, so a
    /// decoded stamp can always record another event.
    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        let id = Id::decode(reader)?;
        let position = reader.position();
        let event = Event::decode(reader)?;
        if event.max() > MAX_COUNTER {
            return Err(DecodeError::Overflow { position });
        }
        Ok(Stamp::from_parts(id, event))
    }
}
