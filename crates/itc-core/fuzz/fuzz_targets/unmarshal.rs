//! Fuzz target for the stamp wire decoder.
//!
//! Feeds arbitrary bytes to `Stamp::unmarshal`. Decoding must never panic,
//! and whatever decodes must be in normal form, survive every stamp
//! operation and re-encode to bytes that decode to the same stamp.

#![no_main]

use itc_core::Stamp;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(mut stamp) = Stamp::unmarshal(data) else {
        return;
    };

    assert!(stamp.id().is_normal());
    assert!(stamp.history().is_normal());

    let reencoded = stamp.marshal();
    assert_eq!(Stamp::unmarshal(&reencoded).as_ref(), Ok(&stamp));

    // Decoded counters leave room for one event on each side of a fork.
    let mut forked = stamp.fork();
    stamp.event();
    forked.event();
    let _ = stamp.compare(&forked);
    stamp.join(forked);
});
