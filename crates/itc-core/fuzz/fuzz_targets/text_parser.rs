//! Fuzz target for the printed-notation parsers.

#![no_main]

use itc_core::{Event, Id, Stamp};
use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };

    let _ = input.parse::<Id>();
    let _ = input.parse::<Event>();

    // A parsed stamp prints in canonical form, which parses to itself.
    if let Ok(mut stamp) = input.parse::<Stamp>() {
        let printed = stamp.to_string();
        assert_eq!(printed.parse::<Stamp>().as_ref(), Ok(&stamp));
        stamp.event();
    }
});
