//! Fuzz target for note name parsing
//!
//! Arbitrary strings must never panic the parser, and anything it accepts
//! must print back to a name that parses to the same note.

#![no_main]

use jugalbandi_core::Note;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    if let Ok(note) = input.parse::<Note>() {
        let printed = note.to_string();
        assert_eq!(printed.parse::<Note>(), Ok(note), "{input:?} printed as {printed:?}");
    }
});
