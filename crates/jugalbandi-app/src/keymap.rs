//! Computer keyboard to piano key mapping.
//!
//! Tracker layout: the bottom letter row plays octave 3 with the home row
//! as black keys, the top letter row plays octave 4 with the digit row as
//! black keys.

use jugalbandi_core::{LOWEST_OCTAVE, Note, PitchClass};

/// Keys for octave 3, in pitch order C..B.
pub const LOWER_ROW: [char; 12] = ['z', 's', 'x', 'd', 'c', 'v', 'g', 'b', 'h', 'n', 'j', 'm'];

/// Keys for octave 4, in pitch order C..B.
pub const UPPER_ROW: [char; 12] = ['q', '2', 'w', '3', 'e', 'r', '5', 't', '6', 'y', '7', 'u'];

/// Note played by `key`. Case-insensitive. `None` if the key is unmapped.
pub fn note_for_key(key: char) -> Option<Note> {
    let key = key.to_ascii_lowercase();
    [LOWER_ROW, UPPER_ROW].iter().zip(LOWEST_OCTAVE..).find_map(|(row, octave)| {
        row.iter().position(|&k| k == key).map(|i| Note::new(PitchClass::ALL[i], octave))
    })
}

/// Key that plays `note`. `None` for notes off the keyboard.
pub fn key_for_note(note: Note) -> Option<char> {
    let index = note.keyboard_index()?;
    let row = if index < LOWER_ROW.len() { &LOWER_ROW } else { &UPPER_ROW };
    row.get(index % row.len()).copied()
}
