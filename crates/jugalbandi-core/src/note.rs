//! Note tokens.
//!
//! A [`Note`] is a pitch class plus an octave, written `C#4`. The game only
//! ever compares notes for equality; the keyboard layout (octaves 3 and 4,
//! 24 keys) is a property of the frontends, exposed here so they agree on it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::NoteParseError;

/// Lowest octave on the playable keyboard.
pub const LOWEST_OCTAVE: u8 = 3;

/// Highest octave on the playable keyboard.
pub const HIGHEST_OCTAVE: u8 = 4;

/// Number of keys on the playable keyboard.
pub const KEYBOARD_SIZE: usize =
    PitchClass::ALL.len() * (HIGHEST_OCTAVE - LOWEST_OCTAVE + 1) as usize;

/// One of the twelve chromatic pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    /// C
    C,
    /// C sharp
    CSharp,
    /// D
    D,
    /// D sharp
    DSharp,
    /// E
    E,
    /// F
    F,
    /// F sharp
    FSharp,
    /// G
    G,
    /// G sharp
    GSharp,
    /// A
    A,
    /// A sharp
    ASharp,
    /// B
    B,
}

impl PitchClass {
    /// All pitch classes in ascending order.
    pub const ALL: [Self; 12] = [
        Self::C,
        Self::CSharp,
        Self::D,
        Self::DSharp,
        Self::E,
        Self::F,
        Self::FSharp,
        Self::G,
        Self::GSharp,
        Self::A,
        Self::ASharp,
        Self::B,
    ];

    /// Name as written on the key (`C`, `C#`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::CSharp => "C#",
            Self::D => "D",
            Self::DSharp => "D#",
            Self::E => "E",
            Self::F => "F",
            Self::FSharp => "F#",
            Self::G => "G",
            Self::GSharp => "G#",
            Self::A => "A",
            Self::ASharp => "A#",
            Self::B => "B",
        }
    }

    /// Black key on a piano.
    pub fn is_sharp(self) -> bool {
        matches!(self, Self::CSharp | Self::DSharp | Self::FSharp | Self::GSharp | Self::ASharp)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// A playable note token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note {
    /// Pitch class.
    pub pitch: PitchClass,
    /// Octave number.
    pub octave: u8,
}

impl Note {
    /// Create a note.
    pub const fn new(pitch: PitchClass, octave: u8) -> Self {
        Self { pitch, octave }
    }

    /// All keys of the playable keyboard, lowest first.
    pub fn keyboard() -> impl Iterator<Item = Self> {
        (LOWEST_OCTAVE..=HIGHEST_OCTAVE).flat_map(|octave| {
            PitchClass::ALL.into_iter().map(move |pitch| Self::new(pitch, octave))
        })
    }

    /// Position on the playable keyboard. `None` if the note is off the
    /// keyboard.
    pub fn keyboard_index(self) -> Option<usize> {
        if !(LOWEST_OCTAVE..=HIGHEST_OCTAVE).contains(&self.octave) {
            return None;
        }
        let pitch = PitchClass::ALL.iter().position(|p| *p == self.pitch)?;
        Some(usize::from(self.octave - LOWEST_OCTAVE) * PitchClass::ALL.len() + pitch)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch.name(), self.octave)
    }
}

impl FromStr for Note {
    type Err = NoteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| NoteParseError::MissingOctave(s.to_string()))?;
        let (name, octave) = s.split_at(split);

        let pitch = PitchClass::from_name(name)
            .ok_or_else(|| NoteParseError::UnknownPitch(name.to_string()))?;
        let octave =
            octave.parse::<u8>().map_err(|_| NoteParseError::InvalidOctave(octave.to_string()))?;

        Ok(Self::new(pitch, octave))
    }
}

impl TryFrom<String> for Note {
    type Error = NoteParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}
