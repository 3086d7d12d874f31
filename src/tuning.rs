//! # Standard Tuning
//!
//! String numbering follows guitar convention: string 1 is the highest
//! pitched (high e), string 6 the lowest (low E). Fret 0 is the open string.
//!
//! The pitch at any position is the open string's pitch class plus the fret
//! number, modulo 12.

use std::fmt;

use crate::note::PitchClass;

pub const STRING_COUNT: usize = 6;

/// Open-string pitch classes for strings 1 through 6 (E B G D A E)
pub const STANDARD_TUNING: [u8; STRING_COUNT] = [4, 11, 7, 2, 9, 4];

/// A (string, fret) location on the neck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub string: usize,
    pub fret: usize,
}

impl Position {
    pub fn new(string: usize, fret: usize) -> Self {
        Self { string, fret }
    }

    /// Pitch class sounded at this position, or `None` for a string outside 1..=6
    pub fn pitch(&self) -> Option<PitchClass> {
        pitch_at(self.string, self.fret)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "string {} fret {}", self.string, self.fret)
    }
}

/// Pitch class of an open string
pub fn open_pitch(string: usize) -> Option<PitchClass> {
    if (1..=STRING_COUNT).contains(&string) {
        Some(PitchClass::new(STANDARD_TUNING[string - 1]))
    } else {
        None
    }
}

/// Pitch class at a fretted position
pub fn pitch_at(string: usize, fret: usize) -> Option<PitchClass> {
    open_pitch(string).map(|open| open.transpose((fret % 12) as u8))
}
