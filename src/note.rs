//! # Note/Pitch Model
//!
//! Chromatic index arithmetic and the enharmonic name tables.
//!
//! ## Key Concepts
//!
//! ### Pitch Class
//! A [`PitchClass`] is a chromatic index 0-11 (0 = C ... 11 = B). Arithmetic
//! on it is always modulo 12, so transposing B up a semitone gives C.
//!
//! ### Enharmonic Table
//! Note names map many-to-one onto pitch classes: `D#` and `Eb` are both 3.
//! Name → index is a plain lookup in [`index_of()`]. Index → name needs a
//! spelling preference, which [`name_of()`] takes as a `use_flats` flag and
//! [`Spelling`] generalises to the extended tables used by keys with six or
//! seven accidentals (`E#`, `B#`, `Cb`, `Fb`).
//!
//! ## Example
//! ```rust
//! use fretquiz::note::{index_of, name_of};
//!
//! let eb = index_of("Eb")?;
//! assert_eq!(eb, index_of("D#")?);
//! assert_eq!(name_of(eb, true), "Eb");
//! assert_eq!(name_of(eb, false), "D#");
//! # Ok::<(), fretquiz::QuizError>(())
//! ```

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::QuizError;

/// Chromatic index of a pitch within one octave (0 = C, 11 = B)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Build a pitch class, reducing the index modulo 12
    pub fn new(index: u8) -> Self {
        Self(index % 12)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Move up by `semitones`, wrapping at the octave
    pub fn transpose(self, semitones: u8) -> Self {
        Self::new(((self.0 as u16 + semitones as u16) % 12) as u8)
    }

    /// All twelve pitch classes in ascending order from C
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12).map(PitchClass)
    }

    /// True for the five indices that need an accidental (C#/Db, D#/Eb, ...)
    pub fn is_black_key(self) -> bool {
        matches!(self.0, 1 | 3 | 6 | 8 | 10)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SHARP_NAMES[self.0 as usize])
    }
}

/// Standard chromatic spelling with sharps
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Standard chromatic spelling with flats
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Sharp spelling for keys with six or seven sharps (B# and E# replace C and F)
pub const SHARP_NAMES_EXTENDED: [&str; 12] = [
    "B#", "C#", "D", "D#", "E", "E#", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spelling for keys with six or seven flats (Fb and Cb replace E and B)
pub const FLAT_NAMES_EXTENDED: [&str; 12] = [
    "C", "Db", "D", "Eb", "Fb", "F", "Gb", "G", "Ab", "A", "Bb", "Cb",
];

/// Every accepted note name with its chromatic index
const ENHARMONIC_NAMES: [(&str, u8); 21] = [
    ("C", 0),
    ("B#", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("Fb", 4),
    ("F", 5),
    ("E#", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
    ("Cb", 11),
];

/// Name → pitch class lookup, built once on first use and never mutated.
static ENHARMONIC_TABLE: Lazy<BTreeMap<&'static str, PitchClass>> = Lazy::new(|| {
    ENHARMONIC_NAMES
        .iter()
        .map(|&(name, index)| (name, PitchClass(index)))
        .collect()
});

/// Which chromatic name table to spell with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    Sharps,
    Flats,
    ExtendedSharps,
    ExtendedFlats,
}

impl Spelling {
    fn table(self) -> &'static [&'static str; 12] {
        match self {
            Spelling::Sharps => &SHARP_NAMES,
            Spelling::Flats => &FLAT_NAMES,
            Spelling::ExtendedSharps => &SHARP_NAMES_EXTENDED,
            Spelling::ExtendedFlats => &FLAT_NAMES_EXTENDED,
        }
    }

    pub fn name(self, pitch: PitchClass) -> &'static str {
        self.table()[pitch.index() as usize]
    }

    pub fn uses_flats(self) -> bool {
        matches!(self, Spelling::Flats | Spelling::ExtendedFlats)
    }
}

/// Convert a note name to its pitch class.
///
/// Lookup is case-sensitive: `"Bb"` is B flat, `"bb"` is rejected. Use
/// [`parse_user_note()`] for player input.
///
/// # Errors
/// Returns [`QuizError::UnknownNoteError`] if the name is not in the table.
pub fn index_of(name: &str) -> Result<PitchClass, QuizError> {
    ENHARMONIC_TABLE
        .get(name)
        .copied()
        .ok_or_else(|| QuizError::UnknownNoteError(name.to_string()))
}

/// Spell a pitch class. Natural notes ignore `use_flats`.
pub fn name_of(pitch: PitchClass, use_flats: bool) -> &'static str {
    if use_flats {
        Spelling::Flats.name(pitch)
    } else {
        Spelling::Sharps.name(pitch)
    }
}

/// All note names the enharmonic table accepts
pub fn note_names() -> impl Iterator<Item = &'static str> {
    ENHARMONIC_NAMES.iter().map(|&(name, _)| name)
}

/// Normalise a player-typed token ("f#", "bb", "EB") to its table spelling.
///
/// The letter is upper-cased and a second character of `#` or `b` (either
/// case) is kept as the accidental.
pub fn canonical_name(token: &str) -> Option<String> {
    let mut chars = token.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !('A'..='G').contains(&letter) {
        return None;
    }

    let mut name = letter.to_string();
    match chars.next() {
        None => {}
        Some('#') => name.push('#'),
        Some('b') | Some('B') => name.push('b'),
        Some(_) => return None,
    }

    if chars.next().is_some() {
        return None;
    }
    Some(name)
}

/// Parse a player-typed note into a pitch class
///
/// # Errors
/// Returns [`QuizError::UnknownNoteError`] carrying the original token.
pub fn parse_user_note(token: &str) -> Result<PitchClass, QuizError> {
    canonical_name(token)
        .and_then(|name| ENHARMONIC_TABLE.get(name.as_str()).copied())
        .ok_or_else(|| QuizError::UnknownNoteError(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of_naturals() {
        let expected = [("C", 0), ("D", 2), ("E", 4), ("F", 5), ("G", 7), ("A", 9), ("B", 11)];
        for (name, index) in expected {
            assert_eq!(index_of(name).unwrap().index(), index, "{}", name);
        }
    }

    #[test]
    fn test_index_of_enharmonics() {
        assert_eq!(index_of("C#").unwrap(), index_of("Db").unwrap());
        assert_eq!(index_of("E#").unwrap(), index_of("F").unwrap());
        assert_eq!(index_of("B#").unwrap(), PitchClass::C);
        assert_eq!(index_of("Cb").unwrap().index(), 11);
        assert_eq!(index_of("Fb").unwrap().index(), 4);
    }

    #[test]
    fn test_index_of_unknown() {
        let result = index_of("H");
        assert!(matches!(result, Err(QuizError::UnknownNoteError(ref n)) if n == "H"));
        // Lookup is case-sensitive
        assert!(index_of("bb").is_err());
        assert!(index_of("").is_err());
    }

    #[test]
    fn test_name_of_respects_preference() {
        let ab = PitchClass::new(8);
        assert_eq!(name_of(ab, true), "Ab");
        assert_eq!(name_of(ab, false), "G#");
        // Naturals ignore the flag
        assert_eq!(name_of(PitchClass::new(4), true), "E");
        assert_eq!(name_of(PitchClass::new(4), false), "E");
    }

    #[test]
    fn test_name_of_round_trips_every_index() {
        for pitch in PitchClass::all() {
            for use_flats in [false, true] {
                assert_eq!(index_of(name_of(pitch, use_flats)).unwrap(), pitch);
            }
        }
    }

    #[test]
    fn test_every_table_name_round_trips_enharmonically() {
        for name in note_names() {
            let pitch = index_of(name).unwrap();
            assert_eq!(index_of(name_of(pitch, false)).unwrap(), pitch);
            assert_eq!(index_of(name_of(pitch, true)).unwrap(), pitch);
        }
        assert_eq!(note_names().count(), 21);
    }

    #[test]
    fn test_transpose_wraps() {
        assert_eq!(PitchClass::new(11).transpose(1), PitchClass::C);
        assert_eq!(PitchClass::new(9).transpose(7).index(), 4);
        assert_eq!(PitchClass::new(14).index(), 2);
    }

    #[test]
    fn test_black_keys() {
        let black: Vec<u8> = PitchClass::all().filter(|p| p.is_black_key()).map(|p| p.index()).collect();
        assert_eq!(black, vec![1, 3, 6, 8, 10]);
    }

    #[test]
    fn test_extended_spellings() {
        assert_eq!(Spelling::ExtendedSharps.name(PitchClass::new(5)), "E#");
        assert_eq!(Spelling::ExtendedSharps.name(PitchClass::C), "B#");
        assert_eq!(Spelling::ExtendedFlats.name(PitchClass::new(11)), "Cb");
        assert_eq!(Spelling::ExtendedFlats.name(PitchClass::new(4)), "Fb");
        assert!(Spelling::ExtendedFlats.uses_flats());
        assert!(!Spelling::ExtendedSharps.uses_flats());
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("f#").as_deref(), Some("F#"));
        assert_eq!(canonical_name("bb").as_deref(), Some("Bb"));
        assert_eq!(canonical_name("EB").as_deref(), Some("Eb"));
        assert_eq!(canonical_name(" c ").as_deref(), Some("C"));
        assert_eq!(canonical_name("h"), None);
        assert_eq!(canonical_name("c##"), None);
        assert_eq!(canonical_name("cx"), None);
        assert_eq!(canonical_name(""), None);
    }

    #[test]
    fn test_parse_user_note() {
        assert_eq!(parse_user_note("d#").unwrap(), parse_user_note("eb").unwrap());
        assert_eq!(parse_user_note("b").unwrap().index(), 11);
        assert_eq!(parse_user_note("bb").unwrap().index(), 10);
        assert!(matches!(parse_user_note("x"), Err(QuizError::UnknownNoteError(ref t)) if t == "x"));
    }
}
