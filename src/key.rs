//! # Keys and Scale Generation
//!
//! A [`Key`] is a root note plus a [`Mode`]. It yields the seven notes of its
//! major or natural minor scale, spelled the way the key signature spells
//! them.
//!
//! ## Scale Patterns
//! - Major: W-W-H-W-W-W-H (offsets 0, 2, 4, 5, 7, 9, 11)
//! - Natural minor: W-H-W-W-H-W-W (offsets 0, 2, 3, 5, 7, 8, 10)
//!
//! ## Spelling
//! Whether a key uses sharps or flats is a notational convention, not a pitch
//! fact, so it is read from the circle-of-fifths table below rather than
//! computed. Keys with six or seven accidentals spell with the extended tables
//! so that every letter appears exactly once (F# major has E#, Gb major has
//! Cb).
//!
//! ## Example
//! ```rust
//! use fretquiz::Key;
//!
//! let scale = Key::parse("Dmin")?.scale();
//! assert_eq!(scale.notes, ["D", "E", "F", "G", "A", "Bb", "C"]);
//! assert!(scale.use_flats);
//! # Ok::<(), fretquiz::QuizError>(())
//! ```

use std::fmt;

use crate::error::QuizError;
use crate::note::{index_of, PitchClass, Spelling};

/// Major (Ionian) or natural minor (Aeolian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    /// Whole/half steps between consecutive degrees, ending back at the octave
    pub fn steps(self) -> [u8; 7] {
        match self {
            Mode::Major => MAJOR_STEPS,
            Mode::Minor => MINOR_STEPS,
        }
    }

    /// Semitone offset of each degree from the root
    pub fn offsets(self) -> [u8; 7] {
        let mut offsets = [0u8; 7];
        let mut total = 0;
        for (offset, step) in offsets.iter_mut().zip(self.steps()) {
            *offset = total;
            total += step;
        }
        offsets
    }
}

/// Major scale pattern: W-W-H-W-W-W-H
pub const MAJOR_STEPS: [u8; 7] = [2, 2, 1, 2, 2, 2, 1];

/// Natural minor scale pattern: W-H-W-W-H-W-W
pub const MINOR_STEPS: [u8; 7] = [2, 1, 2, 2, 1, 2, 2];

/// Order in which sharps are added to a key signature
pub const ORDER_OF_SHARPS: [&str; 7] = ["F", "C", "G", "D", "A", "E", "B"];

/// Order in which flats are added to a key signature
pub const ORDER_OF_FLATS: [&str; 7] = ["B", "E", "A", "D", "G", "C", "F"];

/// Circle of fifths: root, mode, and signature
/// (positive = number of sharps, negative = number of flats)
const KEY_SIGNATURES: [(&str, Mode, i8); 30] = [
    ("C", Mode::Major, 0),
    ("G", Mode::Major, 1),
    ("D", Mode::Major, 2),
    ("A", Mode::Major, 3),
    ("E", Mode::Major, 4),
    ("B", Mode::Major, 5),
    ("F#", Mode::Major, 6),
    ("C#", Mode::Major, 7),
    ("F", Mode::Major, -1),
    ("Bb", Mode::Major, -2),
    ("Eb", Mode::Major, -3),
    ("Ab", Mode::Major, -4),
    ("Db", Mode::Major, -5),
    ("Gb", Mode::Major, -6),
    ("Cb", Mode::Major, -7),
    ("A", Mode::Minor, 0),
    ("E", Mode::Minor, 1),
    ("B", Mode::Minor, 2),
    ("F#", Mode::Minor, 3),
    ("C#", Mode::Minor, 4),
    ("G#", Mode::Minor, 5),
    ("D#", Mode::Minor, 6),
    ("A#", Mode::Minor, 7),
    ("D", Mode::Minor, -1),
    ("G", Mode::Minor, -2),
    ("C", Mode::Minor, -3),
    ("F", Mode::Minor, -4),
    ("Bb", Mode::Minor, -5),
    ("Eb", Mode::Minor, -6),
    ("Ab", Mode::Minor, -7),
];

/// Catalogued root spelling and signature of a key, if it has a standard one
fn signature_of(root: &str, mode: Mode) -> Option<(&'static str, i8)> {
    KEY_SIGNATURES
        .iter()
        .find(|(r, m, _)| *r == root && *m == mode)
        .map(|&(root, _, fifths)| (root, fifths))
}

/// The seven notes of a key, degree 1 through 7
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    pub notes: [String; 7],
    pub use_flats: bool,
}

impl Scale {
    /// Lowercase, space-separated: the form players type
    pub fn format_answer(&self) -> String {
        self.notes
            .iter()
            .map(|n| n.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A key with a standard key signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    root: &'static str,
    root_pitch: PitchClass,
    mode: Mode,
    fifths: i8,
}

impl Key {
    /// Build a key from a root name and mode.
    ///
    /// # Errors
    /// [`QuizError::InvalidKeySpecError`] if the root is not a note name or
    /// the root/mode pair has no standard key signature (e.g. G# major).
    pub fn new(root: &str, mode: Mode) -> Result<Self, QuizError> {
        let spec = match mode {
            Mode::Major => root.to_string(),
            Mode::Minor => format!("{}min", root),
        };

        let root_pitch = index_of(root).map_err(|e| QuizError::InvalidKeySpecError {
            spec: spec.clone(),
            reason: e.to_string(),
        })?;

        let (root, fifths) = signature_of(root, mode).ok_or_else(|| QuizError::InvalidKeySpecError {
            spec: spec.clone(),
            reason: "no standard key signature for this key".to_string(),
        })?;

        tracing::trace!(key = %spec, fifths, "resolved key signature");
        Ok(Self {
            root,
            root_pitch,
            mode,
            fifths,
        })
    }

    /// Parse a key spec: a root note name, optionally followed by `min`
    /// (or `m`) for natural minor. Examples: `"C"`, `"Amin"`, `"F#"`, `"Bbm"`.
    pub fn parse(spec: &str) -> Result<Self, QuizError> {
        let trimmed = spec.trim();
        let (root, mode) = if let Some(root) = trimmed.strip_suffix("min") {
            (root, Mode::Minor)
        } else if let Some(root) = trimmed.strip_suffix('m') {
            (root, Mode::Minor)
        } else {
            (trimmed, Mode::Major)
        };

        if root.is_empty() {
            return Err(QuizError::InvalidKeySpecError {
                spec: spec.to_string(),
                reason: "missing root note".to_string(),
            });
        }

        Self::new(root, mode).map_err(|e| match e {
            QuizError::InvalidKeySpecError { reason, .. } => QuizError::InvalidKeySpecError {
                spec: spec.to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Every key with a standard signature, majors first, sharps before flats
    pub fn catalog() -> impl Iterator<Item = Key> {
        KEY_SIGNATURES.iter().filter_map(|&(root, mode, fifths)| {
            let root_pitch = index_of(root).ok()?;
            Some(Key {
                root,
                root_pitch,
                mode,
                fifths,
            })
        })
    }

    /// Canonical spec string: `"F#"`, `"Dmin"`
    pub fn name(&self) -> String {
        match self.mode {
            Mode::Major => self.root.to_string(),
            Mode::Minor => format!("{}min", self.root),
        }
    }

    pub fn root(&self) -> &'static str {
        self.root
    }

    pub fn root_pitch(&self) -> PitchClass {
        self.root_pitch
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn use_flats(&self) -> bool {
        self.fifths < 0
    }

    /// Number of sharps or flats in the signature
    pub fn accidental_count(&self) -> u8 {
        self.fifths.unsigned_abs()
    }

    /// Letters carrying a sharp or flat, in signature order
    pub fn accidental_letters(&self) -> &'static [&'static str] {
        let count = self.accidental_count() as usize;
        if self.use_flats() {
            &ORDER_OF_FLATS[..count]
        } else {
            &ORDER_OF_SHARPS[..count]
        }
    }

    /// Signature summary for a question: `"1 sharp: F"`, `"3 flats: B E A"`
    pub fn describe_accidentals(&self) -> String {
        let count = self.accidental_count();
        if count == 0 {
            return "no sharps or flats".to_string();
        }

        let kind = match (self.use_flats(), count > 1) {
            (true, true) => "flats",
            (true, false) => "flat",
            (false, true) => "sharps",
            (false, false) => "sharp",
        };
        format!("{} {}: {}", count, kind, self.accidental_letters().join(" "))
    }

    fn spelling(&self) -> Spelling {
        match (self.use_flats(), self.accidental_count() >= 6) {
            (true, true) => Spelling::ExtendedFlats,
            (true, false) => Spelling::Flats,
            (false, true) => Spelling::ExtendedSharps,
            (false, false) => Spelling::Sharps,
        }
    }

    /// Pitch class of each scale degree
    pub fn pitches(&self) -> [PitchClass; 7] {
        self.mode
            .offsets()
            .map(|offset| self.root_pitch.transpose(offset))
    }

    /// Derive the seven scale notes
    pub fn scale(&self) -> Scale {
        let spelling = self.spelling();
        let notes = self.pitches().map(|p| spelling.name(p).to_string());
        tracing::debug!(key = %self.name(), ?notes, "derived scale");
        Scale {
            notes,
            use_flats: self.use_flats(),
        }
    }

    /// True if the root/mode pair has a standard key signature
    pub fn is_standard(root: &str, mode: Mode) -> bool {
        signature_of(root, mode).is_some()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
