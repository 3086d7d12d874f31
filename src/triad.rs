//! # Triads and Inversions
//!
//! A [`Triad`] is a root plus a [`Quality`]; its three pitch classes sit at
//! fixed semitone offsets from the root (0, 4, 7 for major; 0, 3, 7 for
//! minor). A triad never changes after construction. An [`Inversion`] is a
//! view: a left rotation of the note order that decides which chord tone is
//! lowest.
//!
//! ```text
//! inversion 0 (no-inversion):  root  third fifth
//! inversion 1 (1st-inversion): third fifth root
//! inversion 2 (2nd-inversion): fifth root  third
//! ```
//!
//! ## Spelling
//! Note names come from the scale of the key sharing the triad's root and
//! quality (degrees 1, 3, 5), so G minor is `G Bb D` and C# major is
//! `C# E# G#`. Roots without a standard key (G# major, Db minor) keep the root
//! as written and spell the rest with flats if the root is flat, else sharps.
//! `Fb` and `Cb` roots take `Fb`/`Cb` spellings too, so Fb major is
//! `Fb Ab Cb`.
//!
//! ## Answer Matching
//! Answers are compared by pitch class, not text, so `"d# g a#"` is accepted
//! for E flat major.
//!
//! ## Example
//! ```rust
//! use fretquiz::{Inversion, Triad};
//!
//! let triad = Triad::parse("C major")?;
//! assert_eq!(triad.note_names(Inversion::First), ["E", "G", "C"]);
//! assert_eq!(triad.format_answer(Inversion::Root), "c e g");
//! # Ok::<(), fretquiz::QuizError>(())
//! ```

use std::fmt;

use crate::error::QuizError;
use crate::key::{Key, Mode};
use crate::note::{index_of, parse_user_note, PitchClass, Spelling};

/// Major triad intervals from the root, in semitones
pub const MAJOR_TRIAD_INTERVALS: [u8; 3] = [0, 4, 7];

/// Minor triad intervals from the root, in semitones
pub const MINOR_TRIAD_INTERVALS: [u8; 3] = [0, 3, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quality {
    #[default]
    Major,
    Minor,
}

impl Quality {
    pub fn intervals(self) -> [u8; 3] {
        match self {
            Quality::Major => MAJOR_TRIAD_INTERVALS,
            Quality::Minor => MINOR_TRIAD_INTERVALS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quality::Major => "major",
            Quality::Minor => "minor",
        }
    }

    /// The scale mode whose degrees 1, 3, 5 form this triad
    pub fn mode(self) -> Mode {
        match self {
            Quality::Major => Mode::Major,
            Quality::Minor => Mode::Minor,
        }
    }
}

/// Which chord tone is lowest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Inversion {
    #[default]
    Root,
    First,
    Second,
}

impl Inversion {
    pub const ALL: [Inversion; 3] = [Inversion::Root, Inversion::First, Inversion::Second];

    /// Number of positions the canonical order is rotated left
    pub fn rotation(self) -> usize {
        match self {
            Inversion::Root => 0,
            Inversion::First => 1,
            Inversion::Second => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Inversion::Root => "no-inversion",
            Inversion::First => "1st-inversion",
            Inversion::Second => "2nd-inversion",
        }
    }

    /// The next inversion; three steps return to the start
    pub fn next(self) -> Self {
        match self {
            Inversion::Root => Inversion::First,
            Inversion::First => Inversion::Second,
            Inversion::Second => Inversion::Root,
        }
    }
}

impl TryFrom<u8> for Inversion {
    type Error = QuizError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Inversion::Root),
            1 => Ok(Inversion::First),
            2 => Ok(Inversion::Second),
            other => Err(QuizError::InvalidInversionError(other)),
        }
    }
}

impl fmt::Display for Inversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn rotate<T: Clone>(items: &[T; 3], inversion: Inversion) -> [T; 3] {
    let mut rotated = items.clone();
    rotated.rotate_left(inversion.rotation());
    rotated
}

/// A major or minor triad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triad {
    root: String,
    quality: Quality,
    indices: [PitchClass; 3],
    names: [String; 3],
}

impl Triad {
    /// Build a triad on `root`.
    ///
    /// # Errors
    /// [`QuizError::UnknownNoteError`] if `root` is not a note name.
    pub fn new(root: &str, quality: Quality) -> Result<Self, QuizError> {
        let root_pitch = index_of(root)?;
        let indices = quality.intervals().map(|i| root_pitch.transpose(i));
        let names = spell(root, quality, &indices);

        Ok(Self {
            root: root.to_string(),
            quality,
            indices,
            names,
        })
    }

    pub fn major(root: &str) -> Result<Self, QuizError> {
        Self::new(root, Quality::Major)
    }

    pub fn minor(root: &str) -> Result<Self, QuizError> {
        Self::new(root, Quality::Minor)
    }

    /// Parse a spec like `"C major"`, `"Bb minor"` (extra whitespace allowed,
    /// quality is case-insensitive).
    pub fn parse(spec: &str) -> Result<Self, QuizError> {
        let invalid = |reason: String| QuizError::InvalidTriadSpecError {
            spec: spec.to_string(),
            reason,
        };

        let parts: Vec<&str> = spec.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(invalid("expected '<root> major' or '<root> minor'".to_string()));
        }

        let quality = match parts[1].to_lowercase().as_str() {
            "major" => Quality::Major,
            "minor" => Quality::Minor,
            other => return Err(invalid(format!("Invalid quality: {}", other))),
        };

        Self::new(parts[0], quality).map_err(|e| invalid(e.to_string()))
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn is_major(&self) -> bool {
        self.quality == Quality::Major
    }

    pub fn quality_name(&self) -> &'static str {
        self.quality.name()
    }

    /// Root, third, fifth
    pub fn indices(&self) -> [PitchClass; 3] {
        self.indices
    }

    /// Pitch classes in voicing order for an inversion
    pub fn voicing_pitches(&self, inversion: Inversion) -> [PitchClass; 3] {
        rotate(&self.indices, inversion)
    }

    /// Note names in voicing order for an inversion
    pub fn note_names(&self, inversion: Inversion) -> [&str; 3] {
        let names = [
            self.names[0].as_str(),
            self.names[1].as_str(),
            self.names[2].as_str(),
        ];
        rotate(&names, inversion)
    }

    /// Expected answer text: lowercase voicing names, space-separated
    pub fn format_answer(&self, inversion: Inversion) -> String {
        self.note_names(inversion)
            .iter()
            .map(|n| n.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True if `answer` names the voicing's pitch classes in order.
    ///
    /// Any spelling the enharmonic table knows is accepted, in any letter
    /// case. Unparseable tokens or a token count other than three fail.
    pub fn matches<S: AsRef<str>>(&self, answer: &[S], inversion: Inversion) -> bool {
        if answer.len() != 3 {
            return false;
        }

        let expected = self.voicing_pitches(inversion);
        answer
            .iter()
            .zip(expected)
            .all(|(token, pitch)| parse_user_note(token.as_ref()).map_or(false, |p| p == pitch))
    }

    /// Spec string, `"F# major"`
    pub fn spec(&self) -> String {
        format!("{} {}", self.root, self.quality.name())
    }
}

impl fmt::Display for Triad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.quality.name())
    }
}

fn spell(root: &str, quality: Quality, indices: &[PitchClass; 3]) -> [String; 3] {
    if let Ok(key) = Key::new(root, quality.mode()) {
        let [first, _, third, _, fifth, _, _] = key.scale().notes;
        return [first, third, fifth];
    }

    let spelling = match root {
        "Fb" | "Cb" => Spelling::ExtendedFlats,
        _ if root.ends_with('b') => Spelling::Flats,
        _ => Spelling::Sharps,
    };
    [
        root.to_string(),
        spelling.name(indices[1]).to_string(),
        spelling.name(indices[2]).to_string(),
    ]
}
