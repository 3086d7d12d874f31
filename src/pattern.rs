//! # Scale Fingering Pattern
//!
//! Lays a seven note scale across the neck three notes per string, starting
//! on the low E string and finishing on the high e string. Each string is
//! searched from the fret of the first note placed on the string below it,
//! so the pattern only ever climbs the neck.
//!
//! The start offset picks which scale degree the pattern begins on. Shifting
//! left or right walks the pattern down or up the neck one degree at a time.
//!
//! ```rust
//! use fretquiz::{Key, ScalePattern};
//!
//! let key = Key::parse("G")?;
//! let pattern = ScalePattern::new(&key, 18);
//! let positions = pattern.positions();
//! assert_eq!(positions.len(), 18);
//! assert_eq!((positions[0].string, positions[0].fret), (6, 3));
//! # Ok::<(), fretquiz::QuizError>(())
//! ```

use crate::error::QuizError;
use crate::fretboard::{Fretboard, Highlight, DEFAULT_MARKER, ROOT_MARKER};
use crate::key::Key;
use crate::note::PitchClass;
use crate::tuning::{pitch_at, Position, STRING_COUNT};

pub const NOTES_PER_STRING: usize = 3;

const SCALE_LENGTH: usize = 7;

/// A scale laid out on the neck from a chosen starting degree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalePattern {
    pitches: [PitchClass; SCALE_LENGTH],
    start_offset: usize,
    fret_count: usize,
}

impl ScalePattern {
    pub fn new(key: &Key, fret_count: usize) -> Self {
        Self {
            pitches: key.pitches(),
            start_offset: 0,
            fret_count,
        }
    }

    pub fn with_start_offset(mut self, offset: usize) -> Self {
        self.start_offset = offset % SCALE_LENGTH;
        self
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    pub fn root(&self) -> PitchClass {
        self.pitches[0]
    }

    pub fn shift_left(&mut self) {
        self.start_offset = (self.start_offset + SCALE_LENGTH - 1) % SCALE_LENGTH;
    }

    pub fn shift_right(&mut self) {
        self.start_offset = (self.start_offset + 1) % SCALE_LENGTH;
    }

    /// Positions of the scale, low E string first.
    ///
    /// Up to 18 positions; fewer if the pattern runs off the end of the
    /// board.
    pub fn positions(&self) -> Vec<Position> {
        layout(&self.pitches, self.start_offset, self.fret_count)
    }

    /// Lays out a player's seven notes with the same fingering rules.
    ///
    /// Returns `None` when fewer than seven notes were given. An eighth
    /// (octave) note is ignored.
    pub fn answer_positions(&self, answer: &[PitchClass]) -> Option<Vec<Position>> {
        let notes: [PitchClass; SCALE_LENGTH] = answer.get(..SCALE_LENGTH)?.try_into().ok()?;
        Some(layout(&notes, self.start_offset, self.fret_count))
    }

    /// Draw the pattern, roots as `R` and the rest as `x`.
    ///
    /// With an answer, the player's notes are drawn first and the correct
    /// pattern on top. When `color` is set, correct positions are green and
    /// positions only the player chose are red.
    pub fn render(&self, answer: Option<&[PitchClass]>, color: bool) -> Result<String, QuizError> {
        let mut board = Fretboard::new(self.fret_count)?;
        let root = self.root();

        let player = answer
            .and_then(|notes| self.answer_positions(notes))
            .unwrap_or_default();
        let correct = self.positions();

        for position in player.iter().chain(correct.iter()) {
            board.mark_position(*position, marker_for(*position, root))?;
        }

        if !color {
            return Ok(board.render());
        }

        let mut highlights: Vec<(Position, Highlight)> = player
            .iter()
            .filter(|position| !correct.contains(position))
            .map(|position| (*position, Highlight::Wrong))
            .collect();
        highlights.extend(correct.iter().map(|position| (*position, Highlight::Correct)));

        Ok(board.render_highlighted(&highlights))
    }
}

fn marker_for(position: Position, root: PitchClass) -> char {
    if position.pitch() == Some(root) {
        ROOT_MARKER
    } else {
        DEFAULT_MARKER
    }
}

fn layout(notes: &[PitchClass; SCALE_LENGTH], start_offset: usize, fret_count: usize) -> Vec<Position> {
    let mut positions = Vec::with_capacity(STRING_COUNT * NOTES_PER_STRING);
    let mut degree = start_offset;
    let mut min_fret = 0;

    for string in (1..=STRING_COUNT).rev() {
        let mut placed = 0;
        let mut first_fret = None;

        for fret in min_fret..=fret_count {
            if pitch_at(string, fret) != Some(notes[degree % SCALE_LENGTH]) {
                continue;
            }
            positions.push(Position::new(string, fret));
            first_fret.get_or_insert(fret);
            degree += 1;
            placed += 1;
            if placed == NOTES_PER_STRING {
                break;
            }
        }

        if let Some(fret) = first_fret {
            min_fret = fret;
        }
    }

    tracing::trace!(start_offset, placed = positions.len(), "laid out scale pattern");
    positions
}
