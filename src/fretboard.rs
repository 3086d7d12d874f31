//! # Fretboard Grid
//!
//! A text diagram of a six-string neck that can be marked and printed.
//!
//! ## Layout
//! ```text
//! e ||---+---+---+---+---+---+---+---+---+---+---+---+--
//!   ||   |   |   |   |   |   |   |   |   |   |   |   |
//! B ||---|---|---|---|---|---|---|---|---|---|---|---|--
//!   ...
//! E ||---+---+---+---+---+---+---+---+---+---+---+---+--
//! ```
//!
//! Each string takes two rows: its string line, then a spacer row that
//! carries the inlay dots. Marks go on the string line:
//! - row `(string - 1) * 2`
//! - column `2` for fret 0 (on the nut), otherwise `1 + 4 * fret` (the
//!   middle of the fret cell)
//!
//! ## Templates
//! The 12- and 18-fret templates are immutable constants. Every
//! [`Fretboard`] owns a fresh copy of its template, so marking one board can
//! never leak into the next.
//!
//! ## Example
//! ```rust
//! use fretquiz::Fretboard;
//!
//! let mut board = Fretboard::new(12)?;
//! board.mark(6, 0, 'x')?.mark(6, 3, 'R')?;
//! let text = board.render();
//! assert!(text.lines().nth(10).unwrap().starts_with("E o|---+---+-R-+"));
//! # Ok::<(), fretquiz::QuizError>(())
//! ```

use std::collections::HashMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::error::QuizError;
use crate::tuning::{Position, STRING_COUNT};

/// Marker that turns into [`OPEN_MARKER`] on fret 0
pub const DEFAULT_MARKER: char = 'x';

/// What the default marker renders as on an open string
pub const OPEN_MARKER: char = 'o';

/// Marker for scale roots
pub const ROOT_MARKER: char = 'R';

const EMPTY_FRETBOARD_12: [&str; 11] = [
    "e ||---+---+---+---+---+---+---+---+---+---+---+---+--",
    "  ||   |   |   |   |   |   |   |   |   |   |   |   |",
    "B ||---|---|---|---|---|---|---|---|---|---|---|---|--",
    "  ||   |   |   |   |   |   |   |   |   |   |   | . |",
    "G ||---|---|---|---|---|---|---|---|---|---|---|---|--",
    "  ||   |   | . |   | . |   | . |   | . |   |   |   |",
    "D ||---|---|---|---|---|---|---|---|---|---|---|---|--",
    "  ||   |   |   |   |   |   |   |   |   |   |   | . |",
    "A ||---|---|---|---|---|---|---|---|---|---|---|---|--",
    "  ||   |   |   |   |   |   |   |   |   |   |   |   |",
    "E ||---+---+---+---+---+---+---+---+---+---+---+---+--",
];

const EMPTY_FRETBOARD_18: [&str; 11] = [
    "e ||---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+--",
    "  ||   |   |   |   |   |   |   |   |   |   |   |   |   |   |   |   |   |   |",
    "B ||---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|--",
    "  ||   |   |   |   |   |   |   |   |   |   |   | . |   |   |   |   |   |   |",
    "G ||---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|--",
    "  ||   |   | . |   | . |   | . |   | . |   |   |   |   |   | . |   | . |   | .",
    "D ||---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|--",
    "  ||   |   |   |   |   |   |   |   |   |   |   | . |   |   |   |   |   |   |",
    "A ||---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|---|--",
    "  ||   |   |   |   |   |   |   |   |   |   |   |   |   |   |   |   |   |   |",
    "E ||---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+--",
];

/// How a marked cell is coloured by [`Fretboard::render_highlighted()`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Green
    Correct,
    /// Red
    Wrong,
}

/// A markable fretboard diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fretboard {
    grid: Vec<Vec<char>>,
    fret_count: usize,
}

impl Fretboard {
    /// Create an empty board with 12 or 18 frets.
    ///
    /// # Errors
    /// [`QuizError::UnsupportedFretCountError`] for any other size.
    pub fn new(fret_count: usize) -> Result<Self, QuizError> {
        let template: &[&str] = match fret_count {
            12 => &EMPTY_FRETBOARD_12,
            18 => &EMPTY_FRETBOARD_18,
            other => return Err(QuizError::UnsupportedFretCountError(other)),
        };

        Ok(Self {
            grid: template.iter().map(|row| row.chars().collect()).collect(),
            fret_count,
        })
    }

    pub fn fret_count(&self) -> usize {
        self.fret_count
    }

    /// Row and column of the marker cell for a position on the board
    fn cell(string: usize, fret: usize) -> (usize, usize) {
        let row = (string - 1) * 2;
        let col = if fret == 0 { 2 } else { 1 + fret * 4 };
        (row, col)
    }

    fn check(&self, string: usize, fret: usize) -> Result<(usize, usize), QuizError> {
        if !(1..=STRING_COUNT).contains(&string) || fret > self.fret_count {
            return Err(QuizError::PositionOutOfRangeError {
                string,
                fret,
                fret_count: self.fret_count,
            });
        }
        Ok(Self::cell(string, fret))
    }

    /// Put `marker` on a position. Returns `&mut Self` so marks can be chained.
    ///
    /// The default marker `x` on fret 0 is drawn as `o`; any other marker, or
    /// any other fret, is drawn literally.
    ///
    /// # Errors
    /// [`QuizError::PositionOutOfRangeError`] if `string` is outside 1..=6 or
    /// `fret` is past the last fret.
    pub fn mark(&mut self, string: usize, fret: usize, marker: char) -> Result<&mut Self, QuizError> {
        let (row, col) = self.check(string, fret)?;
        let glyph = if fret == 0 && marker == DEFAULT_MARKER {
            OPEN_MARKER
        } else {
            marker
        };
        self.grid[row][col] = glyph;
        Ok(self)
    }

    pub fn mark_position(&mut self, position: Position, marker: char) -> Result<&mut Self, QuizError> {
        self.mark(position.string, position.fret, marker)
    }

    /// The character currently drawn at a position
    pub fn glyph_at(&self, string: usize, fret: usize) -> Option<char> {
        let (row, col) = self.check(string, fret).ok()?;
        self.grid.get(row)?.get(col).copied()
    }

    /// Rows joined with newlines
    pub fn render(&self) -> String {
        self.grid
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Like [`render()`](Self::render), with ANSI colour on highlighted cells.
    ///
    /// If a position appears more than once, the last highlight wins.
    /// Positions off the board are ignored.
    pub fn render_highlighted(&self, highlights: &[(Position, Highlight)]) -> String {
        let colors: HashMap<(usize, usize), Highlight> = highlights
            .iter()
            .filter_map(|(position, highlight)| {
                self.check(position.string, position.fret)
                    .ok()
                    .map(|cell| (cell, *highlight))
            })
            .collect();

        self.grid
            .iter()
            .enumerate()
            .map(|(row, chars)| {
                chars
                    .iter()
                    .enumerate()
                    .map(|(col, ch)| match colors.get(&(row, col)) {
                        Some(Highlight::Correct) => ch.green().to_string(),
                        Some(Highlight::Wrong) => ch.red().to_string(),
                        None => ch.to_string(),
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Fretboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
