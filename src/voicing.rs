//! # Triad Position Finder
//!
//! Places a triad's three voicing notes on three adjacent strings. The
//! default string set is 4, 3, 2 (D, G, B), listed lowest pitched first: the
//! first voicing note goes on string 4, the second on string 3, the third on
//! string 2.
//!
//! ## Search
//! Each string is searched on its own for the lowest fret inside the
//! [`FretWindow`] whose pitch matches its note. Strings are not optimised
//! jointly. If any string has no match in the window the search fails with
//! [`QuizError::NoPositionFoundError`]; that is an ordinary outcome (a narrow
//! window may simply miss) and callers are expected to widen the window and
//! retry, as [`find_position_or_widen()`] does.
//!
//! ## Example
//! ```rust
//! use fretquiz::{FretWindow, Inversion, Triad};
//!
//! let voicing = Triad::parse("A minor")?.find_position(Inversion::Root, FretWindow::default())?;
//! let frets: Vec<usize> = voicing.positions.iter().map(|p| p.fret).collect();
//! assert_eq!(frets, vec![7, 5, 5]);
//! # Ok::<(), fretquiz::QuizError>(())
//! ```

use crate::error::QuizError;
use crate::note::PitchClass;
use crate::triad::{Inversion, Triad};
use crate::tuning::{pitch_at, Position, STRING_COUNT};

/// Strings 4, 3, 2: the D, G and B strings
pub const DEFAULT_TRIAD_STRINGS: [usize; 3] = [4, 3, 2];

// Frets below / above the correct voicing searched first when placing an answer
const ANSWER_SEARCH_BELOW: usize = 3;
const ANSWER_SEARCH_ABOVE: usize = 5;

/// Three distinct strings, lowest pitched first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSet([usize; 3]);

impl StringSet {
    pub fn new(strings: [usize; 3]) -> Result<Self, QuizError> {
        let in_range = strings.iter().all(|s| (1..=STRING_COUNT).contains(s));
        let distinct = strings[0] != strings[1] && strings[1] != strings[2] && strings[0] != strings[2];
        if !in_range || !distinct {
            return Err(QuizError::ConfigError(format!(
                "triad strings must be three distinct strings between 1 and {}, got {:?}",
                STRING_COUNT, strings
            )));
        }
        Ok(Self(strings))
    }

    pub fn strings(&self) -> [usize; 3] {
        self.0
    }
}

impl Default for StringSet {
    fn default() -> Self {
        Self(DEFAULT_TRIAD_STRINGS)
    }
}

/// Inclusive fret range to search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FretWindow {
    pub start_fret: usize,
    pub max_fret: usize,
}

impl FretWindow {
    pub fn new(start_fret: usize, max_fret: usize) -> Self {
        Self { start_fret, max_fret }
    }

    /// The whole board, open strings included
    pub fn full(max_fret: usize) -> Self {
        Self::new(0, max_fret)
    }
}

impl Default for FretWindow {
    fn default() -> Self {
        Self::full(12)
    }
}

/// Three positions in voicing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voicing {
    pub positions: [Position; 3],
}

impl Voicing {
    pub fn min_fret(&self) -> usize {
        self.positions.iter().map(|p| p.fret).min().unwrap_or(0)
    }

    pub fn max_fret(&self) -> usize {
        self.positions.iter().map(|p| p.fret).max().unwrap_or(0)
    }
}

/// Lowest fret in the window where `string` sounds `target`
fn lowest_fret(string: usize, target: PitchClass, window: FretWindow) -> Option<usize> {
    (window.start_fret..=window.max_fret).find(|&fret| pitch_at(string, fret) == Some(target))
}

/// Find a voicing of `triad` on `strings` with every fret inside `window`.
///
/// # Errors
/// [`QuizError::NoPositionFoundError`] naming the first string with no match.
pub fn find_position(
    triad: &Triad,
    inversion: Inversion,
    strings: StringSet,
    window: FretWindow,
) -> Result<Voicing, QuizError> {
    let targets = triad.voicing_pitches(inversion);
    let mut positions = [Position::new(0, 0); 3];

    for ((slot, string), target) in positions.iter_mut().zip(strings.strings()).zip(targets) {
        let fret = lowest_fret(string, target, window).ok_or(QuizError::NoPositionFoundError {
            string,
            start_fret: window.start_fret,
            max_fret: window.max_fret,
        })?;
        *slot = Position::new(string, fret);
    }

    tracing::debug!(triad = %triad, %inversion, ?positions, "found voicing");
    Ok(Voicing { positions })
}

/// Like [`find_position()`], but falls back to the whole board
/// (`0..=fret_count`) when the window has no match.
pub fn find_position_or_widen(
    triad: &Triad,
    inversion: Inversion,
    strings: StringSet,
    window: FretWindow,
    fret_count: usize,
) -> Result<Voicing, QuizError> {
    match find_position(triad, inversion, strings, window) {
        Err(QuizError::NoPositionFoundError { string, .. }) => {
            tracing::warn!(
                triad = %triad,
                string,
                start_fret = window.start_fret,
                max_fret = window.max_fret,
                "no voicing in window, searching the whole board"
            );
            find_position(triad, inversion, strings, FretWindow::full(fret_count))
        }
        other => other,
    }
}

impl Triad {
    /// Voicing on the default strings (4, 3, 2) within `window`
    pub fn find_position(&self, inversion: Inversion, window: FretWindow) -> Result<Voicing, QuizError> {
        find_position(self, inversion, StringSet::default(), window)
    }
}

/// Place a player's three notes on the same strings as the correct voicing.
///
/// Each note is looked for a few frets around `near` first, then anywhere on
/// the board. Returns `None` unless exactly three notes are given and all of
/// them can be placed.
pub fn locate_answer(
    notes: &[PitchClass],
    strings: StringSet,
    near: &Voicing,
    fret_count: usize,
) -> Option<Voicing> {
    if notes.len() != 3 {
        return None;
    }

    let around = FretWindow::new(
        near.min_fret().saturating_sub(ANSWER_SEARCH_BELOW),
        (near.max_fret() + ANSWER_SEARCH_ABOVE).min(fret_count),
    );
    let whole = FretWindow::full(fret_count);

    let mut positions = [Position::new(0, 0); 3];
    for ((slot, string), &note) in positions.iter_mut().zip(strings.strings()).zip(notes) {
        let fret = lowest_fret(string, note, around).or_else(|| lowest_fret(string, note, whole))?;
        *slot = Position::new(string, fret);
    }
    Some(Voicing { positions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::index_of;

    fn frets(voicing: &Voicing) -> Vec<usize> {
        voicing.positions.iter().map(|p| p.fret).collect()
    }

    #[test]
    fn test_c_major_root_position() {
        let triad = Triad::major("C").unwrap();
        let voicing = triad.find_position(Inversion::Root, FretWindow::default()).unwrap();
        let strings: Vec<usize> = voicing.positions.iter().map(|p| p.string).collect();
        assert_eq!(strings, vec![4, 3, 2]);
        assert_eq!(frets(&voicing), vec![10, 9, 8]);
    }

    #[test]
    fn test_a_minor_root_position_matches_notes() {
        let triad = Triad::minor("A").unwrap();
        let voicing = triad.find_position(Inversion::Root, FretWindow::full(12)).unwrap();
        for (position, pitch) in voicing.positions.iter().zip(triad.voicing_pitches(Inversion::Root)) {
            assert_eq!(position.pitch(), Some(pitch));
        }
        assert_eq!(frets(&voicing), vec![7, 5, 5]);
    }

    #[test]
    fn test_a_minor_first_inversion() {
        let triad = Triad::minor("A").unwrap();
        let voicing = triad.find_position(Inversion::First, FretWindow::default()).unwrap();
        // C on D string, E on G string, A on B string
        assert_eq!(frets(&voicing), vec![10, 9, 10]);
    }

    #[test]
    fn test_open_strings_allowed() {
        // G major 2nd inversion: D (open D string), G (open G string), B (open B string)
        let triad = Triad::major("G").unwrap();
        let voicing = triad.find_position(Inversion::Second, FretWindow::default()).unwrap();
        assert_eq!(frets(&voicing), vec![0, 0, 0]);
    }

    #[test]
    fn test_start_fret_respected() {
        let triad = Triad::major("G").unwrap();
        let voicing = triad.find_position(Inversion::Second, FretWindow::new(1, 12)).unwrap();
        assert_eq!(frets(&voicing), vec![12, 12, 12]);
    }

    #[test]
    fn test_no_position_in_narrow_window() {
        let triad = Triad::major("C").unwrap();
        let result = triad.find_position(Inversion::Root, FretWindow::new(0, 5));
        assert!(matches!(result, Err(QuizError::NoPositionFoundError { string: 4, start_fret: 0, max_fret: 5 })));
    }

    #[test]
    fn test_widen_recovers() {
        let triad = Triad::major("C").unwrap();
        let voicing =
            find_position_or_widen(&triad, Inversion::Root, StringSet::default(), FretWindow::new(0, 5), 12).unwrap();
        assert_eq!(frets(&voicing), vec![10, 9, 8]);
    }

    #[test]
    fn test_every_triad_found_on_full_board() {
        for root in crate::note::note_names() {
            for triad in [Triad::major(root).unwrap(), Triad::minor(root).unwrap()] {
                for inversion in Inversion::ALL {
                    let voicing = triad.find_position(inversion, FretWindow::default()).unwrap();
                    for (position, pitch) in voicing.positions.iter().zip(triad.voicing_pitches(inversion)) {
                        assert_eq!(position.pitch(), Some(pitch));
                        assert!(position.fret <= 11, "lowest match is always below the octave");
                    }
                }
            }
        }
    }

    #[test]
    fn test_other_string_sets() {
        let strings = StringSet::new([6, 5, 4]).unwrap();
        let triad = Triad::major("E").unwrap();
        let voicing = find_position(&triad, Inversion::Root, strings, FretWindow::default()).unwrap();
        assert_eq!(frets(&voicing), vec![0, 11, 9]);
    }

    #[test]
    fn test_string_set_validation() {
        assert!(StringSet::new([4, 3, 2]).is_ok());
        assert!(matches!(StringSet::new([4, 4, 2]), Err(QuizError::ConfigError(_))));
        assert!(StringSet::new([7, 3, 2]).is_err());
        assert!(StringSet::new([0, 3, 2]).is_err());
    }

    #[test]
    fn test_locate_answer_near_voicing() {
        let triad = Triad::minor("A").unwrap();
        let correct = triad.find_position(Inversion::Root, FretWindow::default()).unwrap();
        // Player answered A C# E
        let notes = [index_of("A").unwrap(), index_of("C#").unwrap(), index_of("E").unwrap()];
        let answer = locate_answer(&notes, StringSet::default(), &correct, 12).unwrap();
        assert_eq!(answer.positions[0], Position::new(4, 7));
        assert_eq!(answer.positions[1], Position::new(3, 6));
        assert_eq!(answer.positions[2], Position::new(2, 5));
    }

    #[test]
    fn test_locate_answer_falls_back_to_whole_board() {
        let triad = Triad::major("C").unwrap();
        let correct = triad.find_position(Inversion::Root, FretWindow::default()).unwrap();
        // Window around frets 8..=10 is 5..=12, which still holds the D at fret 12
        let notes = [index_of("D").unwrap(), index_of("E").unwrap(), index_of("G").unwrap()];
        let answer = locate_answer(&notes, StringSet::default(), &correct, 12).unwrap();
        assert_eq!(answer.positions[0], Position::new(4, 12));

        let correct = Voicing {
            positions: [Position::new(4, 1), Position::new(3, 1), Position::new(2, 1)],
        };
        // Window 0..=6; F# on the G string is fret 11, outside it
        let notes = [index_of("D#").unwrap(), index_of("F#").unwrap(), index_of("C").unwrap()];
        let answer = locate_answer(&notes, StringSet::default(), &correct, 12).unwrap();
        assert_eq!(answer.positions[1], Position::new(3, 11));
    }

    #[test]
    fn test_locate_answer_needs_three_notes() {
        let correct = Triad::major("C").unwrap().find_position(Inversion::Root, FretWindow::default()).unwrap();
        assert!(locate_answer(&[PitchClass::C], StringSet::default(), &correct, 12).is_none());
    }
}
