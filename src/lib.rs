pub mod config;
pub mod error;
pub mod fretboard;
pub mod game;
pub mod key;
pub mod note;
pub mod pattern;
pub mod quiz;
pub mod triad;
pub mod tuning;
pub mod voicing;

pub use config::QuizConfig;
pub use error::*;
pub use fretboard::{Fretboard, Highlight};
pub use game::{ScaleGame, TriadGame};
pub use key::{Key, Mode, Scale};
pub use note::PitchClass;
pub use pattern::ScalePattern;
pub use quiz::{Scorecard, WeightedPool};
pub use triad::{Inversion, Quality, Triad};
pub use tuning::Position;
pub use voicing::{find_position, FretWindow, StringSet, Voicing};

/// Notes of the scale named by a key spec such as `"Bbmin"`.
pub fn scale_notes(spec: &str) -> Result<Scale, QuizError> {
    Ok(Key::parse(spec)?.scale())
}

/// Render a triad voicing (e.g. `"C major"`) on strings 4, 3 and 2 of a
/// 12-fret board
pub fn triad_diagram(spec: &str, inversion: Inversion) -> Result<String, QuizError> {
    let triad = Triad::parse(spec)?;
    let voicing = triad.find_position(inversion, FretWindow::default())?;

    let mut board = Fretboard::new(12)?;
    for position in voicing.positions {
        board.mark_position(position, fretboard::DEFAULT_MARKER)?;
    }
    Ok(board.render())
}
