//! # Error Types
//!
//! This module defines all error types for the fretboard quiz library.
//!
//! Every failure is a local validation failure surfaced immediately to the
//! caller. The only retry is the voicing search, which widens its window
//! after a `NoPositionFoundError`. Inside the game loops a wrong or garbled
//! answer is just scored as incorrect, so only I/O errors end a game early.
//!
//! ## Error Types
//! - `UnknownNoteError` - Name not in the enharmonic table
//! - `InvalidKeySpecError` / `InvalidTriadSpecError` - Malformed textual spec
//! - `InvalidInversionError` - Inversion number outside 0..=2
//! - `UnsupportedFretCountError` - Board size other than 12 or 18
//! - `PositionOutOfRangeError` - Mark outside the board
//! - `NoPositionFoundError` - Voicing search found nothing in the window (recoverable)
//! - `ConfigError` - Invalid YAML configuration
//! - `IoError` - Terminal I/O failure in the game loop
//!
//! ## Usage
//! ```rust
//! use fretquiz::{Key, QuizError};
//!
//! match Key::parse("Hmin") {
//!     Ok(key) => println!("{:?}", key.scale().notes),
//!     Err(QuizError::InvalidKeySpecError { spec, reason }) => {
//!         eprintln!("Bad key '{}': {}", spec, reason);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    /// Note name not present in the enharmonic table.
    ///
    /// # Example
    /// ```
    /// # use fretquiz::QuizError;
    /// let err = QuizError::UnknownNoteError("H".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: H");
    /// ```
    #[error("Invalid note name: {0}")]
    UnknownNoteError(String),

    /// Key spec such as `"F#"` or `"Dmin"` could not be parsed.
    #[error("Invalid key spec '{spec}': {reason}")]
    InvalidKeySpecError { spec: String, reason: String },

    /// Triad spec such as `"C major"` could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use fretquiz::QuizError;
    /// let err = QuizError::InvalidTriadSpecError {
    ///     spec: "C augmented".to_string(),
    ///     reason: "Invalid quality: augmented".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid triad spec 'C augmented': Invalid quality: augmented");
    /// ```
    #[error("Invalid triad spec '{spec}': {reason}")]
    InvalidTriadSpecError { spec: String, reason: String },

    #[error("Invalid inversion: {0}")]
    InvalidInversionError(u8),

    #[error("Unsupported fret count {0} (must be 12 or 18)")]
    UnsupportedFretCountError(usize),

    /// Attempted to mark a cell that does not exist on the board.
    #[error("Position out of range: string {string}, fret {fret} (board has 6 strings and {fret_count} frets)")]
    PositionOutOfRangeError {
        string: usize,
        fret: usize,
        fret_count: usize,
    },

    /// No fret in the search window produces the wanted note on some string.
    ///
    /// This is an expected outcome; callers usually retry with a wider window.
    #[error("No position found for string {string} between frets {start_fret} and {max_fret}")]
    NoPositionFoundError {
        string: usize,
        start_fret: usize,
        max_fret: usize,
    },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
