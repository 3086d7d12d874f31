//! # Quiz Logic
//!
//! Answer checking, score keeping and weighted question selection shared by
//! the scale and triad games.

use std::collections::BTreeMap;
use std::fmt;

use rand_core::RngCore;

use crate::error::QuizError;
use crate::key::{Key, Scale};
use crate::note::{parse_user_note, PitchClass};

pub const QUIT_COMMANDS: [&str; 2] = ["quit", "exit"];

/// Weight of a key by its number of sharps or flats, 0 through 6
pub const DEFAULT_KEY_WEIGHTS: [u32; 7] = [5, 4, 4, 3, 2, 2, 1];

/// Lowercase and split a typed answer into note tokens
pub fn normalize_answer(input: &str) -> Vec<String> {
    input
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub fn is_quit(input: &str) -> bool {
    let input = input.trim();
    QUIT_COMMANDS.iter().any(|cmd| cmd.eq_ignore_ascii_case(input))
}

/// True if the tokens spell the scale.
///
/// Seven notes must match the scale in order. Eight notes are accepted when
/// the first seven match and the eighth repeats the first (the octave).
/// Comparison is on spelling and ignores case, so `gb` is not accepted for
/// `F#`.
pub fn check_scale_answer<S: AsRef<str>>(tokens: &[S], scale: &Scale) -> bool {
    let spelled_out = |tokens: &[S]| {
        tokens
            .iter()
            .zip(scale.notes.iter())
            .all(|(token, note)| token.as_ref().eq_ignore_ascii_case(note))
    };

    match tokens.len() {
        7 => spelled_out(tokens),
        8 => spelled_out(&tokens[..7]) && tokens[7].as_ref().eq_ignore_ascii_case(tokens[0].as_ref()),
        _ => false,
    }
}

/// Pitch classes of every token, or `None` if any token is not a note
pub fn answer_pitches<S: AsRef<str>>(tokens: &[S]) -> Option<Vec<PitchClass>> {
    tokens
        .iter()
        .map(|token| parse_user_note(token.as_ref()))
        .collect::<Result<Vec<_>, _>>()
        .ok()
}

/// Running tally of answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scorecard {
    correct: u32,
    total: u32,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Percentage of correct answers, `None` before the first answer
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64 * 100.0)
        }
    }

    /// Final score lines, with accuracy once anything has been answered
    pub fn summary(&self) -> String {
        let mut text = format!("Final Score: {}", self);
        if let Some(accuracy) = self.accuracy() {
            text.push_str(&format!("\nAccuracy: {:.1}%", accuracy));
        }
        text
    }
}

impl fmt::Display for Scorecard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// A finite set of items drawn with probability proportional to weight
#[derive(Debug, Clone)]
pub struct WeightedPool<T> {
    entries: Vec<(T, u32)>,
    // Running sum of weights up to and including each entry
    cumulative: Vec<u64>,
}

impl<T> WeightedPool<T> {
    /// Build a pool, dropping zero-weight entries.
    ///
    /// # Errors
    /// [`QuizError::ConfigError`] if nothing with a positive weight is left.
    pub fn new<I>(entries: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = (T, u32)>,
    {
        let entries: Vec<(T, u32)> = entries.into_iter().filter(|(_, weight)| *weight > 0).collect();
        if entries.is_empty() {
            return Err(QuizError::ConfigError(
                "question pool is empty or every weight is zero".to_string(),
            ));
        }

        let cumulative = entries
            .iter()
            .scan(0u64, |sum, (_, weight)| {
                *sum += *weight as u64;
                Some(*sum)
            })
            .collect();

        Ok(Self { entries, cumulative })
    }

    /// Every item gets the same weight
    pub fn uniform<I>(items: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(items.into_iter().map(|item| (item, 1)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, u32)> {
        self.entries.iter().map(|(item, weight)| (item, *weight))
    }

    pub fn sample<R: RngCore>(&self, rng: &mut R) -> &T {
        let ticket = rng.next_u64() % self.total_weight();
        let index = self.cumulative.partition_point(|&sum| sum <= ticket);
        tracing::trace!(ticket, index, "sampled pool");
        &self.entries[index].0
    }
}

pub fn default_key_weights() -> BTreeMap<u8, u32> {
    (0u8..).zip(DEFAULT_KEY_WEIGHTS).collect()
}

/// Every catalogued key, weighted by its accidental count.
///
/// Counts missing from `weights` get weight zero and are left out.
pub fn key_pool(weights: &BTreeMap<u8, u32>) -> Result<WeightedPool<Key>, QuizError> {
    let pool = WeightedPool::new(Key::catalog().map(|key| {
        let weight = weights.get(&key.accidental_count()).copied().unwrap_or(0);
        (key, weight)
    }))?;
    tracing::debug!(keys = pool.len(), total_weight = pool.total_weight(), "built key pool");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    #[test]
    fn test_normalize_answer() {
        assert_eq!(normalize_answer("  G A  B c D e F#  "), vec!["g", "a", "b", "c", "d", "e", "f#"]);
        assert!(normalize_answer("   ").is_empty());
    }

    #[test]
    fn test_is_quit() {
        assert!(is_quit("quit"));
        assert!(is_quit(" EXIT "));
        assert!(is_quit("Quit"));
        assert!(!is_quit("q"));
        assert!(!is_quit("quit now"));
    }

    #[test]
    fn test_check_scale_answer() {
        let scale = Key::parse("G").unwrap().scale();
        assert!(check_scale_answer(&normalize_answer("g a b c d e f#"), &scale));
        assert!(check_scale_answer(&normalize_answer("G A B C D E F# G"), &scale));

        // Wrong note, wrong octave, wrong length
        assert!(!check_scale_answer(&normalize_answer("g a b c d e f"), &scale));
        assert!(!check_scale_answer(&normalize_answer("g a b c d e f# a"), &scale));
        assert!(!check_scale_answer(&normalize_answer("g a b c d e"), &scale));
        assert!(!check_scale_answer(&normalize_answer("g a b c d e f# g a"), &scale));
        assert!(!check_scale_answer::<String>(&[], &scale));

        // Enharmonic respelling is not the scale's spelling
        assert!(!check_scale_answer(&normalize_answer("g a b c d e gb"), &scale));
    }

    #[test]
    fn test_check_flat_scale() {
        let scale = Key::parse("Ebmin").unwrap().scale();
        assert!(check_scale_answer(&normalize_answer(&scale.format_answer()), &scale));
        assert!(check_scale_answer(&normalize_answer("eb f gb ab bb cb db eb"), &scale));
    }

    #[test]
    fn test_answer_pitches() {
        let pitches = answer_pitches(&normalize_answer("c E gB")).unwrap();
        assert_eq!(pitches.iter().map(|p| p.index()).collect::<Vec<_>>(), vec![0, 4, 6]);
        assert_eq!(answer_pitches(&normalize_answer("c h g")), None);
    }

    #[test]
    fn test_scorecard() {
        let mut score = Scorecard::new();
        assert_eq!(score.accuracy(), None);
        assert_eq!(score.summary(), "Final Score: 0/0");

        for correct in [true, true, false, true] {
            score.record(correct);
        }
        assert_eq!(score.correct(), 3);
        assert_eq!(score.total(), 4);
        assert_eq!(score.to_string(), "3/4");
        assert_eq!(score.summary(), "Final Score: 3/4\nAccuracy: 75.0%");

        score.record(false);
        score.record(false);
        assert_eq!(score.summary(), "Final Score: 3/6\nAccuracy: 50.0%");
    }

    #[test]
    fn test_pool_rejects_empty() {
        assert!(matches!(WeightedPool::<u8>::new(vec![]), Err(QuizError::ConfigError(_))));
        assert!(matches!(WeightedPool::new(vec![('a', 0), ('b', 0)]), Err(QuizError::ConfigError(_))));
        assert!(WeightedPool::<u8>::uniform(vec![]).is_err());
    }

    #[test]
    fn test_pool_skips_zero_weight() {
        let pool = WeightedPool::new(vec![('a', 0), ('b', 3), ('c', 0), ('d', 1)]).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.total_weight(), 4);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = BTreeMap::new();
        for _ in 0..2000 {
            *seen.entry(*pool.sample(&mut rng)).or_insert(0u32) += 1;
        }
        assert_eq!(seen.keys().copied().collect::<Vec<_>>(), vec!['b', 'd']);
        // Roughly 3:1
        assert!(seen[&'b'] > seen[&'d'] * 2);
    }

    #[test]
    fn test_pool_is_deterministic_for_seed() {
        let pool = WeightedPool::uniform(0..50).unwrap();
        let draw = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..20).map(|_| *pool.sample(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
        assert_ne!(draw(42), draw(43));
    }

    #[test]
    fn test_default_key_pool() {
        let weights = default_key_weights();
        assert_eq!(weights.len(), 7);
        assert_eq!(weights[&0], 5);
        assert_eq!(weights[&6], 1);

        let pool = key_pool(&weights).unwrap();
        // 30 catalogued keys minus C#, Cb, A#min, Abmin
        assert_eq!(pool.len(), 26);
        assert!(pool.iter().all(|(key, _)| key.accidental_count() <= 6));

        let weight_of = |name: &str| pool.iter().find(|(key, _)| key.name() == name).map(|(_, w)| w);
        assert_eq!(weight_of("C"), Some(5));
        assert_eq!(weight_of("Amin"), Some(5));
        assert_eq!(weight_of("Bbmin"), Some(2));
        assert_eq!(weight_of("F#"), Some(1));
        assert_eq!(weight_of("C#"), None);
    }

    #[test]
    fn test_key_pool_with_custom_weights() {
        let weights: BTreeMap<u8, u32> = [(0, 1)].into_iter().collect();
        let pool = key_pool(&weights).unwrap();
        let names: Vec<String> = pool.iter().map(|(key, _)| key.name()).collect();
        assert_eq!(names, vec!["C", "Amin"]);

        assert!(key_pool(&BTreeMap::new()).is_err());
    }
}
