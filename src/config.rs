//! # Quiz Configuration
//!
//! Game settings, read from an optional YAML file. Every field may be left
//! out and falls back to the built-in default:
//!
//! ```yaml
//! scale-frets: 18
//! triad-frets: 12
//! triad-strings: [4, 3, 2]
//! triads: [C major, A minor, F# major]
//! key-weights: {0: 5, 1: 4, 2: 4, 3: 3, 4: 2, 5: 2, 6: 1}
//! color: true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::QuizError;
use crate::fretboard::Fretboard;
use crate::key::Key;
use crate::quiz::{default_key_weights, key_pool, WeightedPool};
use crate::triad::Triad;
use crate::voicing::{StringSet, DEFAULT_TRIAD_STRINGS};

pub const DEFAULT_SCALE_FRETS: usize = 18;
pub const DEFAULT_TRIAD_FRETS: usize = 12;

/// Triads asked by default: every natural-root major, and the minors that
/// stay within the common keys
pub const DEFAULT_TRIADS: [&str; 14] = [
    "C major", "D major", "E major", "F major", "G major", "A major", "B major",
    "A minor", "B minor", "C minor", "D minor", "E minor", "F minor", "G minor",
];

/// Raw config for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawQuizConfig {
    scale_frets: Option<usize>,
    triad_frets: Option<usize>,
    triad_strings: Option<[usize; 3]>,
    triads: Option<Vec<String>>,
    key_weights: Option<BTreeMap<u8, u32>>,
    color: Option<bool>,
}

/// Validated game settings
#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    pub scale_frets: usize,
    pub triad_frets: usize,
    pub triad_strings: StringSet,
    pub triads: Vec<Triad>,
    pub key_weights: BTreeMap<u8, u32>,
    pub color: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            scale_frets: DEFAULT_SCALE_FRETS,
            triad_frets: DEFAULT_TRIAD_FRETS,
            triad_strings: StringSet::default(),
            triads: DEFAULT_TRIADS
                .iter()
                .filter_map(|spec| Triad::parse(spec).ok())
                .collect(),
            key_weights: default_key_weights(),
            color: true,
        }
    }
}

impl QuizConfig {
    /// Parse and validate YAML. An empty document gives the defaults.
    ///
    /// # Errors
    /// [`QuizError::ConfigError`] for malformed YAML, unknown fields, or any
    /// setting the games cannot use.
    pub fn from_yaml(content: &str) -> Result<Self, QuizError> {
        let raw: RawQuizConfig = if content.trim().is_empty() {
            RawQuizConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| QuizError::ConfigError(e.to_string()))?
        };

        let defaults = Self::default();

        let scale_frets = check_frets("scale-frets", raw.scale_frets.unwrap_or(defaults.scale_frets))?;
        let triad_frets = check_frets("triad-frets", raw.triad_frets.unwrap_or(defaults.triad_frets))?;

        let triad_strings = StringSet::new(raw.triad_strings.unwrap_or(DEFAULT_TRIAD_STRINGS))?;

        let triads = match raw.triads {
            Some(specs) => specs
                .iter()
                .map(|spec| Triad::parse(spec).map_err(|e| QuizError::ConfigError(format!("triads: {}", e))))
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.triads,
        };
        if triads.is_empty() {
            return Err(QuizError::ConfigError("triads: list is empty".to_string()));
        }

        let config = Self {
            scale_frets,
            triad_frets,
            triad_strings,
            triads,
            key_weights: raw.key_weights.unwrap_or(defaults.key_weights),
            color: raw.color.unwrap_or(defaults.color),
        };

        // Weights that leave no key to ask are a config problem, not a game one
        config.key_pool()?;

        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn key_pool(&self) -> Result<WeightedPool<Key>, QuizError> {
        key_pool(&self.key_weights)
    }

    pub fn triad_pool(&self) -> Result<WeightedPool<Triad>, QuizError> {
        WeightedPool::uniform(self.triads.iter().cloned())
    }
}

fn check_frets(field: &str, fret_count: usize) -> Result<usize, QuizError> {
    Fretboard::new(fret_count)
        .map(|_| fret_count)
        .map_err(|e| QuizError::ConfigError(format!("{}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(QuizConfig::from_yaml("").unwrap(), QuizConfig::default());
        assert_eq!(QuizConfig::from_yaml("  \n").unwrap(), QuizConfig::default());
    }

    #[test]
    fn test_defaults() {
        let config = QuizConfig::default();
        assert_eq!(config.scale_frets, 18);
        assert_eq!(config.triad_frets, 12);
        assert_eq!(config.triad_strings.strings(), [4, 3, 2]);
        assert_eq!(config.triads.len(), 14);
        assert_eq!(config.triads[0].spec(), "C major");
        assert_eq!(config.triads[13].spec(), "G minor");
        assert_eq!(config.key_weights, default_key_weights());
        assert!(config.color);
        assert_eq!(config.key_pool().unwrap().len(), 26);
        assert_eq!(config.triad_pool().unwrap().len(), 14);
    }

    #[test]
    fn test_full_config() {
        let yaml = "
scale-frets: 12
triad-frets: 18
triad-strings: [3, 2, 1]
triads:
  - F# major
  - Bb minor
key-weights:
  0: 1
  7: 2
color: false
";
        let config = QuizConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.scale_frets, 12);
        assert_eq!(config.triad_frets, 18);
        assert_eq!(config.triad_strings.strings(), [3, 2, 1]);
        assert_eq!(
            config.triads.iter().map(|t| t.spec()).collect::<Vec<_>>(),
            vec!["F# major", "Bb minor"]
        );
        assert!(!config.color);
        // C, Amin, C#, Cb, A#min, Abmin
        assert_eq!(config.key_pool().unwrap().len(), 6);
    }

    #[test]
    fn test_partial_config() {
        let config = QuizConfig::from_yaml("color: false\n").unwrap();
        assert!(!config.color);
        assert_eq!(config.triads, QuizConfig::default().triads);
    }

    #[test]
    fn test_invalid_configs() {
        let cases = [
            "scale-frets: 24",
            "triad-frets: 0",
            "triad-strings: [4, 4, 2]",
            "triad-strings: [7, 3, 2]",
            "triads: [H major]",
            "triads: [C dominant]",
            "triads: []",
            "key-weights: {0: 0}",
            "colour: true",
            "scale-frets: [",
            "scale-frets: lots",
        ];
        for yaml in cases {
            assert!(
                matches!(QuizConfig::from_yaml(yaml), Err(QuizError::ConfigError(_))),
                "{}",
                yaml
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("fretquiz-config-{}.yaml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "triad-frets: 18").unwrap();
        drop(file);

        let config = QuizConfig::load(&path).unwrap();
        assert_eq!(config.triad_frets, 18);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(QuizConfig::load(&path), Err(QuizError::IoError(_))));
    }
}
