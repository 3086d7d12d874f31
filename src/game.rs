//! # Game Loops
//!
//! The interactive scale and triad quizzes. Both loops read answers line by
//! line from any [`BufRead`] and write to any [`Write`], so a whole session
//! can be scripted. A game ends on `quit`, `exit` or end of input, and
//! prints the final score.

use std::io::{BufRead, Write};

use owo_colors::OwoColorize;
use rand_core::RngCore;

use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::fretboard::{Fretboard, Highlight, DEFAULT_MARKER};
use crate::key::{Key, Mode};
use crate::pattern::ScalePattern;
use crate::quiz::{answer_pitches, check_scale_answer, is_quit, normalize_answer, Scorecard, WeightedPool};
use crate::triad::{Inversion, Triad};
use crate::tuning::Position;
use crate::voicing::{find_position_or_widen, locate_answer, FretWindow, StringSet};

const RULE_WIDTH: usize = 60;

struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Prompt and read one trimmed line, `None` at end of input
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, QuizError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn rule(&mut self, ch: char) -> Result<(), QuizError> {
        writeln!(self.output, "{}", ch.to_string().repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn banner(&mut self, title: &str, lines: &[&str]) -> Result<(), QuizError> {
        self.rule('=')?;
        writeln!(self.output, "Welcome to {}!", title)?;
        self.rule('=')?;
        writeln!(self.output)?;
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output)?;
        writeln!(self.output, "Type 'quit' or 'exit' to exit the game.")?;
        self.rule('=')?;
        writeln!(self.output)?;
        Ok(())
    }

    fn verdict(&mut self, correct: bool, answer: &str, score: &Scorecard) -> Result<(), QuizError> {
        match (correct, self.color) {
            (true, true) => writeln!(self.output, "{}", "✓ Correct!".green())?,
            (true, false) => writeln!(self.output, "✓ Correct!")?,
            (false, true) => writeln!(self.output, "{}", "✗ Incorrect!".red())?,
            (false, false) => writeln!(self.output, "✗ Incorrect!")?,
        }
        if !correct {
            writeln!(self.output, "  Correct answer: {}", answer)?;
        }
        writeln!(self.output, "  Score: {}", score)?;
        writeln!(self.output)?;
        Ok(())
    }

    fn final_score(&mut self, score: &Scorecard) -> Result<(), QuizError> {
        writeln!(self.output)?;
        self.rule('=')?;
        writeln!(self.output, "{}", score.summary())?;
        writeln!(self.output, "Thanks for playing!")?;
        self.rule('=')?;
        Ok(())
    }
}

fn key_title(key: &Key) -> String {
    match key.mode() {
        Mode::Major => format!("{} major", key.root()),
        Mode::Minor => format!("{} minor", key.root()),
    }
}

/// Name the notes of a scale, then explore its fingering on the neck
#[derive(Debug, Clone)]
pub struct ScaleGame {
    keys: WeightedPool<Key>,
    fret_count: usize,
    color: bool,
}

impl ScaleGame {
    pub fn new(keys: WeightedPool<Key>, fret_count: usize, color: bool) -> Self {
        Self { keys, fret_count, color }
    }

    pub fn from_config(config: &QuizConfig) -> Result<Self, QuizError> {
        Ok(Self::new(config.key_pool()?, config.scale_frets, config.color))
    }

    /// Run rounds until the player quits or input ends
    pub fn play<R, W, G>(&self, input: R, output: W, rng: &mut G) -> Result<Scorecard, QuizError>
    where
        R: BufRead,
        W: Write,
        G: RngCore,
    {
        let mut console = Console { input, output, color: self.color };
        let mut score = Scorecard::new();

        console.banner(
            "Scale Speak-Out",
            &[
                "Enter the notes of the scale in order.",
                "You can enter 7 notes or 8 notes (with octave).",
                "Example: g a b c d e f# or g a b c d e f# g",
            ],
        )?;

        loop {
            let key = self.keys.sample(rng);
            let scale = key.scale();
            tracing::info!(key = %key, "scale round");

            writeln!(console.output, "Question: {} ({})", key_title(key), key.describe_accidentals())?;
            writeln!(console.output)?;

            let answer = match console.ask("Your answer: ")? {
                Some(line) if !is_quit(&line) => line,
                _ => break,
            };

            let tokens = normalize_answer(&answer);
            let correct = check_scale_answer(&tokens, &scale);
            score.record(correct);
            console.verdict(correct, &scale.format_answer(), &score)?;

            let played = answer_pitches(&tokens);
            let mut pattern = ScalePattern::new(key, self.fret_count);
            loop {
                let board = pattern.render(played.as_deref(), self.color)?;
                writeln!(console.output, "{}", board)?;
                writeln!(console.output)?;
                writeln!(
                    console.output,
                    "Type 'left' or 'right' to shift pattern, Enter to continue, or 'quit' to exit."
                )?;

                match console.ask("> ")?.map(|cmd| cmd.to_lowercase()) {
                    Some(cmd) if cmd == "left" => pattern.shift_left(),
                    Some(cmd) if cmd == "right" => pattern.shift_right(),
                    Some(cmd) if !is_quit(&cmd) => break,
                    _ => {
                        console.final_score(&score)?;
                        return Ok(score);
                    }
                }
            }

            writeln!(console.output)?;
            console.rule('-')?;
            writeln!(console.output)?;
        }

        console.final_score(&score)?;
        Ok(score)
    }
}

/// Name the notes of a triad inversion, then see it on the neck
#[derive(Debug, Clone)]
pub struct TriadGame {
    triads: WeightedPool<Triad>,
    inversions: WeightedPool<Inversion>,
    strings: StringSet,
    fret_count: usize,
    color: bool,
}

impl TriadGame {
    pub fn new(triads: WeightedPool<Triad>, strings: StringSet, fret_count: usize, color: bool) -> Result<Self, QuizError> {
        Ok(Self {
            triads,
            inversions: WeightedPool::uniform(Inversion::ALL)?,
            strings,
            fret_count,
            color,
        })
    }

    pub fn from_config(config: &QuizConfig) -> Result<Self, QuizError> {
        Self::new(config.triad_pool()?, config.triad_strings, config.triad_frets, config.color)
    }

    /// Restrict which inversions are asked
    pub fn with_inversions(mut self, inversions: WeightedPool<Inversion>) -> Self {
        self.inversions = inversions;
        self
    }

    fn render(&self, correct: &[Position], played: &[Position]) -> Result<String, QuizError> {
        let mut board = Fretboard::new(self.fret_count)?;
        for position in played.iter().chain(correct) {
            board.mark_position(*position, DEFAULT_MARKER)?;
        }

        if !self.color {
            return Ok(board.render());
        }

        let mut highlights: Vec<(Position, Highlight)> = played
            .iter()
            .filter(|position| !correct.contains(position))
            .map(|position| (*position, Highlight::Wrong))
            .collect();
        highlights.extend(correct.iter().map(|position| (*position, Highlight::Correct)));
        Ok(board.render_highlighted(&highlights))
    }

    /// Run rounds until the player quits or input ends
    pub fn play<R, W, G>(&self, input: R, output: W, rng: &mut G) -> Result<Scorecard, QuizError>
    where
        R: BufRead,
        W: Write,
        G: RngCore,
    {
        let mut console = Console { input, output, color: self.color };
        let mut score = Scorecard::new();

        let [low, mid, high] = self.strings.strings();
        let order = format!("Enter the notes from lowest to highest string ({}, {}, {}).", low, mid, high);
        console.banner(
            "Triad Game",
            &[
                "Identify the notes of the triad in the specified inversion.",
                order.as_str(),
                "Example: 'c e g' or 'c e a'",
            ],
        )?;

        loop {
            let triad = self.triads.sample(rng);
            let inversion = *self.inversions.sample(rng);
            tracing::info!(triad = %triad, %inversion, "triad round");

            writeln!(console.output, "Question: {}, {}", triad, inversion.name())?;
            writeln!(console.output)?;

            let answer = match console.ask("Your answer: ")? {
                Some(line) if !is_quit(&line) => line,
                _ => break,
            };

            let tokens = normalize_answer(&answer);
            let correct = triad.matches(&tokens, inversion);
            score.record(correct);
            console.verdict(correct, &triad.format_answer(inversion), &score)?;

            let voicing = find_position_or_widen(
                triad,
                inversion,
                self.strings,
                FretWindow::full(self.fret_count),
                self.fret_count,
            )?;
            let played = answer_pitches(&tokens)
                .and_then(|pitches| locate_answer(&pitches, self.strings, &voicing, self.fret_count))
                .map(|v| v.positions.to_vec())
                .unwrap_or_default();

            writeln!(console.output, "{}", self.render(&voicing.positions, &played)?)?;
            writeln!(console.output)?;
            console.rule('-')?;
            writeln!(console.output)?;
        }

        console.final_score(&score)?;
        Ok(score)
    }
}
