use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser};
use fretquiz::{QuizConfig, QuizError, ScaleGame, TriadGame};
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

/// Guitar fretboard quizzes for the terminal.
#[derive(Debug, Parser)]
#[clap(about, version)]
struct App {
    /// Which quiz to play
    #[clap(subcommand)]
    cmd: Subcommand,

    #[clap(flatten)]
    options: GameOptions,
}

#[derive(Debug, Clone, Parser)]
enum Subcommand {
    /// Type out the notes of major and minor scales, then explore the
    /// three-notes-per-string pattern on an 18-fret board.
    #[clap(alias = "scales")]
    Scale,
    /// Name the notes of a triad inversion, then see the voicing on the
    /// D, G and B strings.
    #[clap(alias = "triads")]
    Triad,
}

#[derive(Clone, Debug, Args)]
#[command(next_help_heading = "Game Options")]
struct GameOptions {
    /// Path to a YAML config file.
    #[clap(long, short = 'c', env = "FRETQUIZ_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Seed for question selection, for repeatable sessions.
    #[clap(long, global = true)]
    seed: Option<u64>,

    /// Disable coloured output.
    #[clap(long, global = true)]
    no_color: bool,

    /// Tracing filter, written to stderr.
    #[clap(
        long = "trace",
        alias = "log",
        env = "RUST_LOG",
        default_value = "warn",
        global = true
    )]
    trace_filter: tracing_subscriber::filter::Targets,
}

fn run(cmd: Subcommand, options: GameOptions) -> Result<(), QuizError> {
    let mut config = match &options.config {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };
    if options.no_color {
        config.color = false;
    }

    let mut rng = match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let score = match cmd {
        Subcommand::Scale => ScaleGame::from_config(&config)?.play(stdin.lock(), stdout.lock(), &mut rng)?,
        Subcommand::Triad => TriadGame::from_config(&config)?.play(stdin.lock(), stdout.lock(), &mut rng)?,
    };
    tracing::info!(correct = score.correct(), total = score.total(), "game over");
    Ok(())
}

fn main() {
    use tracing_subscriber::prelude::*;

    let App { cmd, options } = App::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(io::stderr))
        .with(options.trace_filter.clone())
        .init();

    if let Err(e) = run(cmd, options) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
