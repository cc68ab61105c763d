//! # Marriage Scorepad terminal front-end
//!
//! A small command-line score sheet over a directory-backed store. Every
//! invocation opens the saved game, applies one command and exits.
//!
//! ```text
//! cargo run --example scorepad -- show
//! cargo run --example scorepad -- add-round 12 -7 ""
//! cargo run --example scorepad -- edit-round 1 5 -5 0
//! cargo run --example scorepad -- --lang ru rename 2 Анна
//! cargo run --example scorepad -- --yes reset
//! ```

// Allow example-specific patterns
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use marriage_scorepad::prelude::*;
use marriage_scorepad::InvalidRequestKind;

#[derive(Parser)]
#[command(about = "Score sheet for the Marriage card game")]
struct Opt {
    /// Directory holding the saved game
    #[arg(long, default_value = ".scorepad")]
    state_dir: PathBuf,
    /// Switch the interface language (en, ru, es) before running the command
    #[arg(long, value_parser = parse_language)]
    lang: Option<Language>,
    /// Do not ask before removing a player or resetting the game
    #[arg(short, long)]
    yes: bool,
    /// Log every committed operation
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the players and the round history
    Show,
    /// Record a new round, one value per player ("" leaves a field empty)
    AddRound {
        #[arg(allow_hyphen_values = true)]
        scores: Vec<String>,
    },
    /// Replace the values of round ROUND (numbered from 1)
    EditRound {
        round: usize,
        #[arg(allow_hyphen_values = true)]
        scores: Vec<String>,
    },
    /// Delete round ROUND (numbered from 1)
    DeleteRound { round: usize },
    /// Add a player with a default name
    AddPlayer,
    /// Remove player PLAYER (numbered from 1) and their column
    RemovePlayer { player: usize },
    /// Rename player PLAYER (numbered from 1)
    Rename { player: usize, name: String },
    /// Switch the interface language
    Lang {
        #[arg(value_parser = parse_language)]
        language: Language,
    },
    /// Start a new game with the same number of players
    Reset,
}

fn parse_language(code: &str) -> Result<Language, String> {
    code.parse()
        .map_err(|e: InvalidRequestKind| e.to_string())
}

/// Converts a 1-based number from the command line into an index.
fn index_of(number: usize) -> usize {
    number.saturating_sub(1)
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "д" | "да" | "s" | "sí" | "si"))
}

fn show<S: KeyValueStore>(board: &Scoreboard<S>) {
    let view = board.view();
    println!("{}", view.label(MessageKey::Title));
    for card in &view.players {
        let crown = if card.leader { " 👑" } else { "" };
        println!("  {}. {:<16} {:>6}{}", card.index + 1, card.name, card.score, crown);
    }

    if !view.has_history() {
        return;
    }
    println!();
    println!("{}", view.label(MessageKey::History));
    println!("  #   {}", view.header().join(" | "));
    for row in &view.history {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| format!("{}{}", cell.delta, cell.trend.arrow()))
            .collect();
        println!("  {:<3} {}", row.number, cells.join(" | "));
    }
}

fn run(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open(&opt.state_dir)?;
    let mut builder = ScoreboardBuilder::new();
    if let Some(language) = opt.lang {
        builder = builder.with_language(language);
    }
    let mut board = builder.open(store)?;

    match opt.command {
        Command::Show => {},
        Command::AddRound { scores } => {
            if board.record_round(scores.as_slice(), RoundTarget::New)? == RoundOutcome::Skipped {
                println!("Nothing entered, no round recorded.");
            }
        },
        Command::EditRound { round, scores } => {
            let target = RoundTarget::Edit(index_of(round));
            board.record_round(scores.as_slice(), target)?;
        },
        Command::DeleteRound { round } => {
            board.delete_round(index_of(round))?;
        },
        Command::AddPlayer => {
            board.add_player()?;
        },
        Command::RemovePlayer { player } => {
            if opt.yes || confirm(board.label(MessageKey::ConfirmDeletePlayer))? {
                board.remove_player(index_of(player))?;
            }
        },
        Command::Rename { player, name } => {
            board.rename_player(index_of(player), name)?;
        },
        Command::Lang { language } => {
            board.set_language(language)?;
        },
        Command::Reset => {
            if opt.yes || confirm(board.label(MessageKey::ResetConfirm))? {
                board.reset_game()?;
            }
        },
    }

    show(&board);
    Ok(())
}

fn main() -> ExitCode {
    let opt = Opt::parse();

    let level = if opt.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // Logs go to stderr so they never interleave with the score table.
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting up tracing subscriber failed: {e}");
    }

    match run(opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}
