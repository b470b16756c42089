//! Trivia Solver
//!
//! Reads a screenshot of a multiple-choice trivia question, segments the
//! recognized text into a question and three options, and ranks the options
//! by how strongly web search results correlate with each of them.

mod answer;
mod config;
mod error;
mod ocr;
mod paths;
mod report;
mod runner;
mod segment;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::answer::{find_settings_file, HttpSearch, Solver, WordLists};
use crate::ocr::{locate_tesseract, OcrEngine};
use crate::runner::Pipeline;

/// Set from `--verbose`; gates `debug` output.
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::get_log_file())
    {
        let _ = file.write_all(line.as_bytes());
    }
}

/// Like `log`, but only with `--verbose`.
pub fn debug(msg: &str) {
    if VERBOSE.load(Ordering::Relaxed) {
        log(msg);
    }
}

#[derive(Parser, Debug)]
#[command(name = "trivia-solver", version, about = "Answers trivia question screenshots")]
struct Cli {
    /// Screenshot of the question card
    image: PathBuf,
    /// Keep watching the screenshot and re-solve whenever it changes
    #[arg(short, long)]
    live: bool,
    /// Print segmentation and scoring details
    #[arg(short, long)]
    verbose: bool,
    /// Path to config.json (defaults to the executable's directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Path to the word-list file
    #[arg(long)]
    words: Option<PathBuf>,
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths::get_log_file())
        {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    VERBOSE.store(cli.verbose, Ordering::Relaxed);
    install_panic_hook();
    if let Err(e) = paths::ensure_directories() {
        eprintln!("Warning: could not create log directory: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref());

    let settings_path =
        find_settings_file(&[cli.words.as_deref(), config.settings_path.as_deref()])?;
    let words = WordLists::load(&settings_path)?;

    log("Initializing tesseract...");
    let tesseract =
        locate_tesseract(&config.tesseract).context("Could not initialize tesseract")?;
    let engine = OcrEngine::new(tesseract, &config.tesseract.language, config.tesseract.psm);

    let backend = HttpSearch::new(&config.search)?;
    let solver = Solver::new(&words, Box::new(backend), &config.search.bot_marker)?;
    let pipeline = Pipeline::new(engine, solver, config.ocr_threshold);

    if cli.live {
        runner::run_live(
            &pipeline,
            &cli.image,
            Duration::from_millis(config.live_poll_ms),
        )
    } else {
        runner::run_once(&pipeline, &cli.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_image() {
        assert!(Cli::try_parse_from(["trivia-solver"]).is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "trivia-solver",
            "shot.png",
            "--live",
            "-v",
            "--words",
            "words.txt",
        ])
        .unwrap();

        assert_eq!(cli.image, PathBuf::from("shot.png"));
        assert!(cli.live);
        assert!(cli.verbose);
        assert_eq!(cli.words, Some(PathBuf::from("words.txt")));
        assert!(cli.config.is_none());
    }
}
