//! Pipeline runner: single-shot and live mode.
//!
//! Live mode watches the screenshot file and re-runs the pipeline whenever
//! its modification time changes. Segmentation failures and unreadable
//! frames are skipped; bot detection stops the loop.

use anyhow::Result;
use std::path::Path;
use std::thread;
use std::time::{Duration, SystemTime};

use crate::answer::Solver;
use crate::error::SolveError;
use crate::ocr::{self, OcrEngine, OcrLine};
use crate::segment::{segment_question, Question};
use crate::{log, report};

/// A question with its chosen option.
#[derive(Debug, Clone)]
pub struct Solved {
    pub question: Question,
    pub best: usize,
}

/// OCR engine and solver, resolved once and reused for every frame.
pub struct Pipeline {
    engine: OcrEngine,
    solver: Solver,
    ocr_threshold: Option<u8>,
}

impl Pipeline {
    pub fn new(engine: OcrEngine, solver: Solver, ocr_threshold: Option<u8>) -> Self {
        Self {
            engine,
            solver,
            ocr_threshold,
        }
    }

    /// Screenshot → answer.
    pub fn solve_image(&self, path: &Path) -> Result<Solved> {
        let lines = ocr::recognize_screenshot(&self.engine, path, self.ocr_threshold)?;
        solve_lines(&self.solver, lines)
    }
}

/// Recognized lines → answer.
pub fn solve_lines(solver: &Solver, lines: Vec<OcrLine>) -> Result<Solved> {
    let mut question = segment_question(lines)?;
    log(&question.to_string());

    let best = solver.infer_answer(&mut question)?;
    log(&format!("Best option: {} ('{}')", best + 1, question.options[best]));

    Ok(Solved { question, best })
}

/// Errors that must end the run instead of skipping the current frame.
pub fn is_fatal(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<SolveError>(),
        Some(SolveError::BotDetected { .. })
    )
}

/// Solves one screenshot and prints the result.
pub fn run_once(pipeline: &Pipeline, path: &Path) -> Result<()> {
    let solved = pipeline.solve_image(path)?;
    print!("{}", report::render(&solved.question, solved.best));
    Ok(())
}

/// Re-solves `path` every time it changes, until a fatal error.
pub fn run_live(pipeline: &Pipeline, path: &Path, poll: Duration) -> Result<()> {
    log(&format!(
        "Live mode: watching {} (every {} ms)",
        path.display(),
        poll.as_millis()
    ));

    let mut last_seen: Option<SystemTime> = None;
    loop {
        if screenshot_changed(path, &mut last_seen) {
            match pipeline.solve_image(path) {
                Ok(solved) => print!("{}", report::render(&solved.question, solved.best)),
                Err(e) if is_fatal(&e) => return Err(e),
                Err(e) => log(&format!("Skipping frame: {:#}", e)),
            }
        }
        thread::sleep(poll);
    }
}

/// True when the file's modification time differs from the last one seen.
/// A missing file is never "changed".
fn screenshot_changed(path: &Path, last_seen: &mut Option<SystemTime>) -> bool {
    let Ok(modified) = std::fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };
    if *last_seen == Some(modified) {
        return false;
    }
    *last_seen = Some(modified);
    true
}
