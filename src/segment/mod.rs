//! Turns recognized OCR lines into a question and its answer options.
//!
//! The pipeline is:
//! - `ingest`: trim, drop UI noise and low-confidence lines
//! - `cluster`: find the dominant left-aligned column
//! - `partition`: keep the vertical band of that column and split off the options

pub mod cluster;
pub mod ingest;
pub mod partition;

pub use cluster::{find_dominant_column, ColumnCluster};
pub use ingest::ingest_lines;
pub use partition::partition_question;

use std::fmt;

use crate::error::SolveError;
use crate::ocr::OcrLine;

/// Number of answer options on every question card.
pub const NUM_OPTIONS: usize = 3;

/// Maximum horizontal gap (px) between x-coordinates of the same column.
pub const GROUPING_THRESHOLD: i32 = 60;

/// Pixel rectangle enclosing a recognized line. `x1 <= x2`, `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    /// Builds a box from two corners in any order.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Builds a box from Tesseract's left/top/width/height.
    pub fn from_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(left, top, left + width.max(0), top + height.max(0))
    }
}

/// A filtered line of recognized text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// OCR confidence, 0-100
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl fmt::Display for TextLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line: '{}' (conf: {:.1}); box({},{},{},{})",
            self.text, self.confidence, self.bbox.x1, self.bbox.y1, self.bbox.x2, self.bbox.y2
        )
    }
}

/// A segmented question card.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    /// Per-option scores, filled in by answer inference.
    pub scores: Option<[f64; NUM_OPTIONS]>,
}

impl Question {
    pub fn new(text: String, options: [String; NUM_OPTIONS]) -> Self {
        Self {
            text,
            options,
            scores: None,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "question: '{}'; options: [", self.text)?;
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", option)?;
        }
        write!(f, "]")
    }
}

/// Full segmentation: raw OCR lines in, question card out.
pub fn segment_question(raw: Vec<OcrLine>) -> Result<Question, SolveError> {
    let lines = ingest_lines(raw);
    for line in &lines {
        crate::debug(&line.to_string());
    }

    let cluster = find_dominant_column(&lines);
    match &cluster {
        Some(c) => crate::debug(&format!("largest cluster: {} (streak: {})", c.x, c.streak)),
        None => crate::debug("no left-aligned cluster found"),
    }

    let question = partition_question(&lines, cluster)?;
    crate::log("Successfully recognized question.");
    Ok(question)
}
