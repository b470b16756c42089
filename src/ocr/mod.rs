pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::{OcrEngine, OcrLine};
pub use preprocess::prepare_for_ocr;
pub use setup::locate_tesseract;

use anyhow::{Context, Result};
use std::path::Path;

/// High-level function: screenshot file → recognized text lines.
///
/// Loads the image, converts it to grayscale (binarizing when a threshold
/// is configured) and runs line-level OCR over the whole frame.
pub fn recognize_screenshot(
    engine: &OcrEngine,
    path: &Path,
    threshold: Option<u8>,
) -> Result<Vec<OcrLine>> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load screenshot {}", path.display()))?
        .to_rgba8();

    crate::debug(&format!(
        "OCR: {} ({}x{}, threshold {:?})",
        path.display(),
        img.width(),
        img.height(),
        threshold
    ));

    let prepared = prepare_for_ocr(&img, threshold);
    let lines = engine.recognize(&prepared)?;
    crate::log(&format!("OCR recognized {} line(s)", lines.len()));
    Ok(lines)
}
