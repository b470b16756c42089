use anyhow::{anyhow, Context, Result};
use image::GrayImage;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::TesseractPaths;
use crate::segment::BoundingBox;

/// A line of OCR text with its confidence and pixel box.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrLine {
    pub text: String,
    /// Mean word confidence, 0-100
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Tesseract invocation settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    paths: TesseractPaths,
    language: String,
    psm: u8,
}

impl OcrEngine {
    pub fn new(paths: TesseractPaths, language: impl Into<String>, psm: u8) -> Self {
        Self {
            paths,
            language: language.into(),
            psm,
        }
    }

    /// Runs Tesseract on a preprocessed grayscale image.
    /// Returns lines in reading order.
    pub fn recognize(&self, img: &GrayImage) -> Result<Vec<OcrLine>> {
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path())?;

        // Tesseract appends .tsv to the output base
        let temp_output = NamedTempFile::new()?;
        let output_base = temp_output.path().to_string_lossy().to_string();

        let mut cmd = Command::new(&self.paths.executable);
        cmd.arg(temp_input.path()).arg(&output_base);
        if let Some(tessdata) = &self.paths.tessdata {
            cmd.arg("--tessdata-dir").arg(tessdata);
        }
        let output = cmd
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("tsv")
            .output()
            .with_context(|| format!("Failed to run {}", self.paths.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        let tsv_path = format!("{}.tsv", output_base);
        let tsv_content = std::fs::read_to_string(&tsv_path)
            .map_err(|e| anyhow!("Failed to read Tesseract output: {}", e))?;
        let _ = std::fs::remove_file(&tsv_path);

        Ok(parse_tsv_output(&tsv_content))
    }
}

/// Line being assembled from TSV rows.
struct PendingLine {
    key: (i32, i32, i32),
    bbox: Option<BoundingBox>,
    words: Vec<String>,
    conf_sum: f32,
    conf_count: usize,
}

impl PendingLine {
    fn finish(self) -> Option<OcrLine> {
        if self.words.is_empty() {
            return None;
        }
        let confidence = if self.conf_count > 0 {
            self.conf_sum / self.conf_count as f32
        } else {
            0.0
        };
        Some(OcrLine {
            text: self.words.join(" "),
            confidence,
            bbox: self.bbox.unwrap_or(BoundingBox::new(0, 0, 0, 0)),
        })
    }
}

/// Parses Tesseract TSV output into lines.
///
/// TSV fields: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Level 4 rows carry the line box,
/// level 5 rows carry the words.
pub(crate) fn parse_tsv_output(tsv: &str) -> Vec<OcrLine> {
    let mut pending: Vec<PendingLine> = Vec::new();

    for row in tsv.lines().skip(1) {
        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() < 11 {
            continue;
        }

        let num = |i: usize| fields[i].trim().parse::<i32>().unwrap_or(-1);
        let level = num(0);
        let key = (num(2), num(3), num(4));
        let bbox = BoundingBox::from_ltwh(num(6), num(7), num(8), num(9));

        match level {
            4 => pending.push(PendingLine {
                key,
                bbox: Some(bbox),
                words: Vec::new(),
                conf_sum: 0.0,
                conf_count: 0,
            }),
            5 => {
                let text = fields.get(11).map(|t| t.trim()).unwrap_or("");
                let conf: f32 = fields[10].trim().parse().unwrap_or(-1.0);
                if text.is_empty() || conf < 0.0 {
                    continue;
                }

                if pending.last().is_none_or(|p| p.key != key) {
                    // Word without a preceding line row: grow a box from the words
                    pending.push(PendingLine {
                        key,
                        bbox: None,
                        words: Vec::new(),
                        conf_sum: 0.0,
                        conf_count: 0,
                    });
                }
                if let Some(line) = pending.last_mut() {
                    line.bbox = Some(match line.bbox {
                        Some(b) => BoundingBox::new(
                            b.x1.min(bbox.x1),
                            b.y1.min(bbox.y1),
                            b.x2.max(bbox.x2),
                            b.y2.max(bbox.y2),
                        ),
                        None => bbox,
                    });
                    line.words.push(text.to_string());
                    line.conf_sum += conf;
                    line.conf_count += 1;
                }
            }
            _ => {}
        }
    }

    pending.into_iter().filter_map(PendingLine::finish).collect()
}
