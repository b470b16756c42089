use crate::ocr::OcrLine;

use super::TextLine;

/// Lines below this OCR confidence are discarded.
pub const MIN_CONFIDENCE: f32 = 70.0;

/// Overlay text drawn by the trivia app on top of the question card.
/// Matched case-insensitively as substrings.
const NOISE_PATTERNS: &[&str] = &["reveal comments"];

fn is_noise(text: &str) -> bool {
    let lower = text.to_lowercase();
    NOISE_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Trims recognized lines and drops UI noise and low-confidence lines.
///
/// Order is preserved. An empty result is not an error here; the
/// partitioner decides whether enough evidence survived.
pub fn ingest_lines(raw: Vec<OcrLine>) -> Vec<TextLine> {
    raw.into_iter()
        .filter_map(|line| {
            let text = line.text.trim();
            if is_noise(text) {
                crate::debug(&format!("dropping overlay line: '{}'", text));
                return None;
            }
            if line.confidence < MIN_CONFIDENCE {
                crate::debug(&format!(
                    "dropping low-confidence line: '{}' ({:.0}%)",
                    text, line.confidence
                ));
                return None;
            }
            Some(TextLine {
                text: text.to_string(),
                confidence: line.confidence,
                bbox: line.bbox,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::BoundingBox;

    fn raw(text: &str, confidence: f32) -> OcrLine {
        OcrLine {
            text: text.to_string(),
            confidence,
            bbox: BoundingBox::new(0, 0, 10, 10),
        }
    }

    #[test]
    fn test_trims_whitespace() {
        let lines = ingest_lines(vec![raw("  Mars \n", 90.0)]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Mars");
    }

    #[test]
    fn test_drops_noise_case_insensitively() {
        let lines = ingest_lines(vec![
            raw("Tap to REVEAL COMMENTS", 99.0),
            raw("Mars", 90.0),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Mars");
    }

    #[test]
    fn test_confidence_threshold_is_inclusive() {
        let lines = ingest_lines(vec![raw("kept", 70.0), raw("dropped", 69.9)]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "kept");
    }

    #[test]
    fn test_preserves_order() {
        let lines = ingest_lines(vec![raw("a", 80.0), raw("b", 80.0), raw("c", 80.0)]);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(ingest_lines(Vec::new()).is_empty());
    }
}
