use crate::error::SolveError;

use super::{ColumnCluster, Question, TextLine, GROUPING_THRESHOLD, NUM_OPTIONS};

/// The question needs at least one line besides the options.
pub const MIN_LINES_FOR_SUCCESS: usize = NUM_OPTIONS + 1;

/// Keeps the vertical band spanned by the aligned column and splits it
/// into question text and trailing options.
///
/// Lines inside the band are kept whatever their own x-alignment, which
/// recovers wrapped question lines that start further right.
pub fn partition_question(
    lines: &[TextLine],
    cluster: Option<ColumnCluster>,
) -> Result<Question, SolveError> {
    let Some(cluster) = cluster else {
        return Err(SolveError::Segmentation { survivors: 0 });
    };

    let (top, bottom) = lines
        .iter()
        .filter(|l| (l.bbox.x1 - cluster.x).abs() < GROUPING_THRESHOLD)
        .fold((i32::MAX, i32::MIN), |(lo, hi), l| {
            (lo.min(l.bbox.y1), hi.max(l.bbox.y1))
        });

    let band: Vec<&TextLine> = lines
        .iter()
        .filter(|l| l.bbox.y1 >= top && l.bbox.y1 <= bottom)
        .collect();

    crate::debug(&format!("band y={}..={}, {} line(s):", top, bottom, band.len()));
    for line in &band {
        crate::debug(&format!("  {}", line));
    }

    if band.len() < MIN_LINES_FOR_SUCCESS {
        return Err(SolveError::Segmentation {
            survivors: band.len(),
        });
    }

    let first_option = band.len() - NUM_OPTIONS;
    let text = band[..first_option]
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let options: [String; NUM_OPTIONS] =
        std::array::from_fn(|i| band[first_option + i].text.clone());

    Ok(Question::new(text, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::BoundingBox;

    fn line(text: &str, x1: i32, y1: i32) -> TextLine {
        TextLine {
            text: text.to_string(),
            confidence: 90.0,
            bbox: BoundingBox::new(x1, y1, x1 + 200, y1 + 30),
        }
    }

    fn cluster(x: i32) -> Option<ColumnCluster> {
        Some(ColumnCluster { x, streak: 3 })
    }

    #[test]
    fn test_last_three_lines_are_options() {
        let lines = vec![
            line("Who wrote", 40, 100),
            line("Hamlet?", 40, 140),
            line("Shakespeare", 45, 200),
            line("Marlowe", 45, 260),
            line("Jonson", 45, 320),
        ];
        let q = partition_question(&lines, cluster(45)).unwrap();
        assert_eq!(q.text, "Who wrote Hamlet?");
        assert_eq!(q.options, ["Shakespeare".to_string(), "Marlowe".to_string(), "Jonson".to_string()]);
    }

    #[test]
    fn test_band_recovers_misaligned_lines() {
        let lines = vec![
            line("status bar", 500, 10),
            line("In which year did", 40, 100),
            line("the wall fall?", 150, 140),
            line("1987", 40, 200),
            line("1989", 40, 260),
            line("1991", 40, 320),
        ];
        let q = partition_question(&lines, cluster(40)).unwrap();
        assert_eq!(q.text, "In which year did the wall fall?");
        assert_eq!(q.options[2], "1991");
    }

    #[test]
    fn test_lines_outside_band_are_dropped() {
        let lines = vec![
            line("top banner", 300, 20),
            line("Question", 40, 100),
            line("A", 40, 200),
            line("B", 40, 260),
            line("C", 40, 320),
            line("bottom ad", 300, 700),
        ];
        let q = partition_question(&lines, cluster(40)).unwrap();
        assert_eq!(q.text, "Question");
        assert_eq!(q.options, ["A".to_string(), "B".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_too_few_lines_fail() {
        let lines = vec![line("A", 40, 200), line("B", 40, 260), line("C", 40, 320)];
        match partition_question(&lines, cluster(40)) {
            Err(SolveError::Segmentation { survivors }) => assert_eq!(survivors, 3),
            other => panic!("expected segmentation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_no_cluster_fails() {
        let lines = vec![line("A", 400, 200)];
        assert!(matches!(
            partition_question(&lines, None),
            Err(SolveError::Segmentation { survivors: 0 })
        ));
    }

    #[test]
    fn test_multi_line_question_with_many_survivors() {
        let lines: Vec<TextLine> = (0..8)
            .map(|i| line(&format!("l{}", i), 40, 100 + i * 40))
            .collect();
        let q = partition_question(&lines, cluster(40)).unwrap();
        assert_eq!(q.text, "l0 l1 l2 l3 l4");
        assert_eq!(q.options, ["l5".to_string(), "l6".to_string(), "l7".to_string()]);
    }
}
