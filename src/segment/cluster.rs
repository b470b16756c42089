use super::{TextLine, GROUPING_THRESHOLD};

/// Coordinates further right than this are never part of the question column.
pub const MAX_LEFT_MARGIN: i32 = 200;

/// Representative x-coordinate of the dominant left-aligned column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnCluster {
    pub x: i32,
    /// Number of consecutive close neighbours that led to `x`.
    pub streak: usize,
}

/// Finds the longest run of mutually close left edges.
///
/// Left edges are scanned in ascending order. Values past `MAX_LEFT_MARGIN`
/// are skipped without breaking a run. The value that ends the strictly
/// longest run wins, so equal runs keep the earliest one.
///
/// Returns `None` when no line starts within the left margin.
pub fn find_dominant_column(lines: &[TextLine]) -> Option<ColumnCluster> {
    let mut xs: Vec<i32> = lines.iter().map(|l| l.bbox.x1).collect();
    xs.sort_unstable();

    let mut last: Option<i32> = None;
    let mut streak = 0usize;
    let mut best: Option<ColumnCluster> = None;

    for x in xs {
        if x > MAX_LEFT_MARGIN {
            continue;
        }

        match last {
            Some(prev) if (x - prev).abs() < GROUPING_THRESHOLD => streak += 1,
            _ => streak = 0,
        }
        last = Some(x);

        if best.is_none_or(|b| streak > b.streak) {
            best = Some(ColumnCluster { x, streak });
        }
    }

    best
}
