use super::filter::QueryFilter;
use super::method::{ScoringMethod, Strategy, METHOD_COUNT};
use super::scheduler::SearchOutcome;
use super::search::Payload;
use crate::segment::NUM_OPTIONS;

/// Method totals at or below this are left unscaled.
pub const NORMALIZE_EPSILON: f64 = 0.5;

/// Scale each method is normalized to.
const METHOD_SCALE: f64 = 100.0;

/// Raw score of one outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub option_index: usize,
    pub raw_score: f64,
    pub method: ScoringMethod,
}

/// Scores every outcome with its method. Failed outcomes score zero.
pub fn score_outcomes(outcomes: &[SearchOutcome], filter: &QueryFilter) -> Vec<ScoreEntry> {
    outcomes
        .iter()
        .map(|outcome| {
            let raw_score = match &outcome.payload {
                Payload::Document(doc) => {
                    let filtered = filter.apply(&outcome.option);
                    outcome.method.score_result(doc, &outcome.option, &filtered)
                }
                Payload::Failed | Payload::Blocked => 0.0,
            };
            crate::debug(&format!(
                "[{}] '{}' -> {}",
                outcome.method, outcome.option, raw_score
            ));
            ScoreEntry {
                option_index: outcome.option_index,
                raw_score,
                method: outcome.method,
            }
        })
        .collect()
}

/// Sums raw scores into a method × option table.
pub fn raw_table(entries: &[ScoreEntry]) -> [[f64; NUM_OPTIONS]; METHOD_COUNT] {
    let mut table = [[0.0; NUM_OPTIONS]; METHOD_COUNT];
    for entry in entries {
        if entry.option_index < NUM_OPTIONS {
            table[entry.method.index()][entry.option_index] += entry.raw_score;
        }
    }
    table
}

/// Rescales one method's scores so they sum to 100.
pub fn normalize(raw: &[f64; NUM_OPTIONS]) -> [f64; NUM_OPTIONS] {
    let total: f64 = raw.iter().sum();
    if total > NORMALIZE_EPSILON {
        raw.map(|s| s * METHOD_SCALE / total)
    } else {
        *raw
    }
}

/// Normalizes every method, applies the negation sign and sums per option.
pub fn combine(table: &[[f64; NUM_OPTIONS]], negative: bool) -> [f64; NUM_OPTIONS] {
    let sign = if negative { -1.0 } else { 1.0 };
    let mut totals = [0.0; NUM_OPTIONS];
    for row in table {
        for (total, score) in totals.iter_mut().zip(normalize(row)) {
            *total += sign * score;
        }
    }
    totals
}

/// Index of the strictly highest score; ties go to the earliest option.
pub fn best_option(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::search::{SearchDocument, SearchItem};

    fn outcome(option_index: usize, option: &str, method: ScoringMethod, payload: Payload) -> SearchOutcome {
        SearchOutcome {
            payload,
            term: String::new(),
            option_index,
            option: option.to_string(),
            method,
        }
    }

    fn doc(snippet: &str) -> Payload {
        Payload::Document(SearchDocument {
            items: vec![SearchItem {
                title: String::new(),
                snippet: snippet.to_string(),
            }],
        })
    }

    #[test]
    fn test_normalize_rescales_to_hundred() {
        assert_eq!(normalize(&[3.0, 7.0, 0.0]), [30.0, 70.0, 0.0]);
        assert_eq!(normalize(&[0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_eq!(normalize(&[0.25, 0.25, 0.0]), [0.25, 0.25, 0.0]);
    }

    #[test]
    fn test_combine_two_methods() {
        let table = [[3.0, 7.0, 0.0], [0.0, 0.0, 0.0]];
        let totals = combine(&table, false);
        assert_eq!(totals, [30.0, 70.0, 0.0]);
        assert_eq!(best_option(&totals), 1);
    }

    #[test]
    fn test_negation_flips_sign_only() {
        let table = [[1.0, 3.0, 4.0], [2.0, 2.0, 0.0], [0.0, 5.0, 5.0]];
        let plain = combine(&table, false);
        let negated = combine(&table, true);

        for (p, n) in plain.iter().zip(negated.iter()) {
            assert!((p + n).abs() < 1e-9);
        }
        assert_eq!(best_option(&plain), 1);
        assert_eq!(best_option(&negated), 0);
    }

    #[test]
    fn test_best_option_first_wins_ties() {
        assert_eq!(best_option(&[5.0, 5.0, 1.0]), 0);
        assert_eq!(best_option(&[1.0, 5.0, 5.0]), 1);
        assert_eq!(best_option(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(best_option(&[-3.0, -1.0, -2.0]), 1);
    }

    #[test]
    fn test_score_outcomes_and_table() {
        let filter = QueryFilter::new(vec!["the".to_string()]);
        let outcomes = vec![
            outcome(0, "The Nile", ScoringMethod::Question, doc("nile nile the nile")),
            outcome(1, "Amazon", ScoringMethod::Question, doc("amazon")),
            outcome(2, "Yangtze", ScoringMethod::Question, Payload::Failed),
            outcome(0, "The Nile", ScoringMethod::VerbatimAndOption, doc("the nile")),
        ];

        let entries = score_outcomes(&outcomes, &filter);
        assert_eq!(entries[0].raw_score, 3.0);
        assert_eq!(entries[1].raw_score, 1.0);
        assert_eq!(entries[2].raw_score, 0.0);

        let table = raw_table(&entries);
        assert_eq!(table[ScoringMethod::Question.index()], [3.0, 1.0, 0.0]);
        assert_eq!(table[ScoringMethod::QuestionAndOption.index()], [0.0, 0.0, 0.0]);
        assert_eq!(table[ScoringMethod::VerbatimAndOption.index()], [1.0, 0.0, 0.0]);

        let totals = combine(&table, false);
        assert_eq!(totals, [175.0, 25.0, 0.0]);
    }
}
