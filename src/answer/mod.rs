//! Answer inference: question card in, per-option scores out.
//!
//! The question is reduced to a search phrase, checked for negation, and
//! every (option, method) pair is searched concurrently. Each method's hits
//! are normalized to a 0-100 scale before the methods are summed.

pub mod aggregate;
pub mod filter;
pub mod method;
pub mod negation;
pub mod scheduler;
pub mod search;
pub mod settings;

pub use filter::QueryFilter;
pub use negation::NegationDetector;
pub use search::{HttpSearch, SearchBackend};
pub use settings::{find_settings_file, WordLists};

use crate::error::{SettingsError, SolveError};
use crate::segment::Question;

/// Everything needed to answer questions, built once at startup.
pub struct Solver {
    filter: QueryFilter,
    negation: NegationDetector,
    backend: Box<dyn SearchBackend>,
    bot_marker: String,
}

impl Solver {
    pub fn new(
        words: &WordLists,
        backend: Box<dyn SearchBackend>,
        bot_marker: impl Into<String>,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            filter: QueryFilter::new(words.filtered.clone()),
            negation: NegationDetector::new(&words.negative)?,
            backend,
            bot_marker: bot_marker.into(),
        })
    }

    /// Scores every option, stores the scores on `question` and returns
    /// the index of the chosen option.
    pub fn infer_answer(&self, question: &mut Question) -> Result<usize, SolveError> {
        let phrase = self.filter.apply(&question.text);
        let negative = self.negation.is_negative(&question.text);
        crate::debug(&format!("search phrase: '{}' (negative: {})", phrase, negative));

        let queries = scheduler::build_queries(question, &phrase);
        let outcomes = scheduler::run_searches(self.backend.as_ref(), queries, &self.bot_marker)?;

        let entries = aggregate::score_outcomes(&outcomes, &self.filter);
        let scores = aggregate::combine(&aggregate::raw_table(&entries), negative);
        question.scores = Some(scores);

        Ok(aggregate::best_option(&scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    /// Canned responses keyed on a substring of the query.
    struct Canned(Vec<(&'static str, &'static str)>);

    impl SearchBackend for Canned {
        fn fetch(&self, term: &str) -> Result<String> {
            for (needle, body) in &self.0 {
                if term.contains(needle) {
                    return Ok(body.to_string());
                }
            }
            Ok(r#"{"items": []}"#.to_string())
        }
    }

    fn words() -> WordLists {
        WordLists::parse(
            "[filtered words]\nwhich\nof\nthese\nis\nthe\na\n?\n[negative words]\nnot\n",
        )
        .unwrap()
    }

    fn question(text: &str) -> Question {
        Question::new(
            text.to_string(),
            ["Venus".to_string(), "Mars".to_string(), "Jupiter".to_string()],
        )
    }

    const RESULTS: &str = r#"{"items": [
        {"title": "Mars, the Red Planet", "snippet": "Mars appears red. Venus is bright."},
        {"title": "Why is Mars red?", "snippet": "Iron oxide on Mars"}
    ]}"#;

    #[test]
    fn test_infers_most_correlated_option() {
        let solver = Solver::new(&words(), Box::new(Canned(vec![("red planet", RESULTS)])), "unusual traffic")
            .unwrap();
        let mut q = question("Which of these is the red planet?");

        let best = solver.infer_answer(&mut q).unwrap();

        assert_eq!(best, 1);
        let scores = q.scores.unwrap();
        assert!(scores[1] > scores[0]);
        assert!(scores[0] > scores[2]);
    }

    #[test]
    fn test_negated_question_picks_least_correlated() {
        let solver = Solver::new(&words(), Box::new(Canned(vec![("red planet", RESULTS)])), "unusual traffic")
            .unwrap();
        let mut q = question("Which of these is NOT the red planet?");

        let best = solver.infer_answer(&mut q).unwrap();

        assert_eq!(best, 2);
        assert!(q.scores.unwrap().iter().all(|s| *s <= 0.0));
    }

    #[test]
    fn test_bot_detection_propagates() {
        let solver = Solver::new(
            &words(),
            Box::new(Canned(vec![("planet", "sorry, unusual traffic")])),
            "unusual traffic",
        )
        .unwrap();
        let mut q = question("Which is the red planet?");

        assert!(matches!(
            solver.infer_answer(&mut q),
            Err(SolveError::BotDetected { .. })
        ));
        assert!(q.scores.is_none());
    }

    #[test]
    fn test_no_hits_defaults_to_first_option() {
        let solver = Solver::new(&words(), Box::new(Canned(Vec::new())), "unusual traffic").unwrap();
        let mut q = question("Which is the red planet?");

        assert_eq!(solver.infer_answer(&mut q).unwrap(), 0);
        assert_eq!(q.scores, Some([0.0, 0.0, 0.0]));
    }
}
