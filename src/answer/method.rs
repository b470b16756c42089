//! Query-construction and scoring strategies.

use std::fmt;

use super::search::SearchDocument;

/// Inputs a strategy may use to build its query.
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'a> {
    /// Question with stop words removed
    pub phrase: &'a str,
    /// Question as recognized
    pub question: &'a str,
    pub option: &'a str,
}

/// The two operations every scoring method provides.
pub trait Strategy {
    fn build_query(&self, ctx: &QueryContext<'_>) -> String;

    /// Raw score for `option` given one search result document.
    /// `filtered_option` is the option with stop words removed.
    fn score_result(&self, doc: &SearchDocument, option: &str, filtered_option: &str) -> f64;
}

pub const METHOD_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoringMethod {
    /// Search the question alone; count options in the results
    Question,
    /// Search the question with the option as an exact phrase
    QuestionAndOption,
    /// Search the unfiltered question followed by the option
    VerbatimAndOption,
}

impl ScoringMethod {
    pub const ALL: [ScoringMethod; METHOD_COUNT] = [
        ScoringMethod::Question,
        ScoringMethod::QuestionAndOption,
        ScoringMethod::VerbatimAndOption,
    ];

    pub fn id(self) -> u8 {
        match self {
            ScoringMethod::Question => 0,
            ScoringMethod::QuestionAndOption => 1,
            ScoringMethod::VerbatimAndOption => 2,
        }
    }

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self.id() as usize
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoringMethod::Question => "question",
            ScoringMethod::QuestionAndOption => "question+option",
            ScoringMethod::VerbatimAndOption => "verbatim+option",
        };
        write!(f, "{}", name)
    }
}

impl Strategy for ScoringMethod {
    fn build_query(&self, ctx: &QueryContext<'_>) -> String {
        match self {
            ScoringMethod::Question => ctx.phrase.to_string(),
            ScoringMethod::QuestionAndOption => format!("{} \"{}\"", ctx.phrase, ctx.option),
            ScoringMethod::VerbatimAndOption => format!("{} {}", ctx.question, ctx.option),
        }
    }

    fn score_result(&self, doc: &SearchDocument, option: &str, filtered_option: &str) -> f64 {
        let text = doc.aggregated_text().to_lowercase();
        count_occurrences(&text, option).max(count_occurrences(&text, filtered_option)) as f64
    }
}

/// Non-overlapping, case-insensitive count of `needle` in an already
/// lowercased `haystack`. An empty needle never matches.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle.as_str()).count()
}
