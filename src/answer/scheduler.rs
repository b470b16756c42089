//! Concurrent fan-out of search queries.
//!
//! One scoped thread per (option, method) query. Each thread sends its
//! outcome over an mpsc channel; the scheduler drains the channel and only
//! returns once every thread has finished, so callers never see a partial
//! result set.

use std::sync::mpsc::channel;
use std::thread;

use super::method::{QueryContext, ScoringMethod, Strategy};
use super::search::{Payload, SearchBackend};
use crate::error::SolveError;
use crate::segment::Question;

/// A query bound to the option and method it scores.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub term: String,
    pub option_index: usize,
    pub option: String,
    pub method: ScoringMethod,
}

/// The result of running one `SearchQuery`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub payload: Payload,
    pub term: String,
    pub option_index: usize,
    pub option: String,
    pub method: ScoringMethod,
}

/// Builds one query per option and method, options outermost.
pub fn build_queries(question: &Question, phrase: &str) -> Vec<SearchQuery> {
    let mut queries = Vec::with_capacity(question.options.len() * ScoringMethod::ALL.len());
    for (option_index, option) in question.options.iter().enumerate() {
        let ctx = QueryContext {
            phrase,
            question: &question.text,
            option,
        };
        for method in ScoringMethod::ALL {
            queries.push(SearchQuery {
                term: method.build_query(&ctx),
                option_index,
                option: option.clone(),
                method,
            });
        }
    }
    queries
}

/// Runs every query concurrently and waits for all of them.
///
/// Transport and parse failures become `Payload::Failed` outcomes and leave
/// sibling queries alone. If any response was a bot-detection page the
/// whole batch fails with `SolveError::BotDetected`.
pub fn run_searches(
    backend: &dyn SearchBackend,
    queries: Vec<SearchQuery>,
    bot_marker: &str,
) -> Result<Vec<SearchOutcome>, SolveError> {
    let expected = queries.len();
    let (sender, receiver) = channel::<SearchOutcome>();

    let outcomes: Vec<SearchOutcome> = thread::scope(|scope| {
        for query in queries {
            let sender = sender.clone();
            scope.spawn(move || {
                let payload = Payload::from_response(backend.fetch(&query.term), bot_marker);
                let outcome = SearchOutcome {
                    payload,
                    term: query.term,
                    option_index: query.option_index,
                    option: query.option,
                    method: query.method,
                };
                // Receiver outlives the scope; send only fails if it was dropped
                let _ = sender.send(outcome);
            });
        }
        drop(sender);

        // Ends once every task has sent and dropped its sender
        receiver.iter().collect()
    });

    crate::debug(&format!(
        "search batch complete: {}/{} outcome(s)",
        outcomes.len(),
        expected
    ));

    if let Some(blocked) = outcomes.iter().find(|o| o.payload == Payload::Blocked) {
        crate::log("Search provider flagged automated traffic, aborting");
        return Err(SolveError::BotDetected {
            term: blocked.term.clone(),
        });
    }

    let failed = outcomes
        .iter()
        .filter(|o| o.payload == Payload::Failed)
        .count();
    if failed > 0 {
        crate::log(&format!("{} of {} search(es) failed and score zero", failed, expected));
    }

    Ok(outcomes)
}
