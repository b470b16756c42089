//! Plain-text rendering of a solved question.

use crate::segment::Question;

/// Renders the question, its options with scores, and marks the chosen one.
pub fn render(question: &Question, best: usize) -> String {
    let mut out = format!("Q: {}\n", question.text);
    for (i, option) in question.options.iter().enumerate() {
        let marker = if i == best { "->" } else { "  " };
        match &question.scores {
            Some(scores) => {
                out.push_str(&format!("{} {}. {} ({:.1})\n", marker, i + 1, option, scores[i]));
            }
            None => out.push_str(&format!("{} {}. {}\n", marker, i + 1, option)),
        }
    }
    out
}
