/// Characters that open or close a quoted span.
pub(crate) fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\u{201C}' | '\u{201D}')
}

/// Builds search phrases by removing stop words outside quoted spans.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    stop_words: Vec<String>,
}

impl QueryFilter {
    /// `stop_words` are expected lowercased, as `WordLists` provides them.
    pub fn new(stop_words: Vec<String>) -> Self {
        Self { stop_words }
    }

    /// Removes stop words and punctuation markers from `text`.
    ///
    /// Tokens are scanned once from last to first. A token with an odd
    /// number of quote characters opens or closes a quoted span; boundary
    /// tokens and everything between them are left as-is. Unquoted tokens
    /// equal to a stop word are dropped, and single-character punctuation
    /// stop words are stripped out of the token instead.
    pub fn apply(&self, text: &str) -> String {
        let mut tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let mut quoted = false;

        for token in tokens.iter_mut().rev() {
            let boundary = token.chars().filter(|&c| is_quote(c)).count() % 2 == 1;
            if boundary {
                quoted = !quoted;
            }
            if quoted || boundary {
                continue;
            }

            for word in &self.stop_words {
                if token.is_empty() {
                    break;
                }
                if token.to_lowercase() == *word {
                    token.clear();
                } else if let Some(mark) = punctuation_mark(word) {
                    token.retain(|c| c != mark);
                }
            }
        }

        tokens.retain(|t| !t.is_empty());
        tokens.join(" ")
    }
}

/// A stop word that is one non-alphanumeric character.
fn punctuation_mark(word: &str) -> Option<char> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_alphanumeric() => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(words: &[&str]) -> QueryFilter {
        QueryFilter::new(words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn test_quoted_span_is_untouched() {
        let f = filter(&["can't", "not"]);
        assert_eq!(
            f.apply(r#"he can't leave "do not disturb" now"#),
            r#"he leave "do not disturb" now"#
        );
    }

    #[test]
    fn test_removes_words_case_insensitively() {
        let f = filter(&["which", "of", "these", "is", "a"]);
        assert_eq!(f.apply("Which of THESE is a mammal"), "mammal");
    }

    #[test]
    fn test_strips_punctuation_inside_tokens() {
        let f = filter(&["?", ","]);
        assert_eq!(f.apply("Paris, France?"), "Paris France");
    }

    #[test]
    fn test_token_reduced_to_nothing_is_dropped() {
        let f = filter(&["?", "what"]);
        assert_eq!(f.apply("what ? color"), "color");
    }

    #[test]
    fn test_stop_word_order_applies_per_token() {
        // "what?" only becomes "what" after the "?" pass, so it survives
        let f = filter(&["what", "?"]);
        assert_eq!(f.apply("what? color"), "what color");
    }

    #[test]
    fn test_quote_state_spans_all_stop_words() {
        let f = filter(&["the", "of", "?"]);
        assert_eq!(
            f.apply(r#"the title of "the lord of the rings" film?"#),
            r#"title "the lord of the rings" film"#
        );
    }

    #[test]
    fn test_quote_boundary_tokens_keep_punctuation() {
        let f = filter(&["who", ","]);
        assert_eq!(
            f.apply(r#"Who sang "Hello, Dolly" first"#),
            r#"sang "Hello, Dolly" first"#
        );
    }

    #[test]
    fn test_curly_quotes() {
        let f = filter(&["the"]);
        assert_eq!(
            f.apply("the song \u{201C}the end\u{201D} by"),
            "song \u{201C}the end\u{201D} by"
        );
    }

    #[test]
    fn test_whitespace_is_normalized() {
        assert_eq!(filter(&[]).apply("  spaced \t out  "), "spaced out");
        assert_eq!(filter(&["x"]).apply(""), "");
    }
}
