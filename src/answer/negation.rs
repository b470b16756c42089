use regex::Regex;

use super::filter::is_quote;
use crate::error::SettingsError;

/// Detects questions asking for the option that does *not* fit.
#[derive(Debug, Clone)]
pub struct NegationDetector {
    markers: Vec<Regex>,
}

impl NegationDetector {
    /// Compiles one pattern per marker: the marker text followed by a word boundary.
    pub fn new(markers: &[String]) -> Result<Self, SettingsError> {
        let markers = markers
            .iter()
            .map(|marker| {
                let pattern = format!(r"{}\b", regex::escape(&marker.to_lowercase()));
                Regex::new(&pattern).map_err(|source| SettingsError::BadMarker {
                    marker: marker.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { markers })
    }

    /// True when any marker occurs outside a quoted span.
    ///
    /// A match is quoted when an odd number of quote characters precede it.
    pub fn is_negative(&self, question: &str) -> bool {
        let text = question.to_lowercase();
        for marker in &self.markers {
            for m in marker.find_iter(&text) {
                let quotes = text[..m.start()].chars().filter(|&c| is_quote(c)).count();
                if quotes % 2 == 0 {
                    crate::debug(&format!("negation marker '{}' found", m.as_str()));
                    return true;
                }
            }
        }
        false
    }
}
