//! Word-list settings file.
//!
//! Two bracket-headed sections, one entry per line:
//!
//! ```text
//! [filtered words]
//! which
//! ?
//! [negative words]
//! not
//! ```
//!
//! Blank lines are ignored. Entries are trimmed and lowercased. Anything
//! before the first header, or under an unknown header, is rejected.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;

/// Name of the word-list file looked up next to the executable.
pub const SETTINGS_FILE_NAME: &str = "settings.txt";

/// Stop words and negation markers, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordLists {
    /// Removed from text before searching
    pub filtered: Vec<String>,
    /// Unquoted presence inverts the question's polarity
    pub negative: Vec<String>,
}

#[derive(Clone, Copy)]
enum Section {
    Filtered,
    Negative,
}

impl WordLists {
    pub fn parse(contents: &str) -> Result<Self, SettingsError> {
        let mut lists = WordLists::default();
        let mut section: Option<Section> = None;

        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = match header.trim().to_lowercase().as_str() {
                    "filtered words" => Some(Section::Filtered),
                    "negative words" => Some(Section::Negative),
                    _ => {
                        return Err(SettingsError::UnknownSection {
                            line: idx + 1,
                            header: header.to_string(),
                        });
                    }
                };
                continue;
            }

            let entry = line.to_lowercase();
            match section {
                Some(Section::Filtered) => lists.filtered.push(entry),
                Some(Section::Negative) => lists.negative.push(entry),
                None => {
                    return Err(SettingsError::EntryBeforeHeader {
                        line: idx + 1,
                        entry,
                    });
                }
            }
        }

        Ok(lists)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lists = Self::parse(&contents)?;
        crate::log(&format!(
            "Loaded {} filtered word(s) and {} negative word(s) from {}",
            lists.filtered.len(),
            lists.negative.len(),
            path.display()
        ));
        Ok(lists)
    }
}

/// Picks the word-list file: the first explicit path given, otherwise the
/// first existing default location.
pub fn find_settings_file(explicit: &[Option<&Path>]) -> Result<PathBuf, SettingsError> {
    if let Some(path) = explicit.iter().flatten().next() {
        return Ok(path.to_path_buf());
    }

    let mut candidates = vec![crate::paths::get_exe_dir().join(SETTINGS_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("trivia-solver").join(SETTINGS_FILE_NAME));
    }

    if let Some(found) = candidates.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    Err(SettingsError::NotFound {
        searched: candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}
