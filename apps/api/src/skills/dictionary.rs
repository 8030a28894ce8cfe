//! Skill Dictionary: parses the line-oriented definition source into a
//! canonical skill → variants mapping.
//!
//! Line shapes:
//! - `canonical: variant1, variant2, ...` (split on the first colon)
//! - `skill` (bare token, its own canonical name and sole variant)
//!
//! Blank lines are ignored. A later line for the same canonical key replaces
//! the earlier one. Malformed lines (empty canonical part, or no variants left
//! after dropping empty ones) are skipped with a warning and never abort the load.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::skills::SkillError;

/// Immutable canonical skill → variant list mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillDictionary {
    entries: BTreeMap<String, Vec<String>>,
}

/// Result of parsing a single definition line.
#[derive(Debug, PartialEq, Eq)]
enum ParsedLine {
    Blank,
    Entry { canonical: String, variants: Vec<String> },
    Malformed(&'static str),
}

impl SkillDictionary {
    /// Reads the definition file at `path`. A missing or unreadable file is an
    /// error, never an empty dictionary.
    pub fn load(path: &Path) -> Result<Self, SkillError> {
        let source =
            std::fs::read_to_string(path).map_err(|source| SkillError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        let dictionary = Self::parse(&source);
        debug!(
            "Loaded {} skills from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    pub fn parse(source: &str) -> Self {
        Self::from_lines(source.lines())
    }

    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries = BTreeMap::new();

        for (idx, line) in lines.into_iter().enumerate() {
            match parse_line(line) {
                ParsedLine::Blank => {}
                ParsedLine::Entry {
                    canonical,
                    variants,
                } => {
                    entries.insert(canonical, variants);
                }
                ParsedLine::Malformed(reason) => {
                    warn!("Skipping skill definition line {}: {reason}", idx + 1);
                }
            }
        }

        Self { entries }
    }

    #[cfg(test)]
    pub fn variants(&self, canonical: &str) -> Option<&[String]> {
        self.entries.get(canonical).map(Vec::as_slice)
    }

    /// Iterates entries in canonical-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(canonical, variants)| (canonical.as_str(), variants.as_slice()))
    }

    #[cfg(test)]
    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.contains_key(canonical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Blank;
    }

    let Some((canonical, rest)) = line.split_once(':') else {
        let skill = line.to_lowercase();
        return ParsedLine::Entry {
            canonical: skill.clone(),
            variants: vec![skill],
        };
    };

    let canonical = canonical.trim().to_lowercase();
    if canonical.is_empty() {
        return ParsedLine::Malformed("empty canonical name");
    }

    let variants: Vec<String> = rest
        .split(',')
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();
    if variants.is_empty() {
        return ParsedLine::Malformed("no variants after colon");
    }

    ParsedLine::Entry {
        canonical,
        variants,
    }
}
