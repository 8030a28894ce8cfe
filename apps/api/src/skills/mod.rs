// Skill engine: dictionary loading and whole-word variant matching.
// Pure and synchronous. The HTTP layer calls into it after text extraction.

pub mod dictionary;
pub mod matcher;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use dictionary::SkillDictionary;
pub use matcher::SkillMatcher;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("skill definitions unavailable at '{}': {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile skill variants: {0}")]
    Automaton(#[from] aho_corasick::BuildError),
}

/// Loads the definition file at `path` and compiles it into a matcher.
pub fn load_matcher(path: &Path) -> Result<SkillMatcher, SkillError> {
    let dictionary = SkillDictionary::load(path)?;
    SkillMatcher::new(&dictionary)
}
