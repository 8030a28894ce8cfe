//! Local resume summary: name, email and recognised skills. No LLM call.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::skills::SkillMatcher;

// First capitalised word pair, e.g. "Jane Doe".
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+\s[A-Z][a-z]+").expect("valid name regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("valid email regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub name: Option<String>,
    pub email: Option<String>,
    pub skills: Vec<String>,
}

pub fn summarize(text: &str, matcher: &SkillMatcher) -> ResumeSummary {
    ResumeSummary {
        name: NAME_RE.find(text).map(|m| m.as_str().to_string()),
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        skills: matcher.find(text).into_iter().collect(),
    }
}
