//! Skill Matcher: finds which canonical skills occur in free-form text.
//!
//! Every distinct variant is compiled into a single Aho-Corasick automaton.
//! The lower-cased text is scanned once with overlapping search, so a variant
//! nested in or overlapping another variant is still seen. A hit counts only
//! when it is a whole word or phrase: the characters immediately before and
//! after it must not be alphanumeric or `_`. Variants are literals, so `c++`,
//! `ci/cd` and `.net` carry no pattern syntax.

use std::collections::{BTreeSet, HashMap};

use aho_corasick::{AhoCorasick, MatchKind};

use crate::skills::{SkillDictionary, SkillError};

/// Compiled, immutable matcher. Safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    automaton: Option<AhoCorasick>,
    /// Indexed by automaton pattern id: the canonical skills owning that variant.
    owners: Vec<Vec<usize>>,
    canonicals: Vec<String>,
}

impl SkillMatcher {
    pub fn new(dictionary: &SkillDictionary) -> Result<Self, SkillError> {
        let mut canonicals = Vec::with_capacity(dictionary.len());
        let mut patterns: Vec<String> = Vec::new();
        let mut owners: Vec<Vec<usize>> = Vec::new();
        let mut pattern_ids: HashMap<String, usize> = HashMap::new();

        for (canonical, variants) in dictionary.iter() {
            let canonical_idx = canonicals.len();
            canonicals.push(canonical.to_string());

            for variant in variants.iter().filter(|v| !v.is_empty()) {
                let pid = *pattern_ids.entry(variant.clone()).or_insert_with(|| {
                    patterns.push(variant.clone());
                    owners.push(Vec::new());
                    patterns.len() - 1
                });
                if !owners[pid].contains(&canonical_idx) {
                    owners[pid].push(canonical_idx);
                }
            }
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::Standard)
                    .build(&patterns)?,
            )
        };

        Ok(Self {
            automaton,
            owners,
            canonicals,
        })
    }

    /// Returns the canonical skills with at least one whole-word variant in `text`.
    pub fn find(&self, text: &str) -> BTreeSet<String> {
        let Some(automaton) = &self.automaton else {
            return BTreeSet::new();
        };

        let haystack = text.to_lowercase();
        let mut found = vec![false; self.canonicals.len()];
        let mut remaining = self.canonicals.len();

        for hit in automaton.find_overlapping_iter(&haystack) {
            let owners = &self.owners[hit.pattern().as_usize()];
            if owners.iter().all(|&c| found[c]) {
                continue;
            }
            if !is_whole_word(&haystack, hit.start(), hit.end()) {
                continue;
            }
            for &c in owners {
                if !found[c] {
                    found[c] = true;
                    remaining -= 1;
                }
            }
            if remaining == 0 {
                break;
            }
        }

        found
            .iter()
            .zip(&self.canonicals)
            .filter(|(hit, _)| **hit)
            .map(|(_, canonical)| canonical.clone())
            .collect()
    }

    pub fn skill_count(&self) -> usize {
        self.canonicals.len()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `start..end` must lie on char boundaries, which holds for any match of a
/// UTF-8 pattern in a UTF-8 haystack.
fn is_whole_word(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
