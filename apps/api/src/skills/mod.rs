// Keyword-overlap skill matching.
// Pure, synchronous functions over in-memory sets. No I/O happens in this module.

pub mod gap;
pub mod ranker;
pub mod roles;
pub mod tokenizer;

use std::collections::BTreeSet;

/// A normalized (lower-cased, trimmed) skill or keyword.
pub type SkillToken = String;

/// A set of skill tokens. Ordered so that API responses are stable.
pub type SkillSet = BTreeSet<SkillToken>;

/// Skills derived from one résumé submission. Replaced, never merged, on re-submission.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CandidateProfile {
    pub skills: SkillSet,
}

impl CandidateProfile {
    pub fn from_text(text: &str) -> Self {
        Self {
            skills: tokenizer::extract(text),
        }
    }
}
