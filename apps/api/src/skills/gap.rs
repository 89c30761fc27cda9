//! Gap Analyzer: matched vs missing skills for one candidate against one role.

use serde::{Deserialize, Serialize};

use crate::skills::SkillSet;

/// Result of comparing a candidate's skills against a role's requirements.
///
/// `matched ∪ missing == required` and `matched ∩ missing == ∅`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub matched: SkillSet,
    pub missing: SkillSet,
}

impl GapReport {
    /// Share of required skills the candidate already has, 0.0 – 1.0.
    /// An empty requirement set counts as fully covered.
    pub fn coverage(&self) -> f64 {
        let total = self.matched.len() + self.missing.len();
        if total == 0 {
            return 1.0;
        }
        self.matched.len() as f64 / total as f64
    }
}

/// Partitions `required` into skills the candidate has and skills they lack.
pub fn analyze(candidate: &SkillSet, required: &SkillSet) -> GapReport {
    let (matched, missing): (SkillSet, SkillSet) = required
        .iter()
        .cloned()
        .partition(|skill| candidate.contains(skill));

    GapReport { matched, missing }
}
