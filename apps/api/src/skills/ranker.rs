//! Listing Ranker: scores postings by skill overlap with the candidate.
//!
//! Output order is input order with zero-score listings removed. No sort by score
//! is performed; callers that want best-first ordering sort the result themselves.

use crate::models::listing::{JobListing, RankedListing};
use crate::skills::SkillSet;

/// Scores each listing by `|candidate ∩ listing.required_skills|` and drops
/// listings with no overlap.
pub fn rank(candidate: &SkillSet, listings: &[JobListing]) -> Vec<RankedListing> {
    listings
        .iter()
        .filter_map(|listing| {
            let score = overlap(candidate, &listing.required_skills);
            (score > 0).then(|| RankedListing {
                listing: listing.clone(),
                score,
            })
        })
        .collect()
}

fn overlap(a: &SkillSet, b: &SkillSet) -> u32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|s| large.contains(*s)).count() as u32
}
