use serde::{Deserialize, Serialize};

use crate::skills::SkillSet;

/// A job posting, either from the static catalog or fetched per search. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub employer: String,
    pub required_skills: SkillSet,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub apply_link: Option<String>,
}

impl JobListing {
    /// Human-readable "City, State, Country" with missing parts skipped.
    pub fn location_label(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A listing paired with its overlap score, `0 ..= listing.required_skills.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedListing {
    pub listing: JobListing,
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_label_skips_missing_parts() {
        let listing = JobListing {
            title: "Engineer".to_string(),
            employer: "Acme".to_string(),
            required_skills: SkillSet::new(),
            city: Some("Austin".to_string()),
            state: None,
            country: Some("US".to_string()),
            apply_link: None,
        };
        assert_eq!(listing.location_label(), "Austin, US");
    }

    #[test]
    fn test_listing_deserializes_without_optional_fields() {
        let json = r#"{"title": "Analyst", "employer": "Globex", "required_skills": ["excel"]}"#;
        let listing: JobListing = serde_json::from_str(json).unwrap();
        assert!(listing.city.is_none());
        assert!(listing.required_skills.contains("excel"));
    }
}
