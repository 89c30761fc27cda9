//! Career pipeline: the one place the four features are wired together.
//!
//! Variation points:
//! - `RoleSource`: skill gap against the static role table, or forwarded to the model.
//! - `ListingSource`: mock catalog or the live job-search API.
//!
//! Generative and listing failures never abort a request. They come back as a
//! best-effort result with the error attached; retrying is the caller's call.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::career::prompts::{resume_review_prompt, skill_gap_prompt};
use crate::errors::AdapterError;
use crate::listings::ListingSource;
use crate::llm_client::GenerativeAdapter;
use crate::models::listing::RankedListing;
use crate::skills::gap::{analyze, GapReport};
use crate::skills::ranker::rank;
use crate::skills::roles::{RoleTable, UnknownRoleError};
use crate::skills::CandidateProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleSource {
    /// Look the role up in the static table and compute a `GapReport`.
    Table,
    /// Skip the table; ask the model to compare the résumé to any role name.
    FreeText,
}

impl FromStr for RoleSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(RoleSource::Table),
            "free_text" | "free-text" => Ok(RoleSource::FreeText),
            other => anyhow::bail!("ROLE_SOURCE must be 'table' or 'free_text', got '{other}'"),
        }
    }
}

/// Model output, or the reason there is none. Prose only; never parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub text: Option<String>,
    pub error: Option<String>,
}

impl Advisory {
    fn from_result(result: Result<String, AdapterError>) -> Self {
        match result {
            Ok(text) => Self {
                text: Some(text),
                error: None,
            },
            Err(e) => {
                warn!("Generative adapter failed: {e}");
                Self {
                    text: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SkillGapOutcome {
    Table { role: String, report: GapReport },
    FreeText { role: String, advice: Advisory },
}

#[derive(Debug, Clone, Serialize)]
pub struct JobSearchOutcome {
    pub source: &'static str,
    pub results: Vec<RankedListing>,
    pub error: Option<String>,
}

pub struct CareerPipeline {
    roles: RoleTable,
    role_source: RoleSource,
    generator: Arc<dyn GenerativeAdapter>,
    listings: Arc<dyn ListingSource>,
}

impl CareerPipeline {
    pub fn new(
        roles: RoleTable,
        role_source: RoleSource,
        generator: Arc<dyn GenerativeAdapter>,
        listings: Arc<dyn ListingSource>,
    ) -> Self {
        Self {
            roles,
            role_source,
            generator,
            listings,
        }
    }

    pub fn role_source(&self) -> RoleSource {
        self.role_source
    }

    pub fn roles(&self) -> Vec<String> {
        self.roles.roles()
    }

    /// Open-ended strengths / weaknesses / suggestions for a résumé.
    pub async fn review_resume(&self, resume_text: &str) -> Advisory {
        Advisory::from_result(self.generator.generate(&resume_review_prompt(resume_text)).await)
    }

    /// Compares the candidate to `role`.
    ///
    /// `mode` overrides the configured `RoleSource` for this call. On the table
    /// path an unconfigured role fails with `UnknownRoleError`; callers can retry
    /// on the free-text path.
    pub async fn skill_gap(
        &self,
        resume_text: &str,
        profile: &CandidateProfile,
        role: &str,
        mode: Option<RoleSource>,
    ) -> Result<SkillGapOutcome, UnknownRoleError> {
        let role = role.trim().to_string();

        match mode.unwrap_or(self.role_source) {
            RoleSource::Table => {
                let required = self.roles.requirements_for(&role)?;
                let report = analyze(&profile.skills, required);
                info!(
                    "Skill gap for '{}': {} matched, {} missing ({:.0}% coverage)",
                    role,
                    report.matched.len(),
                    report.missing.len(),
                    report.coverage() * 100.0
                );
                Ok(SkillGapOutcome::Table { role, report })
            }
            RoleSource::FreeText => {
                let prompt = skill_gap_prompt(&role, resume_text);
                let advice = Advisory::from_result(self.generator.generate(&prompt).await);
                Ok(SkillGapOutcome::FreeText { role, advice })
            }
        }
    }

    /// Fetches listings and ranks them against the candidate's skills.
    /// Order follows the source; listings with no overlap are dropped.
    pub async fn search_jobs(
        &self,
        profile: &CandidateProfile,
        query: &str,
        location: &str,
    ) -> JobSearchOutcome {
        let source = self.listings.name();

        match self.listings.search(query, location).await {
            Ok(listings) => {
                let results = rank(&profile.skills, &listings);
                info!(
                    "Job search via {}: {} postings, {} with overlap",
                    source,
                    listings.len(),
                    results.len()
                );
                JobSearchOutcome {
                    source,
                    results,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Listing source {} failed: {e}", source);
                JobSearchOutcome {
                    source,
                    results: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Free-form question, forwarded verbatim.
    pub async fn ask(&self, question: &str) -> Advisory {
        Advisory::from_result(self.generator.generate(question).await)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::listings::MockListingSource;
    use crate::models::listing::JobListing;

    /// Records prompts and answers with a fixed reply (or a fixed failure).
    #[derive(Default)]
    pub(crate) struct StubGenerator {
        pub prompts: Mutex<Vec<String>>,
        pub fail: bool,
    }

    #[async_trait]
    impl GenerativeAdapter for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
            self.prompts.lock().push(prompt.to_string());
            if self.fail {
                Err(AdapterError::Quota("daily limit reached".to_string()))
            } else {
                Ok("**Advice:** keep going".to_string())
            }
        }
    }

    pub(crate) struct FailingListings;

    #[async_trait]
    impl ListingSource for FailingListings {
        async fn search(&self, _: &str, _: &str) -> Result<Vec<JobListing>, AdapterError> {
            Err(AdapterError::Network("connection refused".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn pipeline(generator: Arc<StubGenerator>, listings: Arc<dyn ListingSource>) -> CareerPipeline {
        CareerPipeline::new(RoleTable::default(), RoleSource::Table, generator, listings)
    }

    const RESUME: &str = "Experienced Python developer with SQL statistics pandas and Docker";

    #[test]
    fn test_role_source_parses() {
        assert_eq!("table".parse::<RoleSource>().unwrap(), RoleSource::Table);
        assert_eq!("Free_Text".parse::<RoleSource>().unwrap(), RoleSource::FreeText);
        assert!("llm".parse::<RoleSource>().is_err());
    }

    #[tokio::test]
    async fn test_skill_gap_table_path() {
        let generator = Arc::new(StubGenerator::default());
        let p = pipeline(generator.clone(), Arc::new(MockListingSource::default()));
        let profile = CandidateProfile::from_text(RESUME);

        let outcome = p.skill_gap(RESUME, &profile, "data scientist", None).await.unwrap();
        match outcome {
            SkillGapOutcome::Table { report, .. } => {
                assert!(report.matched.contains("python"));
                assert!(report.matched.contains("statistics"));
                // "SQL" is three characters: never extracted, always missing.
                assert!(report.missing.contains("sql"));
            }
            other => panic!("expected table outcome, got {other:?}"),
        }
        assert!(generator.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_skill_gap_unknown_role_on_table_path() {
        let p = pipeline(
            Arc::new(StubGenerator::default()),
            Arc::new(MockListingSource::default()),
        );
        let err = p
            .skill_gap(RESUME, &CandidateProfile::default(), "Astronaut", None)
            .await
            .unwrap_err();
        assert_eq!(err.role, "Astronaut");
    }

    #[tokio::test]
    async fn test_skill_gap_free_text_forwards_to_model() {
        let generator = Arc::new(StubGenerator::default());
        let p = pipeline(generator.clone(), Arc::new(MockListingSource::default()));

        let outcome = p
            .skill_gap(
                RESUME,
                &CandidateProfile::default(),
                "Astronaut",
                Some(RoleSource::FreeText),
            )
            .await
            .unwrap();

        match outcome {
            SkillGapOutcome::FreeText { role, advice } => {
                assert_eq!(role, "Astronaut");
                assert!(advice.text.is_some());
                assert!(advice.error.is_none());
            }
            other => panic!("expected free-text outcome, got {other:?}"),
        }
        let prompts = generator.prompts.lock();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("job role: Astronaut"));
        assert!(prompts[0].contains(RESUME));
    }

    #[tokio::test]
    async fn test_generator_failure_is_attached_not_raised() {
        let generator = Arc::new(StubGenerator {
            fail: true,
            ..StubGenerator::default()
        });
        let p = pipeline(generator, Arc::new(MockListingSource::default()));

        let advisory = p.review_resume(RESUME).await;
        assert!(advisory.text.is_none());
        assert_eq!(advisory.error.as_deref(), Some("quota exceeded: daily limit reached"));
    }

    #[tokio::test]
    async fn test_search_jobs_ranks_in_source_order() {
        let p = pipeline(
            Arc::new(StubGenerator::default()),
            Arc::new(MockListingSource::default()),
        );
        let profile = CandidateProfile::from_text(RESUME);

        let outcome = p.search_jobs(&profile, "", "").await;
        assert_eq!(outcome.source, "mock");
        assert!(outcome.error.is_none());
        let titles: Vec<_> = outcome.results.iter().map(|r| r.listing.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Data Scientist",
                "Backend Developer",
                "DevOps Engineer",
                "Machine Learning Engineer",
                "Data Analyst"
            ]
        );
        assert!(outcome.results.iter().all(|r| r.score > 0));
    }

    #[tokio::test]
    async fn test_search_jobs_failure_returns_empty_with_error() {
        let p = pipeline(Arc::new(StubGenerator::default()), Arc::new(FailingListings));
        let outcome = p
            .search_jobs(&CandidateProfile::from_text(RESUME), "python", "")
            .await;
        assert!(outcome.results.is_empty());
        assert_eq!(
            outcome.error.as_deref(),
            Some("network error: connection refused")
        );
    }

    #[tokio::test]
    async fn test_ask_forwards_question_verbatim() {
        let generator = Arc::new(StubGenerator::default());
        let p = pipeline(generator.clone(), Arc::new(MockListingSource::default()));
        p.ask("What is a good resume length?").await;
        assert_eq!(
            generator.prompts.lock().as_slice(),
            ["What is a good resume length?".to_string()]
        );
    }
}
