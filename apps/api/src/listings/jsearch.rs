//! JSearch (RapidAPI) listing source. A thin pass-through: one request per search.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AdapterError;
use crate::listings::ListingSource;
use crate::models::listing::JobListing;
use crate::skills::{tokenizer, SkillSet};

const DEFAULT_BASE_URL: &str = "https://jsearch.p.rapidapi.com";
const RAPIDAPI_HOST: &str = "jsearch.p.rapidapi.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<JSearchJob>,
}

#[derive(Debug, Deserialize)]
struct JSearchJob {
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_country: Option<String>,
    job_apply_link: Option<String>,
    job_required_skills: Option<Vec<String>>,
    job_highlights: Option<JobHighlights>,
}

#[derive(Debug, Deserialize)]
struct JobHighlights {
    #[serde(rename = "Qualifications", default)]
    qualifications: Vec<String>,
}

#[derive(Clone)]
pub struct JSearchListingSource {
    client: Client,
    api_key: String,
    base_url: String,
}

impl JSearchListingSource {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl ListingSource for JSearchListingSource {
    async fn search(&self, query: &str, location: &str) -> Result<Vec<JobListing>, AdapterError> {
        let full_query = build_query(query, location);

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .query(&[("query", full_query.as_str()), ("page", "1"), ("num_pages", "1")])
            .send()
            .await
            .map_err(|e| AdapterError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Job search API returned {}: {}", status, message);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdapterError::Auth(message),
                StatusCode::TOO_MANY_REQUESTS => AdapterError::Quota(message),
                _ => AdapterError::Upstream {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Decode(e.to_string()))?;

        debug!("Job search returned {} postings", body.data.len());
        Ok(body.data.into_iter().map(into_listing).collect())
    }

    fn name(&self) -> &'static str {
        "jsearch"
    }
}

fn build_query(query: &str, location: &str) -> String {
    let (query, location) = (query.trim(), location.trim());
    if location.is_empty() {
        query.to_string()
    } else {
        format!("{query} in {location}")
    }
}

/// Postings rarely carry `job_required_skills`; when absent, the qualification
/// bullets go through the same tokenizer as résumé text so scores stay comparable.
fn into_listing(job: JSearchJob) -> JobListing {
    let required_skills: SkillSet = match job.job_required_skills {
        Some(skills) if !skills.is_empty() => skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => job
            .job_highlights
            .map(|h| tokenizer::extract(&h.qualifications.join(" ")))
            .unwrap_or_default(),
    };

    JobListing {
        title: job.job_title.unwrap_or_default(),
        employer: job.employer_name.unwrap_or_default(),
        required_skills,
        city: job.job_city,
        state: job.job_state,
        country: job.job_country,
        apply_link: job.job_apply_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE_FIXTURE: &str = r#"{
        "status": "OK",
        "request_id": "abc",
        "data": [
            {
                "job_id": "1",
                "job_title": "Data Engineer",
                "employer_name": "Initech",
                "job_city": "Chicago",
                "job_state": "IL",
                "job_country": "US",
                "job_apply_link": "https://example.com/apply/1",
                "job_required_skills": ["Python", " Spark ", ""],
                "job_highlights": {"Qualifications": ["Airflow experience"]}
            },
            {
                "job_id": "2",
                "job_title": "Analytics Engineer",
                "employer_name": null,
                "job_required_skills": null,
                "job_highlights": {"Qualifications": ["Strong SQL and dbt", "Looker dashboards"]}
            }
        ]
    }"#;

    #[test]
    fn test_build_query_appends_location() {
        assert_eq!(build_query("rust developer", "Berlin"), "rust developer in Berlin");
        assert_eq!(build_query(" rust developer ", "  "), "rust developer");
    }

    #[test]
    fn test_fixture_maps_to_listings() {
        let parsed: SearchResponse = serde_json::from_str(RESPONSE_FIXTURE).unwrap();
        let listings: Vec<_> = parsed.data.into_iter().map(into_listing).collect();
        assert_eq!(listings.len(), 2);

        let first = &listings[0];
        assert_eq!(first.title, "Data Engineer");
        assert_eq!(first.location_label(), "Chicago, IL, US");
        assert_eq!(
            first.required_skills,
            ["python", "spark"].iter().map(|s| s.to_string()).collect::<SkillSet>()
        );

        let second = &listings[1];
        assert_eq!(second.employer, "");
        // Qualification text tokenized: words of 3 chars or fewer are dropped.
        assert!(second.required_skills.contains("strong"));
        assert!(second.required_skills.contains("looker"));
        assert!(!second.required_skills.contains("sql"));
    }

    #[test]
    fn test_missing_data_field_is_empty() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"status": "OK"}"#).unwrap();
        assert!(parsed.data.is_empty());
    }
}
