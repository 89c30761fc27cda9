use async_trait::async_trait;

use crate::errors::AdapterError;
use crate::listings::ListingSource;
use crate::models::listing::JobListing;

const CATALOG: &[(&str, &str, &[&str], &str, &str)] = &[
    (
        "Data Scientist",
        "Northwind Analytics",
        &["python", "sql", "statistics", "pandas", "machine"],
        "New York",
        "US",
    ),
    (
        "Frontend Developer",
        "Bluebird Labs",
        &["javascript", "typescript", "react", "css", "testing"],
        "San Francisco",
        "US",
    ),
    (
        "Backend Developer",
        "Contoso Cloud",
        &["python", "java", "databases", "docker", "apis"],
        "Austin",
        "US",
    ),
    (
        "DevOps Engineer",
        "Initech",
        &["linux", "docker", "kubernetes", "terraform", "monitoring"],
        "Remote",
        "",
    ),
    (
        "Machine Learning Engineer",
        "Umbrella AI",
        &["python", "pytorch", "tensorflow", "mlops", "docker"],
        "London",
        "UK",
    ),
    (
        "Data Analyst",
        "Globex",
        &["excel", "sql", "tableau", "statistics", "communication"],
        "Toronto",
        "CA",
    ),
    (
        "Product Manager",
        "Hooli",
        &["roadmap", "analytics", "agile", "communication", "stakeholder"],
        "Remote",
        "",
    ),
];

/// Fixed in-process catalog of postings.
#[derive(Debug, Clone)]
pub struct MockListingSource {
    listings: Vec<JobListing>,
}

impl Default for MockListingSource {
    fn default() -> Self {
        let listings = CATALOG
            .iter()
            .map(|(title, employer, skills, city, country)| JobListing {
                title: title.to_string(),
                employer: employer.to_string(),
                required_skills: skills.iter().map(|s| s.to_string()).collect(),
                city: Some(city.to_string()),
                state: None,
                country: (!country.is_empty()).then(|| country.to_string()),
                apply_link: None,
            })
            .collect();
        Self { listings }
    }
}

impl MockListingSource {
    pub fn new(listings: Vec<JobListing>) -> Self {
        Self { listings }
    }
}

#[async_trait]
impl ListingSource for MockListingSource {
    async fn search(&self, query: &str, location: &str) -> Result<Vec<JobListing>, AdapterError> {
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let location = location.trim().to_lowercase();

        Ok(self
            .listings
            .iter()
            .filter(|l| {
                let title = l.title.to_lowercase();
                words.is_empty() || words.iter().any(|w| title.contains(w.as_str()))
            })
            .filter(|l| {
                let label = l.location_label().to_lowercase();
                location.is_empty() || label.contains(&location) || label.contains("remote")
            })
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
