//! Listing sources: where job postings come from for a search.
//!
//! `MockListingSource` serves a fixed catalog; `JSearchListingSource` forwards
//! to the third-party job-search API. Both are swapped at startup via `JOB_SOURCE`.

pub mod jsearch;
pub mod mock;

use async_trait::async_trait;

use crate::errors::AdapterError;
use crate::models::listing::JobListing;

pub use jsearch::JSearchListingSource;
pub use mock::MockListingSource;

#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Returns postings for `query` near `location` (empty = anywhere).
    async fn search(&self, query: &str, location: &str) -> Result<Vec<JobListing>, AdapterError>;

    /// Short backend label for logs.
    fn name(&self) -> &'static str;
}
