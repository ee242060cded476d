//! LinkedIn collaborator — profile lookup and job search behind one capability trait.
//!
//! Implementations never return errors: profile failures come back as a
//! `ProfileData` with `error` set, search failures as an empty list.

pub mod client;
pub mod models;
pub mod query;

use async_trait::async_trait;

use crate::linkedin::models::{ActionResult, JobListing, ProfileData};

/// Carried in `AppState` and the bot as `Arc<dyn LinkedInApi>`.
#[async_trait]
pub trait LinkedInApi: Send + Sync {
    async fn get_profile(&self) -> ProfileData;

    async fn search_jobs(
        &self,
        role: &str,
        location: Option<&str>,
        keywords: Option<&[String]>,
    ) -> Vec<JobListing>;

    async fn set_profile_url(&self, profile_url: &str) -> ActionResult;

    async fn refresh_profile(&self) -> ActionResult;
}
