use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::linkedin::models::{ActionResult, JobListing, ProfileData};
use crate::linkedin::query::build_search_query;
use crate::linkedin::LinkedInApi;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const JOBS_PAGE_URL: &str = "https://www.linkedin.com/jobs/";

#[derive(Debug, Error)]
pub enum LinkedInError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    profile: ProfileData,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatQuery<'a> {
    query: &'a str,
    conversation_history: [Value; 0],
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    reply: Option<Value>,
}

/// HTTP client for the LinkedIn bridge API. Bearer-authenticated JSON POSTs.
#[derive(Clone)]
pub struct LinkedInHttpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LinkedInHttpClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, LinkedInError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            base_url,
        })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, LinkedInError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            return Err(LinkedInError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("LinkedIn {path} returned {} bytes", text.len());
        Ok(serde_json::from_str(&text)?)
    }

    async fn fetch_profile(&self) -> Result<ProfileData, LinkedInError> {
        let envelope: ProfileEnvelope = self.post("/linkedin/profile", &json!({})).await?;

        if envelope.success {
            Ok(ProfileData {
                error: None,
                ..envelope.profile
            })
        } else {
            Ok(ProfileData::from_error(
                envelope
                    .error
                    .unwrap_or_else(|| "Failed to fetch profile".to_string()),
            ))
        }
    }

    async fn fetch_jobs(
        &self,
        role: &str,
        location: Option<&str>,
        keywords: Option<&[String]>,
    ) -> Result<Vec<JobListing>, LinkedInError> {
        let query = build_search_query(role, location, keywords);
        let reply: ChatReply = self
            .post(
                "/analyze-linkedin-chat",
                &ChatQuery {
                    query: &query,
                    conversation_history: [],
                },
            )
            .await?;

        let description = match reply.reply {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(Value::Null) | Some(Value::String(_)) | None => return Ok(Vec::new()),
            Some(other) => other.to_string(),
        };

        // The bridge answers with prose, not listings; surface it as one informational entry.
        Ok(vec![JobListing {
            title: Some(format!("Результаты поиска: {role}")),
            company: Some("LinkedIn".to_string()),
            location: Some(location.unwrap_or("Не указано").to_string()),
            job_type: Some("Информация из профиля".to_string()),
            description: Some(description),
            url: Some(JOBS_PAGE_URL.to_string()),
        }])
    }

    async fn post_action(&self, path: &str, body: Value, default_message: &str) -> ActionResult {
        match self.post::<_, ActionResult>(path, &body).await {
            Ok(mut result) => {
                if result.message.is_none() {
                    result.message = Some(default_message.to_string());
                }
                result
            }
            Err(e) => {
                warn!("LinkedIn {path} failed: {e}");
                ActionResult::failed(e.to_string())
            }
        }
    }
}

#[async_trait]
impl LinkedInApi for LinkedInHttpClient {
    async fn get_profile(&self) -> ProfileData {
        self.fetch_profile().await.unwrap_or_else(|e| {
            warn!("Profile fetch failed: {e}");
            ProfileData::from_error(e.to_string())
        })
    }

    async fn search_jobs(
        &self,
        role: &str,
        location: Option<&str>,
        keywords: Option<&[String]>,
    ) -> Vec<JobListing> {
        self.fetch_jobs(role, location, keywords)
            .await
            .unwrap_or_else(|e| {
                warn!("Job search for '{role}' failed: {e}");
                Vec::new()
            })
    }

    async fn set_profile_url(&self, profile_url: &str) -> ActionResult {
        self.post_action(
            "/linkedin/set-url",
            json!({ "linkedin_url": profile_url }),
            "URL set",
        )
        .await
    }

    async fn refresh_profile(&self) -> ActionResult {
        self.post_action("/linkedin/refresh-profile", json!({}), "Profile refreshed")
            .await
    }
}
