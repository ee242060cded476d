use serde::{Deserialize, Serialize};

/// A single position on the profile. Upstream uses `companyName`; both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    #[serde(alias = "companyName")]
    pub company: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(alias = "schoolName")]
    pub school: String,
    pub degree: String,
    #[serde(alias = "fieldOfStudy")]
    pub field: String,
}

/// Profile payload as consumed by the formatter.
///
/// When `error` is set every other field is void.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileData {
    pub headline: String,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProfileData {
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListing {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// Outcome of a mutating call (`set_profile_url`, `refresh_profile`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionResult {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ActionResult {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_accepts_upstream_field_names() {
        let profile: ProfileData = serde_json::from_value(json!({
            "headline": "Rust Engineer",
            "experience": [{"title": "SWE", "companyName": "Acme", "duration": "2y"}],
            "education": [{"schoolName": "MIT", "degree": "BSc", "fieldOfStudy": "CS"}]
        }))
        .unwrap();

        assert_eq!(profile.experience[0].company, "Acme");
        assert_eq!(profile.education[0].school, "MIT");
        assert_eq!(profile.education[0].field, "CS");
        assert_eq!(profile.summary, "");
        assert!(profile.error.is_none());
    }

    #[test]
    fn test_partial_entries_default_missing_fields() {
        let entry: ExperienceEntry = serde_json::from_value(json!({"title": "SWE"})).unwrap();
        assert_eq!(entry.company, "");
        assert_eq!(entry.duration, "");
    }

    #[test]
    fn test_job_listing_type_field_renamed() {
        let job: JobListing =
            serde_json::from_value(json!({"title": "Dev", "type": "Full-time"})).unwrap();
        assert_eq!(job.job_type.as_deref(), Some("Full-time"));
        assert!(job.company.is_none());

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["type"], "Full-time");
    }

    #[test]
    fn test_error_profile_has_empty_content() {
        let profile = ProfileData::from_error("HTTP 401: unauthorized");
        assert_eq!(profile.error.as_deref(), Some("HTTP 401: unauthorized"));
        assert!(profile.headline.is_empty() && profile.experience.is_empty());
    }
}
