//! Dispatcher — turns a `ClassificationResult` into chat replies.
//!
//! Flow: classify → progress notice → fetch from LinkedIn → format.
//! Stateless; every message is handled on its own.

use std::sync::Arc;

use tracing::info;

use crate::classifier::{ClassificationResult, Intent, IntentClassifier, JobSearchParams};
use crate::formatter::{format_jobs, format_profile, DEFAULT_JOB_LIMIT};
use crate::linkedin::LinkedInApi;

pub const CLARIFY_ROLE_MESSAGE: &str = "🤔 Не могу понять, какую вакансию вы ищете. \
Пожалуйста, укажите должность или роль.\n\n\
Например: 'Найди вакансии Python разработчика'";

pub const CAPABILITIES_MESSAGE: &str = "🤷‍♂️ Извините, я пока умею только:

📋 Показывать информацию о вашем профиле LinkedIn
💼 Искать вакансии на LinkedIn

Пожалуйста, переформулируйте ваш запрос.

Примеры:
• \"Покажи мой профиль\"
• \"Найди вакансии Python разработчика\"
• \"Удалённая работа для дата сайентиста\"";

pub const PROFILE_PROGRESS: &str = "🔍 Получаю информацию о вашем профиле...";

/// What the dispatcher decided to do, before any collaborator is called.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShowProfile,
    SearchJobs(JobSearchParams),
    ClarifyRole,
    ExplainCapabilities,
}

impl Action {
    pub fn from_classification(result: &ClassificationResult) -> Self {
        match (result.intent, &result.job_params) {
            (Intent::Profile, _) => Action::ShowProfile,
            (Intent::Jobs, Some(params)) => Action::SearchJobs(params.clone()),
            (Intent::Jobs, None) => Action::ClarifyRole,
            (Intent::Unknown, _) => Action::ExplainCapabilities,
        }
    }

    /// Short notice sent before a slow fetch; `None` for immediate replies.
    pub fn progress_notice(&self) -> Option<String> {
        match self {
            Action::ShowProfile => Some(PROFILE_PROGRESS.to_string()),
            Action::SearchJobs(params) => {
                let mut text = format!("🔍 Ищу вакансии: {}", params.role);
                if params.is_remote() {
                    text.push_str(" (удалённо)");
                } else if let Some(location) = &params.location {
                    text.push_str(&format!(" ({location})"));
                }
                text.push_str("...");
                Some(text)
            }
            Action::ClarifyRole | Action::ExplainCapabilities => None,
        }
    }
}

/// Wires the classifier to the LinkedIn collaborator and the formatters.
#[derive(Clone)]
pub struct Dispatcher {
    classifier: Arc<IntentClassifier>,
    linkedin: Arc<dyn LinkedInApi>,
}

impl Dispatcher {
    pub fn new(classifier: Arc<IntentClassifier>, linkedin: Arc<dyn LinkedInApi>) -> Self {
        Self {
            classifier,
            linkedin,
        }
    }

    pub fn linkedin(&self) -> &dyn LinkedInApi {
        self.linkedin.as_ref()
    }

    pub async fn classify(&self, text: &str) -> Action {
        let result = self.classifier.classify(text).await;
        Action::from_classification(&result)
    }

    /// Runs an action to completion and returns the final reply text.
    pub async fn execute(&self, action: &Action) -> String {
        match action {
            Action::ShowProfile => {
                let profile = self.linkedin.get_profile().await;
                if let Some(error) = &profile.error {
                    info!("Profile unavailable: {error}");
                    return format!(
                        "❌ Не удалось получить профиль: {error}\n\n\
                         Убедитесь, что вы настроили LinkedIn URL через команду /seturl."
                    );
                }
                format_profile(&profile)
            }
            Action::SearchJobs(params) => {
                let jobs = self
                    .linkedin
                    .search_jobs(
                        &params.role,
                        params.location.as_deref(),
                        params.keywords.as_deref(),
                    )
                    .await;
                info!("Job search for '{}' returned {} result(s)", params.role, jobs.len());
                format_jobs(&jobs, DEFAULT_JOB_LIMIT)
            }
            Action::ClarifyRole => CLARIFY_ROLE_MESSAGE.to_string(),
            Action::ExplainCapabilities => CAPABILITIES_MESSAGE.to_string(),
        }
    }
}
