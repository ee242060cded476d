//! Intent Classifier — maps free-text chat messages onto a small set of actions.
//!
//! One forced tool call per message. The classifier never fails: every
//! lower-level failure collapses into `Intent::Unknown` with a sentinel confidence.

pub mod prompts;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classifier::prompts::{
    classify_input_schema, CLASSIFY_SYSTEM, CLASSIFY_TOOL_DESCRIPTION, CLASSIFY_TOOL_NAME,
};
use crate::llm_client::{StructuredModel, ToolDefinition};

/// Confidence reported when the model call itself failed (transport, API, schema).
pub const ERROR_CONFIDENCE: f64 = 0.0;
/// Confidence reported when the model answered without calling the tool.
pub const NO_TOOL_CALL_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intent {
    Profile,
    Jobs,
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Intent::Profile => "PROFILE",
            Intent::Jobs => "JOBS",
            Intent::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Job search parameters extracted alongside a JOBS intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSearchParams {
    /// Never blank.
    pub role: String,
    pub location: Option<String>,
    /// `None` whenever no usable keyword was extracted; never `Some(vec![])`.
    pub keywords: Option<Vec<String>>,
}

impl JobSearchParams {
    /// Builds params from loosely-typed input, enforcing the field policy:
    /// blank role → `None`, blank location → absent, blank keywords dropped.
    pub fn normalized(
        role: &str,
        location: Option<&str>,
        keywords: Option<&[String]>,
    ) -> Option<Self> {
        let role = role.trim();
        if role.is_empty() {
            return None;
        }

        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        let keywords: Vec<String> = keywords
            .unwrap_or_default()
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        Some(Self {
            role: role.to_string(),
            location,
            keywords: (!keywords.is_empty()).then_some(keywords),
        })
    }

    /// True when the location is the remote-work sentinel rather than a place.
    pub fn is_remote(&self) -> bool {
        self.location.as_deref().is_some_and(is_remote_location)
    }
}

/// Case-insensitive match against the `"remote"` sentinel.
pub fn is_remote_location(location: &str) -> bool {
    location.trim().eq_ignore_ascii_case("remote")
}

/// Output of `IntentClassifier::classify`.
///
/// `job_params` is only ever populated for `Intent::Jobs`. A JOBS result with no
/// params is valid and means the user did not name a role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub intent: Intent,
    pub confidence: f64,
    pub job_params: Option<JobSearchParams>,
}

impl ClassificationResult {
    pub fn unknown(confidence: f64) -> Self {
        Self {
            intent: Intent::Unknown,
            confidence,
            job_params: None,
        }
    }
}

/// Tool input exactly as the model produced it.
#[derive(Debug, Deserialize)]
struct RawClassification {
    intent: Intent,
    confidence: f64,
    #[serde(default)]
    job_params: Option<RawJobParams>,
}

#[derive(Debug, Deserialize)]
struct RawJobParams {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
}

impl From<RawClassification> for ClassificationResult {
    fn from(raw: RawClassification) -> Self {
        let confidence = if raw.confidence.is_finite() {
            raw.confidence.clamp(0.0, 1.0)
        } else {
            ERROR_CONFIDENCE
        };

        let job_params = match (raw.intent, raw.job_params) {
            (Intent::Jobs, Some(params)) => JobSearchParams::normalized(
                params.role.as_deref().unwrap_or_default(),
                params.location.as_deref(),
                params.keywords.as_deref(),
            ),
            _ => None,
        };

        Self {
            intent: raw.intent,
            confidence,
            job_params,
        }
    }
}

/// Classifies chat messages through a `StructuredModel`.
/// Holds no mutable state; share it behind an `Arc`.
#[derive(Clone)]
pub struct IntentClassifier {
    model: Arc<dyn StructuredModel>,
    tool: ToolDefinition,
}

impl IntentClassifier {
    pub fn new(model: Arc<dyn StructuredModel>) -> Self {
        Self {
            model,
            tool: ToolDefinition {
                name: CLASSIFY_TOOL_NAME,
                description: CLASSIFY_TOOL_DESCRIPTION,
                input_schema: classify_input_schema(),
            },
        }
    }

    pub async fn classify(&self, user_message: &str) -> ClassificationResult {
        let input = match self
            .model
            .call_tool(CLASSIFY_SYSTEM, user_message, &self.tool)
            .await
        {
            Ok(Some(input)) => input,
            Ok(None) => {
                warn!("Model answered without calling {CLASSIFY_TOOL_NAME}");
                return ClassificationResult::unknown(NO_TOOL_CALL_CONFIDENCE);
            }
            Err(e) => {
                warn!("Intent classification failed: {e}");
                return ClassificationResult::unknown(ERROR_CONFIDENCE);
            }
        };

        match serde_json::from_value::<RawClassification>(input) {
            Ok(raw) => {
                let result = ClassificationResult::from(raw);
                info!(
                    "Classified intent: {} (confidence: {:.2})",
                    result.intent, result.confidence
                );
                result
            }
            Err(e) => {
                warn!("Classification output did not match schema: {e}");
                ClassificationResult::unknown(ERROR_CONFIDENCE)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Deterministic stand-in for the hosted model.
    pub(crate) enum StubModel {
        Answer(Value),
        NoToolCall,
        Fails,
        /// Maps exact prompts to tool inputs; anything else is UNKNOWN.
        Script(Vec<(&'static str, Value)>),
    }

    #[async_trait]
    impl StructuredModel for StubModel {
        async fn call_tool(
            &self,
            _system: &str,
            prompt: &str,
            _tool: &ToolDefinition,
        ) -> Result<Option<Value>, LlmError> {
            match self {
                StubModel::Answer(v) => Ok(Some(v.clone())),
                StubModel::NoToolCall => Ok(None),
                StubModel::Fails => Err(LlmError::Api {
                    status: 529,
                    message: "overloaded".to_string(),
                }),
                StubModel::Script(script) => Ok(Some(
                    script
                        .iter()
                        .find(|(p, _)| *p == prompt)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_else(|| json!({"intent": "UNKNOWN", "confidence": 0.9})),
                )),
            }
        }
    }

    /// Records the tool it was handed so the schema contract can be checked.
    struct RecordingModel(Mutex<Option<(String, Value)>>);

    #[async_trait]
    impl StructuredModel for RecordingModel {
        async fn call_tool(
            &self,
            system: &str,
            _prompt: &str,
            tool: &ToolDefinition,
        ) -> Result<Option<Value>, LlmError> {
            *self.0.lock().unwrap() = Some((system.to_string(), tool.input_schema.clone()));
            Ok(Some(json!({"intent": "PROFILE", "confidence": 0.8})))
        }
    }

    pub(crate) fn classifier(model: StubModel) -> IntentClassifier {
        IntentClassifier::new(Arc::new(model))
    }

    #[tokio::test]
    async fn test_profile_intent_has_no_job_params() {
        let c = classifier(StubModel::Answer(json!({
            "intent": "PROFILE",
            "confidence": 0.93,
            "job_params": {"role": "should be ignored"}
        })));
        let result = c.classify("Покажи мой профиль").await;
        assert_eq!(result.intent, Intent::Profile);
        assert!((result.confidence - 0.93).abs() < 1e-9);
        assert!(result.job_params.is_none());
    }

    #[tokio::test]
    async fn test_jobs_intent_extracts_params() {
        let c = classifier(StubModel::Answer(json!({
            "intent": "JOBS",
            "confidence": 0.9,
            "job_params": {
                "role": " Data Scientist ",
                "location": "Berlin",
                "keywords": ["PyTorch", "  ", "SQL"]
            }
        })));
        let result = c.classify("Вакансии в Берлине для дата сайентиста").await;
        let params = result.job_params.unwrap();
        assert_eq!(params.role, "Data Scientist");
        assert_eq!(params.location.as_deref(), Some("Berlin"));
        assert_eq!(
            params.keywords,
            Some(vec!["PyTorch".to_string(), "SQL".to_string()])
        );
        assert!(!params.is_remote());
    }

    #[tokio::test]
    async fn test_jobs_without_role_needs_clarification() {
        let c = classifier(StubModel::Answer(json!({
            "intent": "JOBS",
            "confidence": 0.7,
            "job_params": {"role": "   ", "location": "remote"}
        })));
        let result = c.classify("Найди мне работу").await;
        assert_eq!(result.intent, Intent::Jobs);
        assert!(result.job_params.is_none());
    }

    #[tokio::test]
    async fn test_jobs_with_params_missing_role_key_drops_params() {
        let c = classifier(StubModel::Answer(json!({
            "intent": "JOBS",
            "confidence": 0.6,
            "job_params": {"location": "Berlin"}
        })));
        let result = c.classify("работа в Берлине").await;
        assert_eq!(result.intent, Intent::Jobs);
        assert!(result.job_params.is_none());
    }

    #[tokio::test]
    async fn test_model_failure_is_unknown_with_zero_confidence() {
        let result = classifier(StubModel::Fails).classify("anything").await;
        assert_eq!(result, ClassificationResult::unknown(ERROR_CONFIDENCE));
        assert_eq!(result.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_no_tool_call_is_unknown_with_half_confidence() {
        let result = classifier(StubModel::NoToolCall).classify("anything").await;
        assert_eq!(result.intent, Intent::Unknown);
        assert_eq!(result.confidence, 0.5);
        assert!(result.job_params.is_none());
    }

    #[tokio::test]
    async fn test_schema_violation_falls_back_to_error_sentinel() {
        for bad in [
            json!({"intent": "WEATHER", "confidence": 0.9}),
            json!({"confidence": 0.9}),
            json!({"intent": "PROFILE", "confidence": "high"}),
            json!("PROFILE"),
        ] {
            let result = classifier(StubModel::Answer(bad)).classify("x").await;
            assert_eq!(result, ClassificationResult::unknown(ERROR_CONFIDENCE));
        }
    }

    #[tokio::test]
    async fn test_confidence_clamped_into_unit_interval() {
        let high = classifier(StubModel::Answer(json!({"intent": "PROFILE", "confidence": 7.5})))
            .classify("x")
            .await;
        assert_eq!(high.confidence, 1.0);

        let low = classifier(StubModel::Answer(json!({"intent": "UNKNOWN", "confidence": -2})))
            .classify("x")
            .await;
        assert_eq!(low.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_scenarios_route_to_expected_intents() {
        let c = classifier(StubModel::Script(vec![
            ("Покажи мой профиль", json!({"intent": "PROFILE", "confidence": 0.95})),
            (
                "Найди вакансии Python разработчика",
                json!({"intent": "JOBS", "confidence": 0.92, "job_params": {"role": "Python Developer"}}),
            ),
        ]));

        assert_eq!(c.classify("Покажи мой профиль").await.intent, Intent::Profile);

        let jobs = c.classify("Найди вакансии Python разработчика").await;
        assert_eq!(jobs.intent, Intent::Jobs);
        assert!(jobs.job_params.unwrap().role.contains("Python"));

        assert_eq!(c.classify("Привет, как дела?").await.intent, Intent::Unknown);
    }

    #[tokio::test]
    async fn test_classifier_sends_schema_and_instructions() {
        let model = Arc::new(RecordingModel(Mutex::new(None)));
        let c = IntentClassifier::new(model.clone());
        c.classify("hello").await;

        let (system, schema) = model.0.lock().unwrap().clone().unwrap();
        assert!(system.contains("PROFILE") && system.contains("JOBS") && system.contains("UNKNOWN"));
        assert_eq!(schema["required"], json!(["intent", "confidence"]));
        assert_eq!(
            schema["properties"]["intent"]["enum"],
            json!(["PROFILE", "JOBS", "UNKNOWN"])
        );
        assert_eq!(schema["properties"]["job_params"]["required"], json!(["role"]));
    }

    #[test]
    fn test_remote_sentinel_is_case_insensitive() {
        for location in ["remote", "Remote", "REMOTE", " remote "] {
            let params = JobSearchParams::normalized("Dev", Some(location), None).unwrap();
            assert!(params.is_remote(), "{location} should be remote");
        }
        let berlin = JobSearchParams::normalized("Dev", Some("Berlin"), None).unwrap();
        assert!(!berlin.is_remote());
        assert!(!is_remote_location("remote-first Berlin"));
    }

    #[test]
    fn test_empty_keywords_same_as_absent() {
        let empty = JobSearchParams::normalized("Dev", None, Some(&[])).unwrap();
        let absent = JobSearchParams::normalized("Dev", None, None).unwrap();
        assert_eq!(empty, absent);
        assert!(empty.keywords.is_none());
    }

    #[test]
    fn test_blank_location_is_absent() {
        let params = JobSearchParams::normalized("Dev", Some("  "), None).unwrap();
        assert!(params.location.is_none());
    }

    #[test]
    fn test_classification_serializes_null_params() {
        let value = serde_json::to_value(ClassificationResult::unknown(0.5)).unwrap();
        assert_eq!(
            value,
            json!({"intent": "UNKNOWN", "confidence": 0.5, "job_params": null})
        );
    }
}
