use std::sync::Arc;

use crate::classifier::IntentClassifier;
use crate::linkedin::LinkedInApi;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<IntentClassifier>,
    /// Pluggable LinkedIn backend. Default: `LinkedInHttpClient`.
    pub linkedin: Arc<dyn LinkedInApi>,
}
