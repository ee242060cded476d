mod classifier;
mod config;
mod dispatcher;
mod errors;
mod formatter;
mod linkedin;
mod llm_client;
mod routes;
mod state;
mod telegram;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classifier::IntentClassifier;
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::linkedin::client::LinkedInHttpClient;
use crate::linkedin::LinkedInApi;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::telegram::{TelegramBot, TelegramClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LinkedIn Job Assistant v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client and classifier
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build LLM client")?;
    let classifier = Arc::new(IntentClassifier::new(Arc::new(llm)));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize LinkedIn collaborator
    let linkedin: Arc<dyn LinkedInApi> = Arc::new(
        LinkedInHttpClient::new(
            config.linkedin_api_key.clone(),
            config.linkedin_api_url.clone(),
        )
        .context("Failed to build LinkedIn client")?,
    );
    info!("LinkedIn client initialized ({})", config.linkedin_api_url);

    let state = AppState {
        classifier: classifier.clone(),
        linkedin: linkedin.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    let server = async { axum::serve(listener, app).await.context("HTTP server failed") };

    if !config.enable_telegram {
        info!("Telegram polling disabled; serving HTTP API only");
        return server.await;
    }

    let api = TelegramClient::new(&config.telegram_bot_token)
        .context("Failed to build Telegram client")?;
    let bot = Arc::new(TelegramBot::new(api, Dispatcher::new(classifier, linkedin)));

    // Either side stopping takes the whole process down.
    tokio::select! {
        result = server => result,
        result = bot.run() => result,
    }
}
