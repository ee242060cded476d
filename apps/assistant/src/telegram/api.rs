//! Minimal Telegram Bot API client: long polling plus the two send calls the bot needs.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::formatter::truncate_chars;

const TELEGRAM_API_ROOT: &str = "https://api.telegram.org";
/// Must stay above the long-poll timeout or every idle poll turns into a client error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);
/// Telegram rejects messages longer than this.
pub const MAX_MESSAGE_CHARS: usize = 4096;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TelegramError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs embed the bot token; keep it out of logs.
        TelegramError::Http(e.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    error_code: i64,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetUpdates<'a> {
    offset: i64,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SendChatAction<'a> {
    chat_id: i64,
    action: &'a str,
}

#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self, TelegramError> {
        Self::with_api_root(token, TELEGRAM_API_ROOT)
    }

    pub fn with_api_root(token: &str, api_root: &str) -> Result<Self, TelegramError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: format!("{}/bot{}", api_root.trim_end_matches('/'), token),
        })
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TelegramError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let text = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await?
            .text()
            .await?;

        let response: ApiResponse<T> = serde_json::from_str(&text)?;
        match response {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            other => Err(TelegramError::Api {
                code: other.error_code,
                description: other
                    .description
                    .unwrap_or_else(|| format!("{method} returned no result")),
            }),
        }
    }

    /// Confirms the token is valid; returns the bot's own user record.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout: timeout_secs,
                allowed_updates: &["message"],
            },
        )
        .await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let text = truncate_chars(text, MAX_MESSAGE_CHARS - 3);
        let _: serde_json::Value = self
            .call("sendMessage", &SendMessage { chat_id, text: &text })
            .await?;
        Ok(())
    }

    pub async fn send_typing(&self, chat_id: i64) -> Result<(), TelegramError> {
        let _: bool = self
            .call(
                "sendChatAction",
                &SendChatAction {
                    chat_id,
                    action: "typing",
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_api(router: Router) -> TelegramClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        TelegramClient::with_api_root("T0KEN", &format!("http://{addr}/")).unwrap()
    }

    #[tokio::test]
    async fn test_get_updates_sends_offset_and_parses_messages() {
        let router = Router::new().route(
            "/botT0KEN/getUpdates",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["offset"], 42);
                assert_eq!(body["allowed_updates"], json!(["message"]));
                Json(json!({
                    "ok": true,
                    "result": [
                        {"update_id": 42, "message": {
                            "message_id": 1,
                            "chat": {"id": 777, "type": "private"},
                            "from": {"id": 5, "is_bot": false, "first_name": "A"},
                            "text": "hi"
                        }},
                        {"update_id": 43, "edited_message": {}}
                    ]
                }))
            }),
        );
        let updates = spawn_api(router).await.get_updates(42, 0).await.unwrap();
        assert_eq!(updates.len(), 2);
        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 777);
        assert_eq!(message.text.as_deref(), Some("hi"));
        assert!(updates[1].message.is_none());
    }

    #[tokio::test]
    async fn test_api_error_carries_description() {
        let router = Router::new().route(
            "/botT0KEN/getMe",
            post(|| async {
                Json(json!({"ok": false, "error_code": 401, "description": "Unauthorized"}))
            }),
        );
        match spawn_api(router).await.get_me().await {
            Err(TelegramError::Api { code, description }) => {
                assert_eq!(code, 401);
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_message_truncates_oversized_text() {
        let router = Router::new().route(
            "/botT0KEN/sendMessage",
            post(|Json(body): Json<Value>| async move {
                let text = body["text"].as_str().unwrap();
                assert_eq!(text.chars().count(), MAX_MESSAGE_CHARS);
                assert_eq!(body["chat_id"], 9);
                Json(json!({"ok": true, "result": {"message_id": 1}}))
            }),
        );
        spawn_api(router)
            .await
            .send_message(9, &"ы".repeat(5000))
            .await
            .unwrap();
    }
}
