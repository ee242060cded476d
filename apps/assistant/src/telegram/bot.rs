//! Telegram bot — long-polls for updates and answers each message in its own task.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::dispatcher::Dispatcher;
use crate::telegram::api::{Message, TelegramClient, TelegramError, Update};
use crate::telegram::command::{is_profile_url, Command};

const POLL_TIMEOUT_SECS: u64 = 30;
const POLL_BACKOFF: Duration = Duration::from_secs(5);

pub const WELCOME_MESSAGE: &str = "👋 Привет! Я — LinkedIn Job Assistant.

Я умею:
📋 Показать ваш профиль LinkedIn
💼 Искать вакансии на LinkedIn

Примеры запросов:
• \"Покажи мой профиль\"
• \"Найди вакансии Python разработчика\"
• \"Вакансии data scientist в Берлине\"
• \"Удалённая работа frontend developer\"

Просто напишите мне, что вы хотите! 🚀";

pub const HELP_MESSAGE: &str = "❓ Помощь

Доступные команды:
/start - Начать работу
/help - Показать эту помощь
/seturl <URL> - Установить LinkedIn профиль URL
/refresh - Обновить данные профиля

Что я умею:
1️⃣ Показать ваш профиль LinkedIn
   Примеры: \"мой профиль\", \"покажи опыт работы\"

2️⃣ Искать вакансии
   Примеры:
   • \"найди вакансии Python developer\"
   • \"работа data scientist в Лондоне\"
   • \"удалённая работа для фронтенд разработчика\"

Просто напишите свой запрос обычным языком! 💬";

pub const SETURL_USAGE: &str = "❌ Укажите LinkedIn URL\n\n\
Использование: /seturl https://www.linkedin.com/in/your-profile\n\n\
Пример: /seturl https://www.linkedin.com/in/johnsmith";

pub const SETURL_BAD_FORMAT: &str = "❌ Неверный формат URL\n\n\
URL должен начинаться с: https://www.linkedin.com/in/\n\n\
Пример: https://www.linkedin.com/in/johnsmith";

pub const GENERIC_ERROR_MESSAGE: &str = "😔 Извините, произошла ошибка при обработке вашего запроса. \
Пожалуйста, попробуйте позже.";

pub struct TelegramBot {
    api: TelegramClient,
    dispatcher: Dispatcher,
}

impl TelegramBot {
    pub fn new(api: TelegramClient, dispatcher: Dispatcher) -> Self {
        Self { api, dispatcher }
    }

    /// Polls forever. Only fails if the token is rejected at startup.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        let me = self
            .api
            .get_me()
            .await
            .context("Telegram rejected the bot token")?;
        info!(
            "Telegram bot @{} started polling",
            me.username.as_deref().unwrap_or("unknown")
        );

        let mut offset = 0;
        loop {
            let updates = match self.api.get_updates(offset, POLL_TIMEOUT_SECS).await {
                Ok(updates) => updates,
                Err(e) => {
                    error!("Telegram polling failed: {e}");
                    tokio::time::sleep(POLL_BACKOFF).await;
                    continue;
                }
            };

            offset = next_offset(offset, &updates);

            for update in updates {
                let bot = Arc::clone(&self);
                tokio::spawn(async move { bot.process_update(update).await });
            }
        }
    }

    /// Outermost boundary for one update: any failure is logged in full and the
    /// user only sees a generic apology.
    pub async fn process_update(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let chat_id = message.chat.id;

        if let Err(e) = self.handle_message(&message).await {
            error!("Error processing update {}: {e:?}", update.update_id);
            if let Err(e) = self.api.send_message(chat_id, GENERIC_ERROR_MESSAGE).await {
                error!("Failed to deliver error notice to chat {chat_id}: {e}");
            }
        }
    }

    async fn handle_message(&self, message: &Message) -> Result<(), TelegramError> {
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };
        let chat_id = message.chat.id;

        match Command::parse(text) {
            Some(command) => self.handle_command(chat_id, command).await,
            None => self.handle_text(message, text).await,
        }
    }

    async fn handle_command(&self, chat_id: i64, command: Command) -> Result<(), TelegramError> {
        match command {
            Command::Start => self.api.send_message(chat_id, WELCOME_MESSAGE).await,
            Command::Help => self.api.send_message(chat_id, HELP_MESSAGE).await,
            Command::Unknown(name) => {
                info!("Unknown command /{name} in chat {chat_id}");
                self.api.send_message(chat_id, HELP_MESSAGE).await
            }
            Command::SetUrl(None) => self.api.send_message(chat_id, SETURL_USAGE).await,
            Command::SetUrl(Some(url)) if !is_profile_url(&url) => {
                self.api.send_message(chat_id, SETURL_BAD_FORMAT).await
            }
            Command::SetUrl(Some(url)) => {
                self.api
                    .send_message(chat_id, &format!("⏳ Устанавливаю LinkedIn URL: {url}"))
                    .await?;

                let result = self.dispatcher.linkedin().set_profile_url(&url).await;
                let reply = if result.success {
                    "✅ LinkedIn URL успешно установлен!\n\n\
                     Теперь вы можете использовать:\n\
                     • 'Покажи мой профиль'\n\
                     • 'Найди вакансии'"
                        .to_string()
                } else {
                    format!(
                        "❌ Не удалось установить URL: {}",
                        result.error.as_deref().unwrap_or("Неизвестная ошибка")
                    )
                };
                self.api.send_message(chat_id, &reply).await
            }
            Command::Refresh => {
                self.api
                    .send_message(chat_id, "🔄 Обновляю данные профиля LinkedIn...")
                    .await?;

                let result = self.dispatcher.linkedin().refresh_profile().await;
                let reply = if result.success {
                    "✅ Профиль успешно обновлён!\n\nТеперь попробуйте: 'Покажи мой профиль'"
                        .to_string()
                } else {
                    format!(
                        "❌ Не удалось обновить профиль: {}",
                        result.error.as_deref().unwrap_or("Неизвестная ошибка")
                    )
                };
                self.api.send_message(chat_id, &reply).await
            }
        }
    }

    async fn handle_text(&self, message: &Message, text: &str) -> Result<(), TelegramError> {
        let chat_id = message.chat.id;
        let user_id = message.from.as_ref().map(|u| u.id).unwrap_or_default();
        info!("Received message from {user_id}: {text}");

        if let Err(e) = self.api.send_typing(chat_id).await {
            warn!("Failed to send typing status to chat {chat_id}: {e}");
        }

        let action = self.dispatcher.classify(text).await;

        if let Some(notice) = action.progress_notice() {
            self.api.send_message(chat_id, &notice).await?;
        }

        let reply = self.dispatcher.execute(&action).await;
        self.api.send_message(chat_id, &reply).await
    }
}

/// The next `getUpdates` offset acknowledges every update seen so far.
fn next_offset(current: i64, updates: &[Update]) -> i64 {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .fold(current, i64::max)
}
