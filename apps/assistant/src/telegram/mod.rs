// Telegram transport: Bot API client, command parsing, and the polling bot.
// Message handling goes through the dispatcher; nothing here talks to the LLM directly.

pub mod api;
pub mod bot;
pub mod command;

pub use api::TelegramClient;
pub use bot::TelegramBot;
