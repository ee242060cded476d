// Intent classifier prompt and tool schema.
// The schema is the contract: the model must answer through `classify_intent`.

use serde_json::{json, Value};

pub const CLASSIFY_TOOL_NAME: &str = "classify_intent";

pub const CLASSIFY_TOOL_DESCRIPTION: &str =
    "Classify user intent and extract job search parameters if applicable";

pub const CLASSIFY_SYSTEM: &str = "\
Ты — ассистент для классификации запросов пользователя.

Доступные интенты:
- PROFILE: пользователь спрашивает о своём профиле LinkedIn (опыт, навыки, образование)
- JOBS: пользователь ищет вакансии или хочет узнать о доступных работах
- UNKNOWN: любой другой запрос

Для интента JOBS извлеки параметры:
- role: какую должность/роль ищет (обязательно)
- location: город, страна или \"remote\" (опционально)
- keywords: дополнительные навыки или ключевые слова (опционально)

Если пользователь ищет вакансии, но не указал должность, верни JOBS без job_params.
Для PROFILE и UNKNOWN никогда не заполняй job_params.

Примеры:
\"Покажи мой профиль\" -> PROFILE
\"Какой у меня опыт работы?\" -> PROFILE
\"Найди вакансии Python разработчика\" -> JOBS (role: \"Python Developer\")
\"Вакансии в Берлине для дата сайентиста\" -> JOBS (role: \"Data Scientist\", location: \"Berlin\")
\"Удалённая работа frontend\" -> JOBS (role: \"Frontend Developer\", location: \"remote\")
\"Привет, как дела?\" -> UNKNOWN

Всегда отвечай вызовом инструмента classify_intent.";

/// JSON Schema for the `classify_intent` tool input.
pub fn classify_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "intent": {
                "type": "string",
                "enum": ["PROFILE", "JOBS", "UNKNOWN"],
                "description": "The classified intent"
            },
            "confidence": {
                "type": "number",
                "minimum": 0,
                "maximum": 1,
                "description": "Confidence score between 0 and 1"
            },
            "job_params": {
                "type": "object",
                "properties": {
                    "role": {
                        "type": "string",
                        "description": "Job title or role"
                    },
                    "location": {
                        "type": "string",
                        "description": "City, country, or 'remote'"
                    },
                    "keywords": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Additional keywords or skills"
                    }
                },
                "required": ["role"]
            }
        },
        "required": ["intent", "confidence"]
    })
}
