//! Response Formatter — renders profile and job payloads as chat text.
//!
//! Pure functions: no I/O, deterministic for a given input.
//! Truncation counts Unicode scalar values, so Cyrillic text is never split mid-character.

use crate::linkedin::models::{JobListing, ProfileData};

pub const SUMMARY_MAX_CHARS: usize = 300;
pub const DESCRIPTION_MAX_CHARS: usize = 150;
pub const MAX_EXPERIENCE_ENTRIES: usize = 3;
pub const MAX_EDUCATION_ENTRIES: usize = 2;
pub const DEFAULT_JOB_LIMIT: usize = 5;

const ELLIPSIS: &str = "...";

pub const PROFILE_HEADER: &str = "📋 Ваш профиль LinkedIn:\n";
pub const NO_JOBS_MESSAGE: &str = "😔 К сожалению, по вашему запросу не найдено подходящих вакансий. \
Попробуйте изменить параметры поиска.";

/// Cuts `text` to at most `max_chars` characters, appending an ellipsis only when
/// something was actually removed.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

pub fn format_profile(profile: &ProfileData) -> String {
    let mut parts = vec![PROFILE_HEADER.to_string()];

    if profile.error.is_some() {
        return parts.concat();
    }

    if !profile.headline.trim().is_empty() {
        parts.push(format!("🎯 {}\n", profile.headline));
    }

    if !profile.summary.trim().is_empty() {
        parts.push(format!(
            "\n📝 О себе:\n{}\n",
            truncate_chars(&profile.summary, SUMMARY_MAX_CHARS)
        ));
    }

    if !profile.experience.is_empty() {
        parts.push("\n💼 Опыт работы:".to_string());
        for exp in profile.experience.iter().take(MAX_EXPERIENCE_ENTRIES) {
            parts.push(format!("• {} в {} ({})", exp.title, exp.company, exp.duration));
        }
    }

    if !profile.education.is_empty() {
        parts.push("\n\n🎓 Образование:".to_string());
        for edu in profile.education.iter().take(MAX_EDUCATION_ENTRIES) {
            let line = format!("• {}: {} {}", edu.school, edu.degree, edu.field);
            parts.push(line.trim_end().to_string());
        }
    }

    parts.join("\n")
}

pub fn format_jobs(jobs: &[JobListing], limit: usize) -> String {
    if jobs.is_empty() {
        return NO_JOBS_MESSAGE.to_string();
    }

    let mut parts = vec![format!("💼 Найдено вакансий: {}\n", jobs.len())];

    for (idx, job) in jobs.iter().take(limit).enumerate() {
        parts.push(format!("{}. 🏢 {}", idx + 1, non_blank(&job.title, "Без названия")));
        parts.push(format!(
            "   Компания: {}",
            non_blank(&job.company, "Компания не указана")
        ));
        parts.push(format!(
            "   📍 {}",
            non_blank(&job.location, "Локация не указана")
        ));

        if let Some(job_type) = present(&job.job_type) {
            parts.push(format!("   ⏰ {job_type}"));
        }

        if let Some(description) = present(&job.description) {
            parts.push(format!(
                "   📄 {}",
                truncate_chars(description.trim(), DESCRIPTION_MAX_CHARS)
            ));
        }

        if let Some(url) = present(&job.url) {
            parts.push(format!("   🔗 {url}"));
        }

        parts.push(String::new());
    }

    if jobs.len() > limit {
        parts.push(format!(
            "Показаны первые {} из {}.\n💡 Чтобы увидеть больше вакансий, уточните запрос \
             (например, добавьте локацию или навыки).",
            limit,
            jobs.len()
        ));
    }

    parts.join("\n")
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn non_blank<'a>(field: &'a Option<String>, placeholder: &'a str) -> &'a str {
    present(field).unwrap_or(placeholder)
}
