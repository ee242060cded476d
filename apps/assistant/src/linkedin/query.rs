//! Turns structured job-search parameters into the natural-language query the
//! LinkedIn analysis endpoint expects.

use crate::classifier::is_remote_location;

pub fn build_search_query(role: &str, location: Option<&str>, keywords: Option<&[String]>) -> String {
    let mut parts = vec![format!("Найди вакансии для позиции {role}")];

    match location.map(str::trim).filter(|l| !l.is_empty()) {
        Some(l) if is_remote_location(l) => {
            parts.push("с возможностью удалённой работы".to_string());
        }
        Some(l) => parts.push(format!("в локации {l}")),
        None => {}
    }

    if let Some(keywords) = keywords.filter(|k| !k.is_empty()) {
        parts.push(format!("с навыками: {}", keywords.join(", ")));
    }

    parts.join(" ")
}
