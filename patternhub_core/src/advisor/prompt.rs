use std::fmt::Write as _;

use crate::catalog::PatternRecord;

use super::Preferences;

pub const RECOMMEND_SYSTEM_PROMPT: &str = "You are a senior software architect. \
Recommend design patterns from the provided catalog only. \
Reply with a JSON array and nothing else.";

pub const CODE_SYSTEM_PROMPT: &str = "You are an expert programmer who writes short, idiomatic \
examples of design patterns. Reply with a JSON object and nothing else.";

pub const EXPLAIN_SYSTEM_PROMPT: &str =
    "You are a patient mentor explaining software design patterns to working developers.";

pub fn recommendation_prompt(
    description: &str,
    preferences: Option<&Preferences>,
    candidates: &[&PatternRecord],
    limit: usize,
) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Project description:\n{}\n", description.trim());

    if let Some(prefs) = preferences.filter(|p| !p.is_empty()) {
        prompt.push_str("Preferences:\n");
        for (label, value) in [
            ("category", prefs.category.as_deref()),
            ("architecture", prefs.architecture.as_deref()),
            ("language", prefs.language.as_deref()),
            ("framework", prefs.framework.as_deref()),
        ] {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                let _ = writeln!(prompt, "- {label}: {value}");
            }
        }
        prompt.push('\n');
    }

    prompt.push_str("Catalog (slug | name | category | description):\n");
    for record in candidates {
        let _ = writeln!(
            prompt,
            "- {} | {} | {} | {}",
            record.slug, record.name, record.category, record.description
        );
    }

    let _ = write!(
        prompt,
        "\nRecommend up to {limit} patterns. Respond with a JSON array of objects with keys \
         \"patternSlug\", \"patternName\", \"relevanceScore\" (integer 1-10), \"reason\" and \
         \"useCase\". Use only slugs from the catalog."
    );
    prompt
}

pub fn code_prompt(pattern: &PatternRecord, language: &str, context: Option<&str>) -> String {
    let mut prompt = format!(
        "Write a {language} implementation of the {} pattern ({}).\n{}\n",
        pattern.name, pattern.category, pattern.description
    );
    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        let _ = writeln!(prompt, "Use this context: {}", context.trim());
    }
    prompt.push_str(
        "Respond with a JSON object with keys \"code\" (the source code) and \
         \"explanation\" (a short walkthrough).",
    );
    prompt
}

pub fn explain_prompt(pattern: &PatternRecord, question: Option<&str>) -> String {
    let mut prompt = format!(
        "Explain the {} pattern ({}).\nSummary: {}\n",
        pattern.name, pattern.category, pattern.description
    );
    if !pattern.content.trim().is_empty() {
        let _ = writeln!(prompt, "Reference notes:\n{}", pattern.content.trim());
    }
    match question.filter(|q| !q.trim().is_empty()) {
        Some(question) => {
            let _ = write!(prompt, "Focus on this question: {}", question.trim());
        }
        None => prompt.push_str("Cover intent, structure, trade-offs and when to avoid it."),
    }
    prompt
}
