use patternhub_core::{Architecture, Category, Favorite, PatternRecord, SessionId};
use patternhub_entities::{architectures, favorites, patterns};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Decode a JSON text column, treating malformed content as empty.
fn json_list<T: DeserializeOwned>(column: &str, raw: &str, slug: &str) -> Vec<T> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Ignoring malformed {column} for '{slug}': {e}");
        Vec::new()
    })
}

pub fn to_json<T: Serialize>(values: &[T]) -> anyhow::Result<String> {
    Ok(serde_json::to_string(values)?)
}

pub fn pattern_from_model(m: patterns::Model) -> anyhow::Result<PatternRecord> {
    let category = m.category.parse::<Category>()?;
    let difficulty = u8::try_from(m.difficulty)
        .map_err(|_| anyhow::anyhow!("difficulty {} out of range for '{}'", m.difficulty, m.slug))?;

    Ok(PatternRecord {
        id: m.id,
        tags: json_list("tags", &m.tags, &m.slug),
        architectures: json_list("architectures", &m.architectures, &m.slug),
        languages: json_list("languages", &m.languages, &m.slug),
        frameworks: json_list("frameworks", &m.frameworks, &m.slug),
        related_patterns: json_list("related_patterns", &m.related_patterns, &m.slug),
        code_examples: json_list("code_examples", &m.code_examples, &m.slug),
        slug: m.slug,
        name: m.name,
        description: m.description,
        content: m.content,
        category,
        difficulty,
    })
}

/// Convert rows, skipping (and logging) rows that cannot be represented.
pub fn patterns_from_models(models: Vec<patterns::Model>) -> Vec<PatternRecord> {
    models
        .into_iter()
        .filter_map(|m| {
            let slug = m.slug.clone();
            pattern_from_model(m)
                .map_err(|e| warn!("Skipping pattern '{slug}': {e}"))
                .ok()
        })
        .collect()
}

pub fn architecture_from_model(m: architectures::Model) -> Architecture {
    Architecture {
        id: m.id,
        characteristics: json_list("characteristics", &m.characteristics, &m.slug),
        slug: m.slug,
        name: m.name,
        description: m.description,
    }
}

pub fn favorite_from_model(m: favorites::Model) -> Favorite {
    Favorite {
        id: m.id,
        pattern_id: m.pattern_id,
        session_id: SessionId::new(m.session_id),
        created_at: m.created_at.and_utc(),
    }
}
