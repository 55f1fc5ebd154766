use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Creational,
    Structural,
    Behavioral,
    Architectural,
}

impl Category {
    pub const ALL: [Self; 4] = [
        Self::Creational,
        Self::Structural,
        Self::Behavioral,
        Self::Architectural,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creational => "creational",
            Self::Structural => "structural",
            Self::Behavioral => "behavioral",
            Self::Architectural => "architectural",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creational" => Ok(Self::Creational),
            "structural" => Ok(Self::Structural),
            "behavioral" => Ok(Self::Behavioral),
            "architectural" => Ok(Self::Architectural),
            _ => Err(anyhow::anyhow!("unknown pattern category: {s}")),
        }
    }
}

/// A code sample attached to a pattern's detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeExample {
    pub language: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One catalog entry. Immutable for the lifetime of a filtering session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub category: Category,
    /// Ordinal, 1 (easiest) upwards. Only ever compared.
    pub difficulty: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub architectures: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    /// Slugs of other patterns. May reference patterns that are not loaded.
    #[serde(default)]
    pub related_patterns: Vec<String>,
    #[serde(default)]
    pub code_examples: Vec<CodeExample>,
}

/// Architecture taxonomy entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub characteristics: Vec<String>,
}

/// Opaque caller-supplied identity scoping a user's favorites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh anonymous identity.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub pattern_id: i64,
    #[serde(rename = "userId")]
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_display() {
        for category in Category::ALL {
            let parsed: Category = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn category_parse_is_case_sensitive() {
        assert!("Creational".parse::<Category>().is_err());
        assert!("unknown".parse::<Category>().is_err());
    }

    #[test]
    fn pattern_record_deserializes_with_defaults() {
        let json = r#"{
            "id": 1,
            "slug": "singleton",
            "name": "Singleton",
            "description": "One instance",
            "category": "creational",
            "difficulty": 1
        }"#;
        let record: PatternRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, Category::Creational);
        assert!(record.tags.is_empty());
        assert!(record.related_patterns.is_empty());
    }

    #[test]
    fn generated_session_ids_are_distinct() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(!a.is_blank());
        assert!(SessionId::new("  ").is_blank());
    }
}
