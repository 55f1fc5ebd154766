//! LLM-backed pattern recommendations, code samples and explanations.
//!
//! The advisor owns prompt construction and reply validation; the model
//! itself is an opaque [`LLMProvider`].

mod prompt;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogIndex, FilterState, PatternRecord, Selection, filter_and_sort};
use crate::error::{CatalogError, Result};
use crate::util::strip_code_fence;
use crate::{ChatMessage, LLMProvider};

pub const MAX_RECOMMENDATIONS: usize = 5;
pub const MIN_RELEVANCE: u8 = 1;
pub const MAX_RELEVANCE: u8 = 10;

/// Optional narrowing of the candidate set sent to the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub category: Option<String>,
    pub architecture: Option<String>,
    pub language: Option<String>,
    pub framework: Option<String>,
}

impl Preferences {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.category,
            &self.architecture,
            &self.language,
            &self.framework,
        ]
        .into_iter()
        .all(|v| v.as_deref().is_none_or(|s| s.trim().is_empty()))
    }

    fn selection(value: Option<&String>) -> Selection {
        value.map_or_else(Selection::new, |v| Selection::from_csv(v))
    }

    /// Preferences expressed as engine filters.
    #[must_use]
    pub fn to_filter_state(&self) -> FilterState {
        FilterState::new()
            .with_category_str(self.category.as_deref().unwrap_or_default())
            .with_architectures(Self::selection(self.architecture.as_ref()))
            .with_languages(Self::selection(self.language.as_ref()))
            .with_frameworks(Self::selection(self.framework.as_ref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub project_description: String,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub pattern_slug: String,
    pub pattern_name: String,
    /// 1 (marginal) to 10 (essential).
    pub relevance_score: u8,
    pub reason: String,
    pub use_case: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub code: String,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecommendation {
    #[serde(alias = "slug", alias = "pattern_slug")]
    pattern_slug: String,
    #[serde(default, alias = "name", alias = "pattern_name")]
    pattern_name: Option<String>,
    #[serde(default, alias = "score", alias = "relevance_score")]
    relevance_score: serde_json::Value,
    #[serde(default)]
    reason: String,
    #[serde(default, alias = "use_case")]
    use_case: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRecommendations {
    List(Vec<RawRecommendation>),
    Wrapped {
        recommendations: Vec<RawRecommendation>,
    },
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and clamped to 1..=10 first"
)]
fn relevance(value: &serde_json::Value) -> u8 {
    let raw = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|v| v.is_finite()).map_or(MIN_RELEVANCE, |v| {
        v.round()
            .clamp(f64::from(MIN_RELEVANCE), f64::from(MAX_RELEVANCE)) as u8
    })
}

/// Validate a model reply against the catalog: unknown slugs and duplicates
/// are dropped, scores clamped, and at most [`MAX_RECOMMENDATIONS`] kept in
/// descending relevance.
pub fn parse_recommendations(reply: &str, index: &CatalogIndex<'_>) -> Result<Vec<Recommendation>> {
    let json = strip_code_fence(reply);
    let raw: RawRecommendations = serde_json::from_str(json).map_err(|e| {
        CatalogError::Transport(anyhow::anyhow!(
            "could not parse recommendations: {e} (reply preview: {})",
            json.chars().take(200).collect::<String>()
        ))
    })?;
    let raw = match raw {
        RawRecommendations::List(list) | RawRecommendations::Wrapped { recommendations: list } => {
            list
        }
    };

    let mut seen = HashSet::new();
    let mut recommendations: Vec<Recommendation> = raw
        .into_iter()
        .filter_map(|r| {
            let slug = r.pattern_slug.trim();
            let Some(record) = index.get(slug) else {
                warn!("Dropping recommendation for unknown pattern '{}'", slug);
                return None;
            };
            if !seen.insert(record.slug.clone()) {
                return None;
            }
            Some(Recommendation {
                pattern_slug: record.slug.clone(),
                pattern_name: r
                    .pattern_name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| record.name.clone()),
                relevance_score: relevance(&r.relevance_score),
                reason: r.reason,
                use_case: r.use_case,
            })
        })
        .collect();

    recommendations.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    Ok(recommendations)
}

/// Parse a code-generation reply. Falls back to treating the whole reply as
/// code when the model ignores the JSON instruction.
#[must_use]
pub fn parse_code_snippet(reply: &str) -> CodeSnippet {
    let body = strip_code_fence(reply);
    let parsed: Option<HashMap<String, serde_json::Value>> = serde_json::from_str(body).ok();
    match parsed {
        Some(fields) if fields.contains_key("code") => {
            let text = |key: &str| {
                fields
                    .get(key)
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            CodeSnippet {
                code: text("code"),
                explanation: text("explanation"),
            }
        }
        _ => CodeSnippet {
            code: body.to_string(),
            explanation: String::new(),
        },
    }
}

pub struct PatternAdvisor<P: ?Sized> {
    provider: Arc<P>,
    model: String,
}

impl<P> PatternAdvisor<P>
where
    P: LLMProvider + ?Sized,
{
    #[must_use]
    pub fn new(provider: Arc<P>) -> Self {
        let model = provider.default_model().to_string();
        Self { provider, model }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn ask(&self, system: &str, prompt: String) -> Result<String> {
        let messages = [ChatMessage::system(system), ChatMessage::user(prompt)];
        let response = self
            .provider
            .chat(&messages, &self.model)
            .await
            .map_err(CatalogError::Transport)?;
        if response.content.trim().is_empty() {
            return Err(CatalogError::Transport(anyhow::anyhow!(
                "empty reply from model {}",
                self.model
            )));
        }
        Ok(response.content)
    }

    /// Recommend patterns from `catalog` for a project description.
    ///
    /// Preferences narrow the candidates sent to the model; when they match
    /// nothing the whole catalog is offered instead.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
        catalog: &[PatternRecord],
    ) -> Result<Vec<Recommendation>> {
        let description = request.project_description.trim();
        if description.is_empty() {
            return Err(CatalogError::validation("project description is required"));
        }
        if catalog.is_empty() {
            return Ok(Vec::new());
        }

        let preferences = request.preferences.as_ref();
        let mut candidates = preferences.map_or_else(Vec::new, |p| {
            filter_and_sort(catalog, &p.to_filter_state(), &HashSet::new())
        });
        if candidates.is_empty() {
            candidates = catalog.iter().collect();
        }
        debug!(
            "Recommending from {} of {} patterns",
            candidates.len(),
            catalog.len()
        );

        let prompt =
            prompt::recommendation_prompt(description, preferences, &candidates, MAX_RECOMMENDATIONS);
        let reply = self.ask(prompt::RECOMMEND_SYSTEM_PROMPT, prompt).await?;
        let recommendations = parse_recommendations(&reply, &CatalogIndex::new(catalog))?;
        info!("Model returned {} usable recommendations", recommendations.len());
        Ok(recommendations)
    }

    pub async fn generate_code(
        &self,
        pattern: &PatternRecord,
        language: &str,
        context: Option<&str>,
    ) -> Result<CodeSnippet> {
        let language = language.trim();
        if language.is_empty() {
            return Err(CatalogError::validation("language is required"));
        }
        let reply = self
            .ask(
                prompt::CODE_SYSTEM_PROMPT,
                prompt::code_prompt(pattern, language, context),
            )
            .await?;
        info!("Generated {} sample for pattern '{}'", language, pattern.slug);
        Ok(parse_code_snippet(&reply))
    }

    pub async fn explain(&self, pattern: &PatternRecord, question: Option<&str>) -> Result<String> {
        let reply = self
            .ask(
                prompt::EXPLAIN_SYSTEM_PROMPT,
                prompt::explain_prompt(pattern, question),
            )
            .await?;
        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::{LLMResponse, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedProvider {
        reply: String,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl ScriptedProvider {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            let seen = self.seen.lock().unwrap();
            seen.iter()
                .rev()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn chat(&self, messages: &[ChatMessage], _model: &str) -> anyhow::Result<LLMResponse> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            Ok(LLMResponse {
                content: self.reply.clone(),
                usage: None,
            })
        }

        fn default_model(&self) -> &str {
            "scripted"
        }
    }

    fn record(id: i64, slug: &str, category: Category, languages: &[&str]) -> PatternRecord {
        PatternRecord {
            id,
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            description: format!("{slug} pattern"),
            content: String::new(),
            category,
            difficulty: 1,
            tags: vec![],
            architectures: vec![],
            languages: languages.iter().map(ToString::to_string).collect(),
            frameworks: vec![],
            related_patterns: vec![],
            code_examples: vec![],
        }
    }

    fn catalog() -> Vec<PatternRecord> {
        vec![
            record(1, "singleton", Category::Creational, &["java"]),
            record(2, "observer", Category::Behavioral, &["rust"]),
            record(3, "adapter", Category::Structural, &["rust", "java"]),
        ]
    }

    #[test]
    fn parse_drops_unknown_and_duplicate_slugs_and_clamps() {
        let records = catalog();
        let index = CatalogIndex::new(&records);
        let reply = r#"```json
[
  {"patternSlug": "observer", "patternName": "Observer", "relevanceScore": 14, "reason": "events", "useCase": "ui"},
  {"patternSlug": "ghost", "relevanceScore": 9},
  {"patternSlug": "adapter", "relevanceScore": "7.6", "reason": "legacy"},
  {"patternSlug": "observer", "relevanceScore": 3}
]
```"#;
        let recs = parse_recommendations(reply, &index).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].pattern_slug, "observer");
        assert_eq!(recs[0].relevance_score, 10);
        assert_eq!(recs[1].pattern_slug, "adapter");
        assert_eq!(recs[1].relevance_score, 8);
        assert_eq!(recs[1].pattern_name, "ADAPTER");
    }

    #[test]
    fn parse_accepts_wrapped_object_and_caps_length() {
        let records: Vec<PatternRecord> = (1..=7)
            .map(|i| record(i, &format!("p{i}"), Category::Behavioral, &[]))
            .collect();
        let index = CatalogIndex::new(&records);
        let items: Vec<String> = (1..=7)
            .map(|i| format!(r#"{{"slug": "p{i}", "score": {i}}}"#))
            .collect();
        let reply = format!(r#"{{"recommendations": [{}]}}"#, items.join(","));

        let recs = parse_recommendations(&reply, &index).unwrap();
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        let scores: Vec<u8> = recs.iter().map(|r| r.relevance_score).collect();
        assert_eq!(scores, [7, 6, 5, 4, 3]);
    }

    #[test]
    fn parse_rejects_non_json() {
        let records = catalog();
        let index = CatalogIndex::new(&records);
        assert!(parse_recommendations("I recommend the observer pattern.", &index).is_err());
    }

    #[test]
    fn missing_or_garbage_score_becomes_minimum() {
        assert_eq!(relevance(&serde_json::Value::Null), MIN_RELEVANCE);
        assert_eq!(relevance(&serde_json::json!("high")), MIN_RELEVANCE);
        assert_eq!(relevance(&serde_json::json!(-3)), MIN_RELEVANCE);
    }

    #[test]
    fn code_snippet_parses_json_or_falls_back() {
        let snippet = parse_code_snippet(r#"{"code": "fn main() {}", "explanation": "empty"}"#);
        assert_eq!(snippet.code, "fn main() {}");
        assert_eq!(snippet.explanation, "empty");

        let snippet = parse_code_snippet("```rust\nstruct Adapter;\n```");
        assert_eq!(snippet.code, "struct Adapter;");
        assert!(snippet.explanation.is_empty());
    }

    #[test]
    fn preferences_translate_to_filters() {
        let prefs = Preferences {
            category: Some("structural".to_string()),
            language: Some("rust, go".to_string()),
            ..Preferences::default()
        };
        let state = prefs.to_filter_state();
        assert!(state.languages.contains("go"));
        assert!(state.architectures.is_empty());
        assert!(!prefs.is_empty());
        assert!(Preferences::default().is_empty());
    }

    #[tokio::test]
    async fn recommend_narrows_candidates_by_preferences() {
        let provider =
            ScriptedProvider::new(r#"[{"patternSlug": "adapter", "relevanceScore": 8}]"#);
        let advisor = PatternAdvisor::new(Arc::clone(&provider));
        let request = RecommendationRequest {
            project_description: "wrap a legacy SOAP client".to_string(),
            preferences: Some(Preferences {
                category: Some("structural".to_string()),
                ..Preferences::default()
            }),
        };

        let recs = advisor.recommend(&request, &catalog()).await.unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].pattern_slug, "adapter");

        let prompt = provider.last_prompt();
        assert!(prompt.contains("- adapter |"));
        assert!(!prompt.contains("- singleton |"));
    }

    #[tokio::test]
    async fn recommend_falls_back_to_full_catalog() {
        let provider = ScriptedProvider::new("[]");
        let advisor = PatternAdvisor::new(Arc::clone(&provider));
        let request = RecommendationRequest {
            project_description: "chat app".to_string(),
            preferences: Some(Preferences {
                language: Some("cobol".to_string()),
                ..Preferences::default()
            }),
        };
        assert!(advisor.recommend(&request, &catalog()).await.unwrap().is_empty());
        assert!(provider.last_prompt().contains("- singleton |"));
    }

    #[tokio::test]
    async fn recommend_requires_description() {
        let advisor = PatternAdvisor::new(ScriptedProvider::new("[]"));
        let err = advisor
            .recommend(&RecommendationRequest::default(), &catalog())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn generate_code_uses_model_reply() {
        let provider = ScriptedProvider::new(r#"{"code": "class Observer {}", "explanation": "x"}"#);
        let advisor = PatternAdvisor::new(Arc::clone(&provider)).with_model("custom");
        assert_eq!(advisor.model(), "custom");

        let records = catalog();
        let snippet = advisor
            .generate_code(&records[1], "typescript", None)
            .await
            .unwrap();
        assert_eq!(snippet.code, "class Observer {}");
        assert!(provider.last_prompt().contains("typescript"));

        assert!(advisor.generate_code(&records[1], " ", None).await.is_err());
    }

    #[tokio::test]
    async fn empty_reply_is_an_error() {
        let advisor = PatternAdvisor::new(ScriptedProvider::new("   "));
        let records = catalog();
        assert!(matches!(
            advisor.explain(&records[0], None).await,
            Err(CatalogError::Transport(_))
        ));
    }
}
