//! Static catalog import.
//!
//! Seed files are JSON documents of the form
//! `{ "patterns": [...], "architectures": [...] }`. Entries are upserted by
//! slug, so importing the same file twice leaves the catalog unchanged.

use std::path::Path;

use patternhub_core::util::slugify;
use patternhub_core::{Architecture, Category, CodeExample, PatternRecord};
use serde::Deserialize;
use tracing::info;

use crate::store::{CatalogStore, Upsert};

pub const MAX_DIFFICULTY: u8 = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSeed {
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub category: Category,
    #[serde(default = "PatternSeed::default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub architectures: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub related_patterns: Vec<String>,
    #[serde(default)]
    pub code_examples: Vec<CodeExample>,
}

impl PatternSeed {
    const fn default_difficulty() -> u8 {
        1
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchitectureSeed {
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub characteristics: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub patterns: Vec<PatternSeed>,
    #[serde(default)]
    pub architectures: Vec<ArchitectureSeed>,
}

impl SeedFile {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read seed file {}: {e}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub patterns_inserted: usize,
    pub patterns_updated: usize,
    pub architectures_inserted: usize,
    pub architectures_updated: usize,
}

impl SeedReport {
    fn count(inserted: &mut usize, updated: &mut usize, outcome: Upsert) {
        match outcome {
            Upsert::Inserted(_) => *inserted += 1,
            Upsert::Updated(_) => *updated += 1,
        }
    }
}

fn resolve_slug(explicit: Option<&str>, name: &str) -> anyhow::Result<String> {
    let slug = explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| slugify(name), ToString::to_string);
    if slug.is_empty() {
        anyhow::bail!("cannot derive a slug from name {name:?}");
    }
    Ok(slug)
}

fn pattern_record(seed: &PatternSeed) -> anyhow::Result<PatternRecord> {
    if seed.name.trim().is_empty() {
        anyhow::bail!("pattern name is required");
    }
    if !(1..=MAX_DIFFICULTY).contains(&seed.difficulty) {
        anyhow::bail!(
            "difficulty {} for '{}' is outside 1..={MAX_DIFFICULTY}",
            seed.difficulty,
            seed.name
        );
    }
    Ok(PatternRecord {
        id: 0,
        slug: resolve_slug(seed.slug.as_deref(), &seed.name)?,
        name: seed.name.trim().to_string(),
        description: seed.description.clone(),
        content: seed.content.clone(),
        category: seed.category,
        difficulty: seed.difficulty,
        tags: seed.tags.clone(),
        architectures: seed.architectures.clone(),
        languages: seed.languages.clone(),
        frameworks: seed.frameworks.clone(),
        related_patterns: seed.related_patterns.clone(),
        code_examples: seed.code_examples.clone(),
    })
}

fn architecture(seed: &ArchitectureSeed) -> anyhow::Result<Architecture> {
    Ok(Architecture {
        id: 0,
        slug: resolve_slug(seed.slug.as_deref(), &seed.name)?,
        name: seed.name.trim().to_string(),
        description: seed.description.clone(),
        characteristics: seed.characteristics.clone(),
    })
}

/// Import every entry of `seed`. Validation happens up front so a bad entry
/// aborts the import before anything is written.
pub async fn import(store: &CatalogStore, seed: &SeedFile) -> anyhow::Result<SeedReport> {
    let patterns = seed
        .patterns
        .iter()
        .map(pattern_record)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let architectures = seed
        .architectures
        .iter()
        .map(architecture)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut report = SeedReport::default();
    for arch in &architectures {
        let outcome = store.upsert_architecture(arch).await?;
        SeedReport::count(
            &mut report.architectures_inserted,
            &mut report.architectures_updated,
            outcome,
        );
    }
    for record in &patterns {
        let outcome = store.upsert_pattern(record).await?;
        SeedReport::count(
            &mut report.patterns_inserted,
            &mut report.patterns_updated,
            outcome,
        );
    }

    info!(
        "Seed import done: patterns +{} ~{}, architectures +{} ~{}",
        report.patterns_inserted,
        report.patterns_updated,
        report.architectures_inserted,
        report.architectures_updated
    );
    Ok(report)
}
