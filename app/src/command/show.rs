use patternhub_config::Config;
use patternhub_core::{PatternProvider, resolve_related};

use super::open_store;

#[derive(Debug, Clone)]
pub struct ShowInput {
    pub slug: String,
}

/// Prints one pattern with its examples and related patterns.
#[derive(Debug, Clone, Copy)]
pub struct ShowStrategy;

impl super::CommandStrategy for ShowStrategy {
    type Input = ShowInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = open_store(&config).await?;
        let patterns = store.all_patterns().await?;
        let pattern = patterns
            .iter()
            .find(|p| p.slug == input.slug)
            .ok_or_else(|| anyhow::anyhow!("Pattern '{}' not found", input.slug))?;

        println!("{} ({}, difficulty {})", pattern.name, pattern.category, pattern.difficulty);
        println!("{}\n", pattern.description);
        if !pattern.content.is_empty() {
            println!("{}\n", pattern.content);
        }
        if !pattern.tags.is_empty() {
            println!("Tags: {}", pattern.tags.join(", "));
        }
        if !pattern.architectures.is_empty() {
            println!("Architectures: {}", pattern.architectures.join(", "));
        }
        if !pattern.languages.is_empty() {
            println!("Languages: {}", pattern.languages.join(", "));
        }
        if !pattern.frameworks.is_empty() {
            println!("Frameworks: {}", pattern.frameworks.join(", "));
        }

        let related = resolve_related(pattern, &patterns);
        if !related.is_empty() {
            let names: Vec<&str> = related.iter().map(|p| p.name.as_str()).collect();
            println!("Related: {}", names.join(", "));
        }

        for example in &pattern.code_examples {
            println!("\n--- {} ---\n{}", example.language, example.code);
            if let Some(explanation) = &example.explanation {
                println!("{explanation}");
            }
        }
        Ok(())
    }
}
