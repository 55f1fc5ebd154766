use patternhub_config::Config;
use patternhub_core::PatternProvider;

use super::{build_advisor, open_store};

#[derive(Debug, Clone)]
pub struct GenerateInput {
    pub slug: String,
    pub language: String,
    pub context: Option<String>,
}

/// Generates a sample implementation of a pattern.
#[derive(Debug, Clone, Copy)]
pub struct GenerateStrategy;

impl super::CommandStrategy for GenerateStrategy {
    type Input = GenerateInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let advisor = build_advisor(&config)?;
        let store = open_store(&config).await?;
        let pattern = store
            .find_by_slug(&input.slug)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Pattern '{}' not found", input.slug))?;

        let snippet = advisor
            .generate_code(&pattern, &input.language, input.context.as_deref())
            .await?;
        println!("{}", snippet.code);
        if !snippet.explanation.is_empty() {
            println!("\n{}", snippet.explanation);
        }
        Ok(())
    }
}
