use patternhub_config::Config;
use patternhub_core::{PatternProvider, Preferences, RecommendationRequest};

use super::{build_advisor, open_store};

#[derive(Debug, Clone, Default)]
pub struct RecommendInput {
    pub description: String,
    pub preferences: Preferences,
}

/// Asks the model which catalog patterns fit a project.
#[derive(Debug, Clone, Copy)]
pub struct RecommendStrategy;

impl super::CommandStrategy for RecommendStrategy {
    type Input = RecommendInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let advisor = build_advisor(&config)?;
        let store = open_store(&config).await?;
        let catalog = store.all_patterns().await?;

        let request = RecommendationRequest {
            project_description: input.description,
            preferences: (!input.preferences.is_empty()).then_some(input.preferences),
        };
        let recommendations = advisor.recommend(&request, &catalog).await?;

        if recommendations.is_empty() {
            println!("No recommendations.");
            return Ok(());
        }
        for rec in &recommendations {
            println!("[{:>2}/10] {} ({})", rec.relevance_score, rec.pattern_name, rec.pattern_slug);
            println!("        Why: {}", rec.reason);
            if !rec.use_case.is_empty() {
                println!("        Use: {}", rec.use_case);
            }
        }
        Ok(())
    }
}
