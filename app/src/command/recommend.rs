use hotelier_conversation::render::render_hotels;
use hotelier_core::AssistantService;

use super::{GlobalOptions, build_client, card_limits, load_config};

/// Input parameters for the Recommend command strategy.
#[derive(Debug, Clone)]
pub struct RecommendInput {
    pub options: GlobalOptions,
    pub query: String,
}

/// Strategy for stateless hotel search; no session is created.
#[derive(Debug, Clone, Copy)]
pub struct RecommendStrategy;

impl super::CommandStrategy for RecommendStrategy {
    type Input = RecommendInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let query = input.query.trim();
        if query.is_empty() {
            anyhow::bail!("Query must not be empty");
        }

        let config = load_config(&input.options)?;
        let client = build_client(&config)?;

        let hotels = client.recommend(query).await?;
        if hotels.is_empty() {
            println!("No hotels found for \"{query}\".");
        } else {
            println!("{}", render_hotels(&hotels, &card_limits(&config)));
        }

        Ok(())
    }
}
