use hotelier_config::Config;
use hotelier_conversation::render::truncate_text;
use hotelier_core::AssistantService;
use tracing::info;

use super::{GlobalOptions, build_client, load_config};

/// Strategy for displaying the effective configuration.
///
/// Also probes the service by creating (and immediately deleting) a session.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = GlobalOptions;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = load_config(&input)?;

        println!("=== hotelier Configuration ===\n");

        let path = match &input.config_path {
            Some(path) => path.clone(),
            None => Config::default_path()?,
        };
        println!("Config File:");
        if path.exists() {
            println!("  {}", path.display());
        } else {
            println!("  {} (not found, using defaults)", path.display());
        }
        println!();

        println!("Server:");
        println!("  Base URL: {}", config.server.base_url);
        println!("  Request Timeout: {}s", config.server.request_timeout_secs);

        info!("Probing assistant service");
        let client = build_client(&config)?;
        match client.create_session().await {
            Ok(session_id) => {
                println!("  Status: Reachable");
                if let Err(e) = client.delete_session(&session_id).await {
                    info!("Probe session cleanup failed: {e}");
                }
            }
            Err(e) => {
                println!("  Status: Unreachable");
                println!("  Error: {e}");
            }
        }
        println!();

        println!("Assistant:");
        println!("  Greeting: {}", truncate_text(&config.assistant.greeting, 60));
        println!(
            "  Error Message: {}",
            truncate_text(&config.assistant.error_message, 60)
        );
        println!();

        println!("Display:");
        println!(
            "  Description Max Chars: {}",
            config.display.description_max_chars
        );
        println!("  Max Amenities: {}", config.display.max_amenities);
        println!("  Max Highlights: {}", config.display.max_highlights);

        Ok(())
    }
}
