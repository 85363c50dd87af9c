//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own strategy type with its own input type, so
//! dispatch in `main` is resolved at compile time.

use std::path::PathBuf;

use hotelier_client::HttpAssistantClient;
use hotelier_config::Config;
use hotelier_conversation::{CardLimits, ConversationConfig};
use tracing::info;
use url::Url;

mod ask;
mod chat;
mod info;
mod init;
mod recommend;
mod slash;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use chat::ChatStrategy;
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use recommend::{RecommendInput, RecommendStrategy};
pub use version::VersionStrategy;

/// Flags shared by every subcommand that talks to the service.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
}

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so no
/// parameters are passed through runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Load the config file (or defaults) and apply command-line overrides.
fn load_config(options: &GlobalOptions) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(options.config_path.as_deref())?;

    if let Some(base_url) = &options.base_url {
        info!("Overriding server.base_url with {base_url}");
        config.server.base_url.clone_from(base_url);
    }
    config.validate()?;

    Ok(config)
}

fn build_client(config: &Config) -> anyhow::Result<HttpAssistantClient> {
    let base_url = Url::parse(&config.server.base_url)?;
    Ok(HttpAssistantClient::new(
        base_url,
        config.server.request_timeout(),
    ))
}

fn conversation_config(config: &Config) -> ConversationConfig {
    ConversationConfig::default()
        .with_greeting(config.assistant.greeting.clone())
        .with_error_message(config.assistant.error_message.clone())
}

const fn card_limits(config: &Config) -> CardLimits {
    CardLimits {
        description_max_chars: config.display.description_max_chars,
        max_amenities: config.display.max_amenities,
        max_highlights: config.display.max_highlights,
    }
}
