use std::path::PathBuf;

use hotelier_config::Config;

/// Strategy for writing the initial config file.
///
/// Writes to `--config` when given, otherwise `~/hotelier/config.json`.
/// Never overwrites an existing file.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let path = match input {
            Some(path) => {
                Config::write_template(&path)?;
                path
            }
            None => Config::create_config()?,
        };

        println!("✅ Created config file at: {}", path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Point server.base_url at your assistant (default http://localhost:8000/api)");
        println!("   2. Run 'hotelier chat' to start a conversation");
        println!();
        println!("🔧 Configuration options:");
        println!("   - server.request_timeout_secs: give up on a request after this long");
        println!("   - assistant.greeting / assistant.error_message: fixed assistant texts");
        println!("   - display.*: how much of each hotel card to show");
        println!();
        Ok(())
    }
}
