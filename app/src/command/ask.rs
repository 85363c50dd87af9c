use hotelier_conversation::render::{render_hotels, render_message, render_user_context};
use hotelier_conversation::{ConversationController, TurnOutcome};
use tracing::info;

use super::{GlobalOptions, build_client, card_limits, conversation_config, load_config};

/// Input parameters for the Ask command strategy.
#[derive(Debug, Clone)]
pub struct AskInput {
    pub options: GlobalOptions,
    /// The single message to send
    pub message: String,
}

/// Strategy for one-shot questions.
///
/// Opens a session, sends one message, prints the reply together with the
/// extracted preferences and any suggestions, then disposes the session.
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = load_config(&input.options)?;
        let client = build_client(&config)?;
        let limits = card_limits(&config);

        let mut controller = ConversationController::new(client, conversation_config(&config));
        controller.initialize_session().await;
        if !controller.session().is_active() {
            anyhow::bail!(
                "Could not create a session at {}. Is the assistant running?",
                config.server.base_url
            );
        }

        let Some(outcome) = controller.send_message(&input.message).await else {
            controller.dispose().await;
            anyhow::bail!("Nothing to send: message is empty");
        };
        info!("Turn outcome: {outcome:?}");

        if let Some(reply) = controller.messages().last() {
            println!("{}\n", render_message(reply));
        }

        let failed = outcome == TurnOutcome::Failed;
        if !failed {
            println!(
                "{}",
                render_user_context(
                    controller.user_context(),
                    controller.missing_info(),
                    controller.ready_to_search()
                )
            );
            if !controller.suggested_hotels().is_empty() {
                println!("{}", render_hotels(controller.suggested_hotels(), &limits));
            }
        }

        controller.dispose().await;
        if failed {
            anyhow::bail!("The assistant could not answer");
        }
        Ok(())
    }
}
