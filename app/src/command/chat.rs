//! Interactive conversation with the hotel assistant.

use std::io::{BufRead, Write};
use std::sync::Arc;

use hotelier_client::HttpAssistantClient;
use hotelier_core::AssistantService;
use hotelier_conversation::render::{render_hotels, render_message, render_user_context};
use hotelier_conversation::{CardLimits, ConversationController, TurnOutcome};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::slash::ReplInput;
use super::{GlobalOptions, build_client, card_limits, conversation_config, load_config};

/// Strategy for the interactive REPL.
///
/// Owns one `ConversationController` for the lifetime of the session and
/// disposes it on the way out.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = GlobalOptions;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = load_config(&input)?;
        let client = Arc::new(build_client(&config)?);
        let limits = card_limits(&config);

        let mut interrupts = spawn_interrupt_watcher(Arc::clone(&client));
        let mut controller =
            ConversationController::new(Arc::clone(&client), conversation_config(&config));
        controller.initialize_session().await;
        drain(&mut interrupts);

        println!("=== Hotel Assistant ({}) ===", config.server.base_url);
        println!("Type /help for commands, /quit to leave.\n");
        for message in controller.messages() {
            println!("{}\n", render_message(message));
        }
        if !controller.session().is_active() {
            println!("(not connected: could not create a session, try /reconnect)\n");
        }

        let mut lines = spawn_line_reader();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let line = tokio::select! {
                line = lines.recv() => line,
                Some(()) = interrupts.recv() => None,
            };
            let Some(line) = line else {
                println!();
                break;
            };

            match ReplInput::parse(&line) {
                ReplInput::Empty => {}
                ReplInput::Quit => break,
                ReplInput::Help => println!("{}", ReplInput::help_text()),
                ReplInput::Unknown(cmd) => {
                    println!("Unknown command: {cmd} (try /help)\n");
                }
                ReplInput::Clear => {
                    controller.clear_conversation().await;
                    for message in controller.messages() {
                        println!("{}\n", render_message(message));
                    }
                    if !controller.session().is_active() {
                        println!("(not connected: try /reconnect)\n");
                    }
                }
                ReplInput::Context => println!(
                    "{}",
                    render_user_context(
                        controller.user_context(),
                        controller.missing_info(),
                        controller.ready_to_search()
                    )
                ),
                ReplInput::Hotels => {
                    if controller.suggested_hotels().is_empty() {
                        println!("No hotel suggestions yet.\n");
                    } else {
                        println!("{}", render_hotels(controller.suggested_hotels(), &limits));
                    }
                }
                ReplInput::History => show_history(&controller).await,
                ReplInput::Reconnect => {
                    if controller.session().is_active() {
                        println!("Already connected.\n");
                    } else {
                        controller.initialize_session().await;
                        if controller.session().is_active() {
                            println!("Connected.\n");
                        } else {
                            println!("Still unable to reach the assistant.\n");
                        }
                    }
                }
                ReplInput::Message(text) => {
                    if !controller.session().is_active() {
                        println!("(not connected: try /reconnect)\n");
                        continue;
                    }
                    run_turn(&mut controller, &text, &limits).await;
                }
            }
            // Ctrl+C during a request aborted that request; it must not also
            // end the session at the next prompt.
            drain(&mut interrupts);
        }

        info!("Conversation ended: {} messages", controller.messages().len());
        controller.dispose().await;
        Ok(())
    }
}

/// Send one message; Ctrl+C while waiting aborts it through the client.
async fn run_turn<S: AssistantService>(
    controller: &mut ConversationController<S>,
    text: &str,
    limits: &CardLimits,
) {
    let Some(pending) = controller.begin_send(text) else {
        return;
    };
    let hotels_before: Vec<String> = controller
        .suggested_hotels()
        .iter()
        .map(|h| h.id.clone())
        .collect();

    if controller.is_loading() {
        println!("(thinking...)");
    }
    let result = controller.service().send_chat(pending.request()).await;
    let outcome = controller.finish_send(pending, result);
    debug!("Turn outcome: {outcome:?}");

    if let Some(reply) = controller.messages().last() {
        println!("\n{}\n", render_message(reply));
    }

    let hotels_changed = controller
        .suggested_hotels()
        .iter()
        .map(|h| h.id.as_str())
        .ne(hotels_before.iter().map(String::as_str));
    if outcome == TurnOutcome::Applied
        && hotels_changed
        && !controller.suggested_hotels().is_empty()
    {
        println!("Suggested hotels:\n");
        println!("{}", render_hotels(controller.suggested_hotels(), limits));
    }
}

async fn show_history<S: AssistantService>(controller: &ConversationController<S>) {
    match controller.fetch_history().await {
        Ok(snapshot) => {
            println!(
                "Session {} ({} messages on the server)",
                snapshot.session_id,
                snapshot.messages.len()
            );
            for entry in &snapshot.messages {
                println!("  {}: {}", entry.role.as_str(), entry.content);
            }
            if let Some(query) = &snapshot.last_query {
                println!("  last search: {query}");
            }
            println!();
        }
        Err(e) => println!("Could not fetch history: {e}\n"),
    }
}

/// Every Ctrl+C aborts the client's in-flight requests and is reported to
/// the prompt loop, which treats it as quit when nothing was in flight.
fn spawn_interrupt_watcher(client: Arc<HttpAssistantClient>) -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            client.cancel_in_flight();
            if tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

fn drain(interrupts: &mut mpsc::UnboundedReceiver<()>) {
    while interrupts.try_recv().is_ok() {
        debug!("Interrupt consumed by a cancelled request");
    }
}

/// Read stdin on a plain thread so a pending read never holds up the runtime.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
