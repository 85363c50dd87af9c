//! Conversation controller.
//!
//! The controller is the single owner of conversation state. All mutation
//! goes through `&mut self`, so every update runs to completion before any
//! other code can observe the state.

use hotelier_core::{
    AssistantService, ChatRequest, ChatResponse, ConversationSnapshot, Hotel, Message,
    ServiceError, UserContext,
};
use tracing::{debug, error, info, warn};

use crate::session::SessionState;

/// Fixed texts the controller puts into the log on its own.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// First assistant message of every conversation.
    pub greeting: String,
    /// Assistant message appended when a chat call fails.
    pub error_message: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            greeting: "Hi! I'm your hotel assistant. I can help you find the perfect hotel for your stay. Just tell me what you're looking for!".to_string(),
            error_message: "Sorry, I encountered an error. Please try again.".to_string(),
        }
    }
}

impl ConversationConfig {
    #[must_use]
    pub fn with_greeting(mut self, greeting: String) -> Self {
        self.greeting = greeting;
        self
    }

    #[must_use]
    pub fn with_error_message(mut self, message: String) -> Self {
        self.error_message = message;
        self
    }
}

/// A chat request that has been issued but not yet resolved.
///
/// Produced by [`ConversationController::begin_send`] and consumed by
/// [`ConversationController::finish_send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    seq: u64,
    epoch: u64,
    request: ChatRequest,
}

impl PendingTurn {
    #[must_use]
    pub const fn request(&self) -> &ChatRequest {
        &self.request
    }

    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

/// What [`ConversationController::finish_send`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Reply logged; context and suggestions replaced.
    Applied,
    /// A newer request had been issued before this reply arrived. The reply
    /// text is still appended so the transcript keeps every answer, but
    /// context, missing info, readiness and suggestions are left alone.
    Stale,
    /// The call failed; the error text was logged.
    Failed,
    /// The conversation was cleared while the request was in flight.
    Discarded,
}

pub struct ConversationController<S>
where
    S: AssistantService,
{
    service: S,
    config: ConversationConfig,
    messages: Vec<Message>,
    input: String,
    in_flight: usize,
    session: SessionState,
    user_context: UserContext,
    suggested_hotels: Vec<Hotel>,
    missing_info: Vec<String>,
    ready_to_search: bool,
    /// Sequence number of the most recently issued chat request.
    last_issued: u64,
    /// Bumped on every clear; responses from an older epoch are dropped.
    epoch: u64,
}

impl<S> ConversationController<S>
where
    S: AssistantService,
{
    /// Create a controller with only the greeting in its log.
    ///
    /// No session exists yet; call [`Self::initialize_session`] before
    /// sending.
    #[must_use]
    pub fn new(service: S, config: ConversationConfig) -> Self {
        let greeting = Message::assistant(config.greeting.clone());
        Self {
            service,
            config,
            messages: vec![greeting],
            input: String::new(),
            in_flight: 0,
            session: SessionState::Uninitialized,
            user_context: UserContext::default(),
            suggested_hotels: Vec::new(),
            missing_info: Vec::new(),
            ready_to_search: false,
            last_issued: 0,
            epoch: 0,
        }
    }

    /// Obtain a session from the service.
    ///
    /// Failure is logged only; the controller stays without a session and
    /// sending stays disabled. Does nothing if a session is already active.
    pub async fn initialize_session(&mut self) {
        if self.session.is_active() {
            debug!("initialize_session: session already active");
            return;
        }

        match self.service.create_session().await {
            Ok(session_id) => {
                info!("Session ready: {session_id}");
                self.session = SessionState::Active { session_id };
            }
            Err(e) => {
                error!(kind = e.kind(), "Failed to create session: {e}");
                self.session = SessionState::Uninitialized;
            }
        }
    }

    /// Synchronous first half of a send.
    ///
    /// Returns `None` (and changes nothing) when `text` is blank or no
    /// session is active. Otherwise appends the user message, clears the
    /// input buffer, raises the loading flag and returns the request to
    /// issue.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingTurn> {
        if text.trim().is_empty() {
            return None;
        }
        let Some(session_id) = self.session.session_id() else {
            debug!("Ignoring message: no active session");
            return None;
        };
        let request = ChatRequest {
            session_id: session_id.to_string(),
            message: text.to_string(),
        };

        self.messages.push(Message::user(text));
        self.input.clear();
        self.in_flight += 1;
        self.last_issued += 1;

        Some(PendingTurn {
            seq: self.last_issued,
            epoch: self.epoch,
            request,
        })
    }

    /// Second half of a send: merge the service's answer into state.
    ///
    /// The loading flag is released on every path.
    pub fn finish_send(
        &mut self,
        pending: PendingTurn,
        result: Result<ChatResponse, ServiceError>,
    ) -> TurnOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        if pending.epoch != self.epoch {
            debug!(
                seq = pending.seq,
                "Dropping reply for a conversation that was cleared"
            );
            return TurnOutcome::Discarded;
        }

        match result {
            Ok(response) => {
                self.messages.push(Message::assistant(response.message));

                if pending.seq != self.last_issued {
                    warn!(
                        seq = pending.seq,
                        latest = self.last_issued,
                        "Out-of-order reply, keeping newer context"
                    );
                    return TurnOutcome::Stale;
                }

                self.user_context = response.user_context;
                self.missing_info = response.missing_info;
                self.ready_to_search = response.ready_to_search;
                if let Some(hotels) = response.suggested_hotels {
                    debug!("Received {} hotel suggestions", hotels.len());
                    self.suggested_hotels = hotels;
                }
                TurnOutcome::Applied
            }
            Err(e) => {
                error!(kind = e.kind(), "Error sending message: {e}");
                self.messages
                    .push(Message::assistant(self.config.error_message.clone()));
                TurnOutcome::Failed
            }
        }
    }

    /// Send `text` as the next user message.
    ///
    /// Returns `None` if the message was rejected by the preconditions.
    pub async fn send_message(&mut self, text: &str) -> Option<TurnOutcome> {
        let pending = self.begin_send(text)?;
        let result = self.service.send_chat(pending.request()).await;
        Some(self.finish_send(pending, result))
    }

    /// Replace the input buffer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Send whatever is in the input buffer.
    pub async fn submit_input(&mut self) -> Option<TurnOutcome> {
        let text = self.input.clone();
        self.send_message(&text).await
    }

    /// Discard the current session and start over with a fresh one.
    ///
    /// Deleting the old session is best-effort. If the service will not hand
    /// out a new session the controller ends up without one rather than
    /// holding on to the deleted id.
    pub async fn clear_conversation(&mut self) {
        let Some(previous) = self.session.session_id().map(str::to_owned) else {
            debug!("clear_conversation: no active session");
            return;
        };
        info!("Clearing session {previous}");
        self.session = SessionState::Clearing {
            previous: previous.clone(),
        };

        if let Err(e) = self.service.delete_session(&previous).await {
            warn!(kind = e.kind(), "Error clearing chat: {e}");
        }

        self.reset_local_state();

        match self.service.create_session().await {
            Ok(session_id) => {
                info!("Session ready: {session_id}");
                self.session = SessionState::Active { session_id };
            }
            Err(e) => {
                error!(kind = e.kind(), "Failed to create session after clear: {e}");
                self.session = SessionState::Uninitialized;
            }
        }
    }

    fn reset_local_state(&mut self) {
        self.messages = vec![Message::assistant(self.config.greeting.clone())];
        self.user_context = UserContext::default();
        self.suggested_hotels.clear();
        self.missing_info.clear();
        self.ready_to_search = false;
        self.epoch += 1;
    }

    /// The service's own record of the active session.
    pub async fn fetch_history(&self) -> Result<ConversationSnapshot, ServiceError> {
        let session_id = self.session.session_id().ok_or(ServiceError::NoSession)?;
        self.service.history(session_id).await
    }

    /// Tear the controller down, asking the service to forget the session.
    pub async fn dispose(self) {
        let Some(session_id) = self.session.session_id() else {
            return;
        };
        match self.service.delete_session(session_id).await {
            Ok(()) => info!("Disposed session {session_id}"),
            Err(e) => warn!(kind = e.kind(), "Failed to delete session on dispose: {e}"),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session.session_id()
    }

    #[must_use]
    pub const fn user_context(&self) -> &UserContext {
        &self.user_context
    }

    #[must_use]
    pub fn suggested_hotels(&self) -> &[Hotel] {
        &self.suggested_hotels
    }

    #[must_use]
    pub fn missing_info(&self) -> &[String] {
        &self.missing_info
    }

    #[must_use]
    pub const fn ready_to_search(&self) -> bool {
        self.ready_to_search
    }

    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Hands out one fixed session id and echoes chat messages.
    struct EchoService;

    #[async_trait]
    impl AssistantService for EchoService {
        async fn create_session(&self) -> Result<String, ServiceError> {
            Ok("s-1".to_string())
        }

        async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ServiceError> {
            Ok(ChatResponse {
                session_id: request.session_id.clone(),
                message: format!("echo: {}", request.message),
                user_context: UserContext::default(),
                missing_info: Vec::new(),
                ready_to_search: false,
                suggested_hotels: None,
            })
        }

        async fn delete_session(&self, _session_id: &str) -> Result<(), ServiceError> {
            Ok(())
        }

        async fn history(&self, session_id: &str) -> Result<ConversationSnapshot, ServiceError> {
            Ok(ConversationSnapshot {
                session_id: session_id.to_string(),
                messages: Vec::new(),
                user_context: UserContext::default(),
                missing_info: Vec::new(),
                ready_to_search: false,
                last_query: None,
            })
        }

        async fn recommend(&self, _query: &str) -> Result<Vec<Hotel>, ServiceError> {
            Ok(Vec::new())
        }
    }

    fn reply(message: &str, location: &str) -> ChatResponse {
        ChatResponse {
            session_id: "s-1".to_string(),
            message: message.to_string(),
            user_context: UserContext {
                location: Some(location.to_string()),
                ..UserContext::default()
            },
            missing_info: Vec::new(),
            ready_to_search: false,
            suggested_hotels: None,
        }
    }

    #[test]
    fn starts_with_greeting_and_no_session() {
        let controller = ConversationController::new(EchoService, ConversationConfig::default());
        assert_eq!(controller.messages().len(), 1);
        assert!(controller.messages()[0].content.starts_with("Hi!"));
        assert_eq!(controller.session(), &SessionState::Uninitialized);
        assert!(!controller.is_loading());
        assert!(controller.user_context().is_empty());
    }

    #[test]
    fn begin_send_requires_session() {
        let mut controller =
            ConversationController::new(EchoService, ConversationConfig::default());
        assert!(controller.begin_send("hello").is_none());
        assert_eq!(controller.messages().len(), 1);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn begin_send_appends_before_the_call() {
        let mut controller =
            ConversationController::new(EchoService, ConversationConfig::default());
        controller.initialize_session().await;
        controller.set_input("Paris");

        let pending = controller.begin_send("Paris").unwrap();
        assert_eq!(pending.request().session_id, "s-1");
        assert_eq!(controller.messages().len(), 2);
        assert_eq!(controller.messages()[1].content, "Paris");
        assert!(controller.input().is_empty());
        assert!(controller.is_loading());
    }

    #[tokio::test]
    async fn out_of_order_replies_keep_newest_context() {
        let mut controller =
            ConversationController::new(EchoService, ConversationConfig::default());
        controller.initialize_session().await;

        let first = controller.begin_send("Paris").unwrap();
        let second = controller.begin_send("Actually, Rome").unwrap();
        assert!(second.seq() > first.seq());

        let outcome = controller.finish_send(second, Ok(reply("Rome it is", "Rome")));
        assert_eq!(outcome, TurnOutcome::Applied);
        assert!(controller.is_loading());

        let outcome = controller.finish_send(first, Ok(reply("Paris it is", "Paris")));
        assert_eq!(outcome, TurnOutcome::Stale);
        assert!(!controller.is_loading());

        assert_eq!(controller.user_context().location.as_deref(), Some("Rome"));
        assert_eq!(controller.messages().len(), 5);
        assert_eq!(
            controller.messages().last().map(|m| m.content.as_str()),
            Some("Paris it is")
        );
    }

    #[tokio::test]
    async fn replies_from_before_a_clear_are_dropped() {
        let mut controller =
            ConversationController::new(EchoService, ConversationConfig::default());
        controller.initialize_session().await;

        let pending = controller.begin_send("Paris").unwrap();
        controller.clear_conversation().await;

        let outcome = controller.finish_send(pending, Ok(reply("Paris it is", "Paris")));
        assert_eq!(outcome, TurnOutcome::Discarded);
        assert_eq!(controller.messages().len(), 1);
        assert!(controller.user_context().is_empty());
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn submit_input_sends_buffer() {
        let mut controller =
            ConversationController::new(EchoService, ConversationConfig::default());
        controller.initialize_session().await;
        controller.set_input("Somewhere quiet");

        let outcome = controller.submit_input().await;
        assert_eq!(outcome, Some(TurnOutcome::Applied));
        assert_eq!(
            controller.messages().last().unwrap().content,
            "echo: Somewhere quiet"
        );
        assert!(controller.input().is_empty());
    }

    #[tokio::test]
    async fn fetch_history_without_session_is_error() {
        let controller = ConversationController::new(EchoService, ConversationConfig::default());
        let err = controller.fetch_history().await.unwrap_err();
        assert!(matches!(err, ServiceError::NoSession));
    }
}
