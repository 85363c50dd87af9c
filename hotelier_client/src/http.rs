use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use hotelier_core::{
    AssistantService, ChatRequest, ChatResponse, ConversationSnapshot, Hotel, NewSessionResponse,
    ServiceError,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

/// `AssistantService` over HTTP + JSON.
///
/// Each call is bounded by `timeout` and can be aborted in two ways:
/// [`Self::cancel_in_flight`] stops only the calls outstanding at that
/// moment, while the shutdown token stops every call for good. Nothing is
/// retried.
pub struct HttpAssistantClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    shutdown: CancellationToken,
    /// Child of `shutdown` watched by calls started since the last
    /// `cancel_in_flight`.
    in_flight: Mutex<CancellationToken>,
}

impl HttpAssistantClient {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    #[must_use]
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        info!("Creating HttpAssistantClient for {base_url}");
        let shutdown = CancellationToken::new();
        Self {
            client: Client::new(),
            base_url,
            timeout,
            in_flight: Mutex::new(shutdown.child_token()),
            shutdown,
        }
    }

    /// Tie the client to a caller-owned shutdown token. Once it fires, every
    /// call fails with [`ServiceError::Cancelled`].
    #[must_use]
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.in_flight = Mutex::new(token.child_token());
        self.shutdown = token;
        self
    }

    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Abort the calls currently awaiting a response.
    ///
    /// Calls started afterwards watch a fresh token and run normally.
    pub fn cancel_in_flight(&self) {
        let mut current = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        debug!("Cancelling in-flight requests");
        current.cancel();
        *current = self.shutdown.child_token();
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn call_token(&self) -> CancellationToken {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run one request under the deadline and the current cancellation token.
    async fn bounded<T, F>(&self, operation: &str, request: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        let token = self.call_token();
        tokio::select! {
            () = token.cancelled() => {
                debug!("{operation} cancelled");
                Err(ServiceError::Cancelled)
            }
            outcome = tokio::time::timeout(self.timeout, request) => {
                outcome.unwrap_or_else(|_| {
                    debug!("{operation} timed out after {:?}", self.timeout);
                    Err(ServiceError::Timeout(self.timeout))
                })
            }
        }
    }

    async fn check_status(response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let bytes = Self::check_status(response)
            .await?
            .bytes()
            .await
            .map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> ServiceError {
    if e.is_decode() {
        ServiceError::Decode(e.to_string())
    } else {
        ServiceError::Transport(e.to_string())
    }
}

#[async_trait]
impl AssistantService for HttpAssistantClient {
    async fn create_session(&self) -> Result<String, ServiceError> {
        let url = self.endpoint(&["chat", "new-session"]);
        debug!("POST {url}");

        let created: NewSessionResponse = self
            .bounded("create_session", async {
                let response = self
                    .client
                    .post(url)
                    .send()
                    .await
                    .map_err(transport_error)?;
                Self::read_json(response).await
            })
            .await?;

        info!("Created session {}", created.session_id);
        Ok(created.session_id)
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ServiceError> {
        let url = self.endpoint(&["chat", "chat"]);
        info!("Sending chat message: session={}", request.session_id);

        let response: ChatResponse = self
            .bounded("send_chat", async {
                let response = self
                    .client
                    .post(url)
                    .json(request)
                    .send()
                    .await
                    .map_err(transport_error)?;
                Self::read_json(response).await
            })
            .await?;

        debug!(
            "Chat reply: ready_to_search={}, hotels={:?}",
            response.ready_to_search,
            response.suggested_hotels.as_ref().map(Vec::len)
        );
        Ok(response)
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(&["chat", session_id]);
        debug!("DELETE {url}");

        self.bounded("delete_session", async {
            let response = self
                .client
                .delete(url)
                .send()
                .await
                .map_err(transport_error)?;
            Self::check_status(response).await.map(drop)
        })
        .await?;

        info!("Deleted session {session_id}");
        Ok(())
    }

    async fn history(&self, session_id: &str) -> Result<ConversationSnapshot, ServiceError> {
        let url = self.endpoint(&["chat", session_id, "history"]);
        debug!("GET {url}");

        self.bounded("history", async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(transport_error)?;
            Self::read_json(response).await
        })
        .await
    }

    async fn recommend(&self, query: &str) -> Result<Vec<Hotel>, ServiceError> {
        let url = self.endpoint(&["recommendations"]);
        info!("Requesting recommendations: query={query:?}");

        let hotels: Vec<Hotel> = self
            .bounded("recommend", async {
                let response = self
                    .client
                    .get(url)
                    .query(&[("query", query)])
                    .send()
                    .await
                    .map_err(transport_error)?;
                Self::read_json(response).await
            })
            .await?;

        info!("Received {} recommendations", hotels.len());
        Ok(hotels)
    }
}
