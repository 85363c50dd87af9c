use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Hotel, Role, ServiceError, UserContext};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Reply to one chat turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub session_id: String,
    pub message: String,
    #[serde(default)]
    pub user_context: UserContext,
    #[serde(default)]
    pub missing_info: Vec<String>,
    #[serde(default)]
    pub ready_to_search: bool,
    /// `None` means "no new suggestions", not "no hotels".
    #[serde(default)]
    pub suggested_hotels: Option<Vec<Hotel>>,
}

/// A message as stored server-side; the service does not always stamp them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Server-side view of a session, as returned by the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationSnapshot {
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<HistoryEntry>,
    #[serde(default)]
    pub user_context: UserContext,
    #[serde(default)]
    pub missing_info: Vec<String>,
    #[serde(default)]
    pub ready_to_search: bool,
    #[serde(default)]
    pub last_query: Option<String>,
}

/// The remote hotel assistant.
///
/// Every method is one network round trip. Implementations must not retry.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Ask the service for a fresh session identifier.
    async fn create_session(&self) -> Result<String, ServiceError>;

    /// Send one user message within a session.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ServiceError>;

    /// Discard a session server-side.
    async fn delete_session(&self, session_id: &str) -> Result<(), ServiceError>;

    /// Fetch the server's record of a session.
    async fn history(&self, session_id: &str) -> Result<ConversationSnapshot, ServiceError>;

    /// Stateless hotel search outside any conversation.
    async fn recommend(&self, query: &str) -> Result<Vec<Hotel>, ServiceError>;
}

#[async_trait]
impl<T: AssistantService + ?Sized> AssistantService for Arc<T> {
    async fn create_session(&self) -> Result<String, ServiceError> {
        (**self).create_session().await
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ServiceError> {
        (**self).send_chat(request).await
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ServiceError> {
        (**self).delete_session(session_id).await
    }

    async fn history(&self, session_id: &str) -> Result<ConversationSnapshot, ServiceError> {
        (**self).history(session_id).await
    }

    async fn recommend(&self, query: &str) -> Result<Vec<Hotel>, ServiceError> {
        (**self).recommend(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_without_hotels() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "session_id": "abc",
            "message": "Where would you like to stay?",
            "user_context": {"preferred_amenities": [], "special_requirements": []},
            "missing_info": ["location", "dates"],
            "ready_to_search": false
        }))
        .unwrap();

        assert!(response.suggested_hotels.is_none());
        assert_eq!(response.missing_info, vec!["location", "dates"]);
    }

    #[test]
    fn chat_response_with_empty_hotel_list_is_some() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "session_id": "abc",
            "message": "Nothing matched.",
            "user_context": {"preferred_amenities": [], "special_requirements": []},
            "missing_info": [],
            "ready_to_search": true,
            "suggested_hotels": []
        }))
        .unwrap();

        assert_eq!(response.suggested_hotels, Some(Vec::new()));
    }

    #[test]
    fn snapshot_accepts_system_messages_without_timestamps() {
        let snapshot: ConversationSnapshot = serde_json::from_value(serde_json::json!({
            "session_id": "abc",
            "messages": [
                {"role": "system", "content": "You are a hotel assistant."},
                {"role": "user", "content": "Paris please", "timestamp": "2026-10-19T10:00:00Z"}
            ],
            "user_context": {"location": "Paris", "preferred_amenities": [], "special_requirements": []},
            "missing_info": ["dates"],
            "ready_to_search": false,
            "last_query": null
        }))
        .unwrap();

        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].role, Role::System);
        assert!(snapshot.messages[0].timestamp.is_none());
        assert_eq!(snapshot.user_context.location.as_deref(), Some("Paris"));
    }
}
