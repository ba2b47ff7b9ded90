//! HTTP/JSON implementation of the backend client.

use crate::client::BackendClient;
use async_trait::async_trait;
use confab_core::{AuthId, ConfabError, ConfabResult, ConversationId, MessageId, RoomId, UserId};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP-based backend client.
///
/// Uses HTTP/1.1 with JSON over a pooled reqwest client.
pub struct HttpBackendClient {
    client: Client,
    base_url: String,
}

impl HttpBackendClient {
    /// Creates a new backend client.
    pub fn new(base_url: &str, timeout: Duration) -> ConfabResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(100)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ConfabError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a backend client over an existing reqwest client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> ConfabResult<Value> {
        debug!(path, "backend query");

        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| ConfabError::Backend(format!("Request to '{}' failed: {}", path, e)))?;

        match response.status() {
            status if status.is_success() => response
                .json::<Value>()
                .await
                .map_err(|e| ConfabError::Backend(format!("Invalid JSON from '{}': {}", path, e))),
            StatusCode::NOT_FOUND => Err(ConfabError::not_found("backend resource", path)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ConfabError::unauthorized(
                format!("Backend rejected credentials for '{}'", path),
            )),
            status => Err(ConfabError::Backend(format!(
                "Backend returned {} for '{}'",
                status, path
            ))),
        }
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn resolve_identity(&self, auth_id: &AuthId) -> ConfabResult<Value> {
        self.get_json(
            &format!("/users/by-auth/{}", auth_id),
            &[],
        )
        .await
        .map_err(|e| match e {
            // An auth id the backend has never seen is a credential
            // problem, not a missing resource.
            ConfabError::NotFound { .. } => {
                ConfabError::unauthorized("Unknown auth id".to_string())
            }
            other => other,
        })
    }

    async fn conversations(&self, user_id: &UserId) -> ConfabResult<Value> {
        self.get_json(&format!("/users/{}/conversations", user_id), &[])
            .await
    }

    async fn message_page(
        &self,
        conversation_id: &ConversationId,
        page: u32,
    ) -> ConfabResult<Value> {
        self.get_json(
            &format!("/conversations/{}/messages", conversation_id),
            &[("page", &page.to_string())],
        )
        .await
    }

    async fn message_reactions(&self, message_id: &MessageId) -> ConfabResult<Value> {
        self.get_json(&format!("/messages/{}/reactions", message_id), &[])
            .await
    }

    async fn presence(&self, user_id: &UserId) -> ConfabResult<Value> {
        self.get_json(&format!("/presence/{}", user_id), &[]).await
    }

    async fn room(&self, room_id: &RoomId) -> ConfabResult<Value> {
        self.get_json(&format!("/rooms/{}", room_id), &[]).await
    }

    async fn public_rooms(&self) -> ConfabResult<Value> {
        self.get_json("/rooms", &[("visibility", "public")]).await
    }

    async fn search(
        &self,
        query: &str,
        scope: Option<&ConversationId>,
    ) -> ConfabResult<Value> {
        let mut params = vec![("q", query.to_string())];
        if let Some(conversation_id) = scope {
            params.push(("conversation", conversation_id.to_string()));
        }
        let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.get_json("/search", &params).await
    }

    async fn story_feed(&self, user_id: &UserId) -> ConfabResult<Value> {
        self.get_json(&format!("/users/{}/stories", user_id), &[])
            .await
    }

    async fn friend_list(&self, user_id: &UserId) -> ConfabResult<Value> {
        self.get_json(&format!("/users/{}/friends", user_id), &[])
            .await
    }

    async fn friend_requests(&self, user_id: &UserId) -> ConfabResult<Value> {
        self.get_json(&format!("/users/{}/friend-requests", user_id), &[])
            .await
    }

    async fn support_tickets(&self, user_id: &UserId) -> ConfabResult<Value> {
        self.get_json(&format!("/users/{}/support-tickets", user_id), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_trimmed() {
        let client = HttpBackendClient::new("http://backend:9000/", Duration::from_secs(5))
            .unwrap();
        assert_eq!(client.url("/rooms"), "http://backend:9000/rooms");
    }
}
