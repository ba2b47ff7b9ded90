//! Authenticated caller extractor.

use crate::responses::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use confab_cache::{keys, CacheStoreExt, Namespace};
use confab_core::{AuthId, ConfabError, UserId};
use serde_json::Value;

/// The resolved identity of the caller.
///
/// Extraction reads the bearer token (the caller's opaque auth id at the
/// external identity provider) and resolves it to the internal user profile
/// through the cache facade, so repeated requests from the same caller hit
/// the identity cache instead of the backend.
pub struct CurrentUser {
    pub user_id: UserId,
    pub auth_id: AuthId,
    pub profile: Value,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AppError(ConfabError::unauthorized("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError(ConfabError::unauthorized("Invalid authorization format"))
        })?;

        if token.is_empty() {
            return Err(AppError(ConfabError::unauthorized("Empty bearer token")));
        }

        let auth_id = AuthId::new(token);

        let backend = state.backend.clone();
        let loader_auth_id = auth_id.clone();
        let profile: Value = state
            .store
            .get_or_set(&keys::identity(&auth_id), Namespace::Identity.ttl(), || async move {
                backend.resolve_identity(&loader_auth_id).await
            })
            .await
            .map_err(AppError)?;

        let user_id = profile
            .get("id")
            .and_then(Value::as_str)
            .map(UserId::new)
            .ok_or_else(|| {
                AppError(ConfabError::internal(
                    "Identity payload is missing the user id",
                ))
            })?;

        Ok(Self {
            user_id,
            auth_id,
            profile,
        })
    }
}
