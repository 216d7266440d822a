//! Bearer token to editor identity.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{FromRequestParts, OriginalUri};
use http::header::AUTHORIZATION;
use http::request::Parts;
use neeru_errors::Problem;
use neeru_utils::SecretString;
use supply_points_sdk::Identity;

use crate::errors::ErrorCode;

/// Editors known to this host, keyed by their bearer token.
#[derive(Debug, Clone, Default)]
pub struct EditorTokens {
    by_token: Arc<HashMap<String, Identity>>,
}

impl EditorTokens {
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<&Identity> {
        self.by_token.get(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

impl FromIterator<(SecretString, Identity)> for EditorTokens {
    fn from_iter<I: IntoIterator<Item = (SecretString, Identity)>>(iter: I) -> Self {
        let by_token = iter
            .into_iter()
            .map(|(token, identity)| (token.expose().to_owned(), identity))
            .collect();
        Self {
            by_token: Arc::new(by_token),
        }
    }
}

/// The signed-in editor making a write request.
#[derive(Debug, Clone)]
pub struct Editor(pub Identity);

/// Full request path, including any prefix the router was nested under.
fn request_path(parts: &Parts) -> &str {
    parts
        .extensions
        .get::<OriginalUri>()
        .map_or_else(|| parts.uri.path(), |original| original.path())
}

fn unauthorized(parts: &Parts, detail: &str) -> Problem {
    let trace_id = tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string());
    ErrorCode::editor_unauthorized_v1().with_context(detail, request_path(parts), trace_id)
}

impl<S> FromRequestParts<S> for Editor
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(tokens) = parts.extensions.get::<EditorTokens>() else {
            tracing::error!("EditorTokens extension missing from router");
            return Err(ErrorCode::internal_v1().with_context(
                "Editor authentication is not wired",
                request_path(parts),
                None,
            ));
        };
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized(parts, "Missing bearer token"))?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| unauthorized(parts, "Malformed authorization header"))?;
        let identity = tokens
            .resolve(token)
            .cloned()
            .ok_or_else(|| unauthorized(parts, "Unknown bearer token"))?;
        Ok(Self(identity))
    }
}
