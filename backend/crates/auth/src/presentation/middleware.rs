//! Viewer resolution
//!
//! Reads `Authorization: JWT <token>` (or `Bearer <token>`) and binds the
//! matching User to the request.

use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::application::AuthenticateUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::guard::Viewer;
use std::sync::Arc;

/// Resolve the identity for a request
///
/// Never fails: problems with the token are carried in `Viewer::Rejected`,
/// storage failures in `Viewer::Failed`, and both surface only when a
/// resolver calls `login_required`.
pub async fn resolve_viewer<U>(
    headers: &HeaderMap,
    store: &Arc<U>,
    config: &Arc<AuthConfig>,
) -> Viewer
where
    U: UserRepository,
{
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Viewer::Anonymous;
    };

    let Some(token) = header
        .to_str()
        .ok()
        .and_then(|value| config.strip_token_prefix(value))
    else {
        // Unrecognised scheme: treat as no credential
        return Viewer::Anonymous;
    };

    let use_case = AuthenticateUseCase::new(store.clone(), config.clone());
    match use_case.execute(token).await {
        Ok(user) => Viewer::Authenticated(user),
        Err(AuthError::Token(e)) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            Viewer::Rejected(e)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve bearer token");
            Viewer::Failed(e.to_string())
        }
    }
}
