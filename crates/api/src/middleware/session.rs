//! Session cookie extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use forest_core::session_keys::{generate_session_key, hash_session_key};
use forest_core::types::DbId;
use forest_db::models::account::Account;
use forest_db::models::session::{CreateSession, Session};
use forest_db::repositories::{AccountRepo, SessionRepo};

use crate::error::AppError;
use crate::state::AppState;

/// Request-scoped view of the caller's session.
///
/// A missing, unknown or expired cookie yields an empty context; only a
/// database failure rejects the request. Use it as an extractor parameter:
///
/// ```ignore
/// async fn my_handler(ctx: SessionContext) -> AppResult<Json<()>> {
///     if let Some(account) = ctx.into_account() {
///         tracing::info!(account_id = account.id, "handling request");
///     }
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    session: Option<Session>,
    account: Option<Account>,
}

impl SessionContext {
    /// Digest of the active session key, used to scope per-session data.
    pub fn key_hash(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.key_hash.as_str())
    }

    /// Consume the context, returning the logged-in account.
    pub fn into_account(self) -> Option<Account> {
        self.account
    }
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(key) = state.config.session.read_key(&parts.headers) else {
            return Ok(Self::default());
        };

        let Some(session) =
            SessionRepo::find_active_by_key_hash(&state.pool, &hash_session_key(&key)).await?
        else {
            tracing::debug!("Session cookie did not match an active session");
            return Ok(Self::default());
        };

        let account = match session.account_id {
            Some(id) => AccountRepo::find_by_id(&state.pool, id).await?,
            None => None,
        };

        Ok(Self {
            session: Some(session),
            account,
        })
    }
}

/// Open a fresh session (anonymous when `account_id` is `None`).
///
/// Returns the stored row together with the `Set-Cookie` value handing the
/// plaintext key to the browser. The plaintext is never persisted.
pub async fn start_session(
    state: &AppState,
    account_id: Option<DbId>,
) -> Result<(Session, HeaderValue), AppError> {
    let key = generate_session_key();
    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            key_hash: key.hash,
            account_id,
            expires_at: state.config.session.expires_at(),
        },
    )
    .await?;

    let cookie = state
        .config
        .session
        .issue_cookie(&key.plaintext)
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))?;

    tracing::debug!(session_id = session.id, ?account_id, "Session started");
    Ok((session, cookie))
}
