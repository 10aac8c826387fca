//! Handlers for the `/users` resource (profiles, registration, login, logout).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::Json;
use forest_core::accounts::{LoginInput, RegisterInput, INVALID_CREDENTIALS};
use forest_core::error::CoreError;
use forest_core::types::DbId;
use forest_core::validation::field_error;
use forest_db::models::account::{Account, AccountResponse, CreateAccount};
use forest_db::repositories::{AccountRepo, SessionRepo};
use serde::Serialize;

use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::json_body;
use crate::middleware::session::{start_session, SessionContext};
use crate::state::AppState;

/// Field message for a taken username.
const USERNAME_TAKEN: &str = "A user with that username already exists.";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Body of `GET /users/current_user/`: the profile, or `{"user": null}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CurrentUser {
    LoggedIn(AccountResponse),
    Anonymous { user: Option<AccountResponse> },
}

/// Confirmation body for logout.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

type WithCookie<T> = ([(axum::http::HeaderName, HeaderValue); 1], T);

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = AccountRepo::list(&state.pool).await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// GET /api/users/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AccountResponse>> {
    let account = AccountRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(Json(account.into()))
}

/// POST /api/users/
///
/// Create an account without logging the caller in.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<RegisterInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = create_account(&state, json_body(body)?).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// POST /api/users/register/
///
/// Create an account and start a logged-in session for it.
pub async fn register(
    State(state): State<AppState>,
    ctx: SessionContext,
    body: Result<Json<RegisterInput>, JsonRejection>,
) -> AppResult<(StatusCode, WithCookie<Json<AccountResponse>>)> {
    let account = create_account(&state, json_body(body)?).await?;
    let cookie = rotate_session(&state, &ctx, account.id).await?;
    Ok((
        StatusCode::CREATED,
        ([(SET_COOKIE, cookie)], Json(account.into())),
    ))
}

/// POST /api/users/login/
///
/// Unknown usernames and wrong passwords produce the same 401 body.
pub async fn login(
    State(state): State<AppState>,
    ctx: SessionContext,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> AppResult<WithCookie<Json<AccountResponse>>> {
    let input = json_body(body)?;
    let (username, password) = input.credentials().ok_or_else(invalid_credentials)?;

    let Some(account) = AccountRepo::find_by_username(&state.pool, username).await? else {
        verify_against_dummy(password);
        tracing::warn!(%username, "Login failed: unknown username");
        return Err(invalid_credentials());
    };

    let valid = verify_password(password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::warn!(account_id = account.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    let cookie = rotate_session(&state, &ctx, account.id).await?;
    tracing::info!(account_id = account.id, "Logged in");

    Ok(([(SET_COOKIE, cookie)], Json(account.into())))
}

/// POST /api/users/logout/
///
/// Always succeeds; the session row, if any, is deleted and the cookie cleared.
pub async fn logout(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> AppResult<WithCookie<Json<MessageResponse>>> {
    if let Some(key_hash) = ctx.key_hash() {
        SessionRepo::delete_by_key_hash(&state.pool, key_hash).await?;
    }

    let cookie = state
        .config
        .session
        .clear_cookie()
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    ))
}

/// GET /api/users/current_user/
pub async fn current_user(ctx: SessionContext) -> Json<CurrentUser> {
    Json(match ctx.into_account() {
        Some(account) => CurrentUser::LoggedIn(account.into()),
        None => CurrentUser::Anonymous { user: None },
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

/// Validate, hash and persist a new account.
async fn create_account(state: &AppState, input: RegisterInput) -> AppResult<Account> {
    let registration = input.into_registration()?;

    if AccountRepo::find_by_username(&state.pool, &registration.username)
        .await?
        .is_some()
    {
        return Err(field_error("username", USERNAME_TAKEN).into());
    }

    let password_hash = hash_password(&registration.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = AccountRepo::create(
        &state.pool,
        &CreateAccount {
            username: registration.username,
            email: registration.email,
            password_hash,
            profile_picture: registration.profile_picture,
        },
    )
    .await?;

    tracing::info!(account_id = account.id, username = %account.username, "Account registered");
    Ok(account)
}

/// Replace the caller's current session with a fresh one bound to `account_id`.
async fn rotate_session(
    state: &AppState,
    ctx: &SessionContext,
    account_id: DbId,
) -> AppResult<HeaderValue> {
    if let Some(key_hash) = ctx.key_hash() {
        SessionRepo::delete_by_key_hash(&state.pool, key_hash).await?;
    }
    let (_, cookie) = start_session(state, Some(account_id)).await?;
    Ok(cookie)
}
