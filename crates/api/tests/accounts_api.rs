//! HTTP-level tests for registration, login, logout and profiles.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{
    body_json, get, get_with_cookie, post_json, post_json_with_cookie, post_with_cookie,
    session_cookie,
};
use forest_api::auth::password::hash_password;
use forest_db::models::account::{Account, CreateAccount};
use forest_db::repositories::AccountRepo;
use serde_json::json;
use sqlx::PgPool;

const PASSWORD: &str = "correct horse battery";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_account(pool: &PgPool, username: &str) -> Account {
    AccountRepo::create(
        pool,
        &CreateAccount {
            username: username.to_string(),
            email: format!("{username}@forest.test"),
            password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
            profile_picture: None,
        },
    )
    .await
    .expect("account creation should succeed")
}

async fn login(pool: &PgPool, username: &str, password: &str) -> axum::response::Response {
    post_json(
        common::build_test_app(pool.clone()),
        "/api/users/login/",
        json!({ "username": username, "password": password }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_account_and_logs_in(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/users/register/",
        json!({ "username": "ranger", "email": "ranger@forest.test", "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = session_cookie(&response).expect("session cookie should be set");
    assert!(cookie.starts_with("sessionid="));

    let profile = body_json(response).await;
    assert_eq!(profile["username"], "ranger");
    assert_eq!(profile["trees_planted"], 0);
    assert!(profile["profile_picture"].is_null());
    assert!(profile.get("password_hash").is_none());

    let me = body_json(
        get_with_cookie(common::build_test_app(pool), "/api/users/current_user/", &cookie).await,
    )
    .await;
    assert_eq!(me["username"], "ranger");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_reports_invalid_fields(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/users/register/",
        json!({ "username": "bad name!", "email": "not-an-email", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(SET_COOKIE).is_none());

    let json = body_json(response).await;
    let fields = json.as_object().unwrap();
    assert_eq!(fields.len(), 3);
    assert!(fields.contains_key("username"));
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("password"));

    assert!(AccountRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_is_a_field_error(pool: PgPool) {
    create_account(&pool, "ranger").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/users/",
        json!({ "username": "ranger", "email": "other@forest.test", "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["username"][0],
        "A user with that username already exists."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_user_does_not_start_a_session(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/users/",
        json!({
            "username": "ranger",
            "email": "ranger@forest.test",
            "password": PASSWORD,
            "profile_picture": "avatars/ranger.png"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(body_json(response).await["profile_picture"], "avatars/ranger.png");
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_sets_session(pool: PgPool) {
    let account = create_account(&pool, "ranger").await;

    let response = login(&pool, "ranger", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();
    assert_eq!(body_json(response).await["id"], account.id);

    let me = body_json(
        get_with_cookie(common::build_test_app(pool), "/api/users/current_user/", &cookie).await,
    )
    .await;
    assert_eq!(me["id"], account.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_user_fail_identically(pool: PgPool) {
    create_account(&pool, "ranger").await;

    let wrong_password = login(&pool, "ranger", "not the password").await;
    let unknown_user = login(&pool, "nobody", PASSWORD).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong_password.headers().get(SET_COOKIE).is_none());

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a, b);
    assert_eq!(a["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_credentials_are_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/users/login/",
        json!({ "username": "ranger" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_rotates_existing_session(pool: PgPool) {
    create_account(&pool, "ranger").await;

    let first = session_cookie(&login(&pool, "ranger", PASSWORD).await).unwrap();
    let response = post_json_with_cookie(
        common::build_test_app(pool.clone()),
        "/api/users/login/",
        &first,
        json!({ "username": "ranger", "password": PASSWORD }),
    )
    .await;
    let second = session_cookie(&response).unwrap();
    assert_ne!(first, second);

    let stale = body_json(
        get_with_cookie(common::build_test_app(pool), "/api/users/current_user/", &first).await,
    )
    .await;
    assert_eq!(stale, json!({ "user": null }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_ends_session_and_is_idempotent(pool: PgPool) {
    create_account(&pool, "ranger").await;
    let cookie = session_cookie(&login(&pool, "ranger", PASSWORD).await).unwrap();

    for _ in 0..2 {
        let response = post_with_cookie(
            common::build_test_app(pool.clone()),
            "/api/users/logout/",
            &cookie,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
        assert!(set_cookie.contains("Max-Age=0"));
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Logged out successfully" })
        );
    }

    let me = body_json(
        get_with_cookie(common::build_test_app(pool), "/api/users/current_user/", &cookie).await,
    )
    .await;
    assert_eq!(me, json!({ "user": null }));
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_user_without_session_is_null(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/users/current_user/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "user": null }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_and_retrieve_profiles(pool: PgPool) {
    let ranger = create_account(&pool, "ranger").await;
    create_account(&pool, "warden").await;

    let list = body_json(get(common::build_test_app(pool.clone()), "/api/users/").await).await;
    assert_eq!(list.as_array().unwrap().len(), 2);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/users/{}/", ranger.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "ranger");

    let response = get(common::build_test_app(pool), "/api/users/999999/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
