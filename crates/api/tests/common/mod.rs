#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use memorial_api::config::ServerConfig;
use memorial_api::router::build_app_router;
use memorial_api::state::AppState;

pub type DbId = i64;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState { pool }, &test_config())
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn insert_profile(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO profiles (display_name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Column values for a seeded `fallen` row.
pub struct NewFallen<'a> {
    pub owner_id: DbId,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub hometown: Option<&'a str>,
    pub service_type: Option<&'a str>,
    pub birth_date: Option<&'a str>,
    pub death_date: Option<&'a str>,
    pub status: &'a str,
    pub is_deleted: bool,
}

impl<'a> NewFallen<'a> {
    /// An approved record with both dates set.
    pub fn approved(owner_id: DbId, last_name: &'a str) -> Self {
        Self {
            owner_id,
            first_name: "Иван",
            last_name,
            hometown: Some("Курск"),
            service_type: Some("volunteer"),
            birth_date: Some("1990-03-01"),
            death_date: Some("2023-06-15"),
            status: "approved",
            is_deleted: false,
        }
    }
}

pub async fn insert_fallen(pool: &PgPool, f: NewFallen<'_>) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO fallen
            (owner_id, first_name, last_name, hometown, service_type,
             birth_date, death_date, status, is_deleted)
         VALUES ($1, $2, $3, $4, $5, $6::date, $7::date, $8, $9)
         RETURNING id",
    )
    .bind(f.owner_id)
    .bind(f.first_name)
    .bind(f.last_name)
    .bind(f.hometown)
    .bind(f.service_type)
    .bind(f.birth_date)
    .bind(f.death_date)
    .bind(f.status)
    .bind(f.is_deleted)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_award(pool: &PgPool, fallen_id: DbId, name: &str, status: &str) -> DbId {
    let award_id: DbId = sqlx::query_scalar(
        "INSERT INTO awards (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query_scalar(
        "INSERT INTO fallen_awards (fallen_id, award_id, status) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(fallen_id)
    .bind(award_id)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_media(pool: &PgPool, url: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO media (url) VALUES ($1) RETURNING id")
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_memory(
    pool: &PgPool,
    fallen_id: DbId,
    author_id: DbId,
    media_ids: &[DbId],
    status: &str,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO memory_items (fallen_id, author_id, title, content, media_ids, status)
         VALUES ($1, $2, 'Воспоминание', 'text', $3, $4) RETURNING id",
    )
    .bind(fallen_id)
    .bind(author_id)
    .bind(media_ids)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_addition(
    pool: &PgPool,
    memory_item_id: DbId,
    author_id: DbId,
    media_ids: &[DbId],
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO memory_additions (memory_item_id, author_id, content, media_ids, status)
         VALUES ($1, $2, 'addition', $3, 'approved') RETURNING id",
    )
    .bind(memory_item_id)
    .bind(author_id)
    .bind(media_ids)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a comment on the target named by `column` (`fallen_id`,
/// `memory_item_id` or `memory_addition_id`).
pub async fn insert_comment(
    pool: &PgPool,
    author_id: DbId,
    parent_id: Option<DbId>,
    column: &str,
    target_id: DbId,
) -> DbId {
    let query = format!(
        "INSERT INTO comments (author_id, parent_id, content, {column})
         VALUES ($1, $2, 'text', $3) RETURNING id"
    );
    sqlx::query_scalar(&query)
        .bind(author_id)
        .bind(parent_id)
        .bind(target_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_connection(
    pool: &PgPool,
    fallen_id: DbId,
    user_id: DbId,
    relationship: &str,
    status: &str,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO fallen_connections (fallen_id, user_id, relationship, status)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(fallen_id)
    .bind(user_id)
    .bind(relationship)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}
