#![allow(dead_code, clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, missing_debug_implementations, unreachable_pub)]

use smshook::api::{self, AppState};
use smshook::config::{Config, LogFormat, ServerConfig, TelemetryConfig};
use smshook::services::signature;
use smshook::storage::DbPool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("smshook=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

pub fn get_test_config() -> Config {
    Config {
        webhook_secret: "test-secret".to_string(),
        database_url: "sqlite::memory:".to_string(),
        busy_timeout_ms: 5000,
        server: ServerConfig { host: "127.0.0.1".to_string(), port: 0 },
        telemetry: TelemetryConfig { log_format: LogFormat::Text, otlp_endpoint: None },
    }
}

/// A single-connection in-memory database. One connection keeps the database
/// alive and shared for the lifetime of the pool.
pub async fn get_test_pool() -> DbPool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    smshook::storage::run_migrations(&pool).await.expect("Failed to run migrations");

    pool
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub config: Config,
    pub pool: DbPool,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(get_test_config()).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        setup_tracing();

        let pool = get_test_pool().await;
        let state = AppState::new(config.clone(), pool.clone());
        let router = api::app_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { address: format!("http://{addr}"), client: reqwest::Client::new(), config, pool }
    }

    pub fn sign(&self, body: &[u8]) -> String {
        signature::sign(body, self.config.webhook_secret.as_bytes())
    }

    /// Posts a webhook body signed over the exact bytes that go on the wire.
    pub async fn post_webhook(&self, body: &serde_json::Value) -> reqwest::Response {
        let bytes = serde_json::to_vec(body).unwrap();
        let sig = self.sign(&bytes);

        self.client
            .post(format!("{}/webhook", self.address))
            .header("X-Signature", sig)
            .header("Content-Type", "application/json")
            .body(bytes)
            .send()
            .await
            .unwrap()
    }

    /// Seeds the four-message scenario shared by the query and stats suites.
    pub async fn seed_messages(&self) {
        let messages = [
            serde_json::json!({"message_id": "m1", "from": "+1111111111", "to": "+1011111111", "ts": "2025-01-01T10:00:00Z", "text": "apple banana"}),
            serde_json::json!({"message_id": "m2", "from": "+2222222222", "to": "+1011111111", "ts": "2025-01-01T11:00:00Z", "text": "orange grape"}),
            serde_json::json!({"message_id": "m3", "from": "+1111111111", "to": "+1111111111", "ts": "2025-01-01T12:00:00Z", "text": "apple kiwi"}),
            serde_json::json!({"message_id": "m4", "from": "+3333333333", "to": "+1222222222", "ts": "2025-01-01T13:00:00Z", "text": "banana cherry"}),
        ];

        for message in &messages {
            let resp = self.post_webhook(message).await;
            assert!(resp.status().is_success(), "seeding failed: {}", resp.status());
        }
    }

    pub async fn get_messages(&self, query: &[(&str, &str)]) -> reqwest::Response {
        self.client.get(format!("{}/messages", self.address)).query(query).send().await.unwrap()
    }

    pub async fn get_stats(&self) -> serde_json::Value {
        let resp = self.client.get(format!("{}/stats", self.address)).send().await.unwrap();
        assert!(resp.status().is_success());
        resp.json().await.unwrap()
    }
}

pub fn message_ids(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|m| m["message_id"].as_str().expect("message_id").to_string())
        .collect()
}
