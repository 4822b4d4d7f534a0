//! Shared test helpers for integration tests.

use std::net::SocketAddr;

use axum::Router;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use waylog_core::config::{AppConfig, DatabaseConfig};
use waylog_core::config::app::ServerConfig;
use waylog_core::config::auth::AuthConfig;
use waylog_core::config::logging::LoggingConfig;
use waylog_core::config::share::ShareConfig;
use waylog_core::config::storage::StorageConfig;

const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
}

impl TestApp {
    /// Create a test application, or `None` when no test database is
    /// configured.
    pub async fn try_new() -> Option<Self> {
        let database_url = match std::env::var("WAYLOG_TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("WAYLOG_TEST_DATABASE_URL not set; skipping integration test");
                return None;
            }
        };

        let config = test_config(database_url);

        let db_pool = waylog_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        waylog_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let state = waylog_api::app::build_state(config, db_pool.clone())
            .await
            .expect("Failed to build app state");
        // Oneshot requests have no real socket; stand in for the peer the
        // server would normally inject via connect info.
        let router = waylog_api::app::build_app(state)
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 3000))));

        Some(Self { router, db_pool })
    }

    /// Clean all test data. Order respects foreign keys.
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "share_links",
            "media_assets",
            "moments",
            "trips",
            "profiles",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a test profile and return its id.
    pub async fn create_test_profile(&self, display_name: &str) -> Uuid {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO profiles (id, display_name, bio, created_at) VALUES ($1, $2, $3, NOW())",
        )
        .bind(id)
        .bind(display_name)
        .bind("A test traveller")
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test profile");

        id
    }

    /// Create a test trip for an owner and return its id.
    pub async fn create_test_trip(&self, owner_id: Uuid, title: &str) -> Uuid {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO trips (id, owner_id, title, country_code, tags, created_at, updated_at)
               VALUES ($1, $2, $3, 'JP', '{}', NOW(), NOW())"#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test trip");

        id
    }

    /// Soft-delete a trip.
    pub async fn soft_delete_trip(&self, trip_id: Uuid) {
        sqlx::query("UPDATE trips SET deleted_at = NOW() WHERE id = $1")
            .bind(trip_id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to soft-delete trip");
    }

    /// Mint a valid owner JWT the way the upstream identity service would.
    pub fn owner_token(&self, owner_id: Uuid) -> String {
        #[derive(serde::Serialize)]
        struct Claims {
            sub: Uuid,
            exp: usize,
        }

        let claims = Claims {
            sub: owner_id,
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .expect("Failed to mint test JWT")
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

fn test_config(database_url: String) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            allowed_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 5,
        },
        storage: StorageConfig::default(),
        share: ShareConfig::default(),
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            jwt_issuer: String::new(),
        },
        logging: LoggingConfig::default(),
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: http::HeaderMap,
    /// Parsed JSON body.
    pub body: Value,
}
