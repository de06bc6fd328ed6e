//! Common test utilities for integration tests
//!
//! `#[sqlx::test]` hands each test a freshly migrated database; the
//! [`TestContext`] wraps it with a router, a signed-in driver and request
//! helpers.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use taxi_api::app::{build_router, AppState};
use taxi_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taxi_shared::auth::jwt::{create_token, Claims, TokenType};
use taxi_shared::auth::password::hash_password;
use taxi_shared::models::driver::{CreateDriver, Driver};
use tower::Service as _;

pub const TEST_PASSWORD: &str = "Taxi!2024";
pub const JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub driver: Driver,
    pub jwt_token: String,
}

impl TestContext {
    /// Builds the app on `db` and signs in a driver `dispatcher` / `DSP00001`
    pub async fn new(db: PgPool) -> anyhow::Result<Self> {
        let config = test_config();

        let driver = create_driver(&db, "dispatcher", "DSP00001").await?;
        let jwt_token = token_for(&driver);

        let app = build_router(AppState::new(db.clone(), config.clone()));

        Ok(TestContext {
            db,
            app,
            config,
            driver,
            jwt_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends an authenticated request
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send_as(Some(&self.jwt_token), method, uri, body).await
    }

    /// Sends a request with an explicit bearer token, or none
    pub async fn send_as(
        &self,
        token: Option<&str>,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.dispatch(request).await
    }

    /// Sends an authenticated request with a literal body and content type
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        content_type: &str,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", self.auth_header())
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap();

        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
        },
    }
}

/// Inserts a driver whose password is [`TEST_PASSWORD`]
pub async fn create_driver(db: &PgPool, username: &str, license_number: &str) -> anyhow::Result<Driver> {
    let driver = Driver::create(
        db,
        CreateDriver {
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "Driver".to_string(),
            email: String::new(),
            password_hash: hash_password(TEST_PASSWORD)?,
            license_number: license_number.to_string(),
            is_staff: false,
        },
    )
    .await?;

    Ok(driver)
}

/// Access token for `driver`
pub fn token_for(driver: &Driver) -> String {
    create_token(&Claims::new(driver.id, TokenType::Access), JWT_SECRET).unwrap()
}
