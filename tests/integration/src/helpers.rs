//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, seeding accounts, faking
//! the payment gateway and making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Result;
use axum::{routing::post, Json, Router};
use chrono::Utc;
use crea_api::{create_app, create_app_state};
use crea_common::{hash_password, AppConfig};
use crea_core::entities::User;
use crea_core::traits::UserRepository;
use crea_core::SnowflakeGenerator;
use crea_db::{PgPool, PgUserRepository};
use crea_service::integrations::razorpay::sign;
use reqwest::{multipart::Form, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{unique_email, AuthResponse, LoginRequest};

/// Checkout signing secret shared with the server under test
pub const KEY_SECRET: &str = "test-key-secret";
/// Webhook signing secret shared with the server under test
pub const WEBHOOK_SECRET: &str = "test-webhook-secret";
/// Password given to every seeded account
pub const TEST_PASSWORD: &str = "TestPass123";

/// Snowflake node reserved for rows seeded by the tests
const SEED_NODE_ID: u16 = 1023;

static ORDER_COUNTER: AtomicU64 = AtomicU64::new(1);

async fn bind_local() -> Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}

/// Stand-in for the gateway's order API
///
/// Echoes amount, currency and receipt back with a fresh order id.
pub struct FakeGateway {
    pub base_url: String,
    _handle: JoinHandle<()>,
}

impl FakeGateway {
    pub async fn start() -> Result<Self> {
        async fn create_order(Json(body): Json<Value>) -> Json<Value> {
            let n = ORDER_COUNTER.fetch_add(1, Ordering::SeqCst);
            Json(json!({
                "id": format!("order_{}_{n}", Utc::now().timestamp_millis()),
                "entity": "order",
                "amount": body["amount"],
                "currency": body["currency"],
                "receipt": body["receipt"],
                "status": "created",
            }))
        }

        let app = Router::new().route("/v1/orders", post(create_order));
        let (listener, addr) = bind_local().await?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            _handle: handle,
        })
    }
}

/// A seeded account with live tokens
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub pool: PgPool,
    pub admin_email: String,
    _gateway: FakeGateway,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with a fresh bootstrap admin
    pub async fn start() -> Result<Self> {
        let gateway = FakeGateway::start().await?;
        let admin_email = unique_email("admin");
        let upload_dir = std::env::temp_dir().join("crea-integration-uploads");

        let overrides = HashMap::from([
            ("API_PORT", "0".to_string()),
            ("ADMIN_EMAIL", admin_email.clone()),
            ("ADMIN_PASSWORD", TEST_PASSWORD.to_string()),
            ("RUN_MIGRATIONS", "true".to_string()),
            (
                "MIGRATIONS_DIR",
                concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations").to_string(),
            ),
            ("UPLOAD_DIR", upload_dir.to_string_lossy().into_owned()),
            ("RAZORPAY_KEY_ID", "rzp_test_integration".to_string()),
            ("RAZORPAY_KEY_SECRET", KEY_SECRET.to_string()),
            ("RAZORPAY_WEBHOOK_SECRET", WEBHOOK_SECRET.to_string()),
            ("RAZORPAY_API_BASE", gateway.base_url.clone()),
            ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000".to_string()),
            ("RATE_LIMIT_BURST", "1000".to_string()),
            ("SMTP_HOST", String::new()),
        ]);
        let config = test_config(&overrides)?;

        let state = create_app_state(config).await?;
        let pool = state.service_context().pool().clone();
        let app = create_app(state);

        let (listener, addr) = bind_local().await?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            pool,
            admin_email,
            _gateway: gateway,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        // Stored files live outside the API prefix; `/uploads/images` itself is an API route.
        let stored_file = path
            .strip_prefix("/uploads/")
            .is_some_and(|rest| rest.contains('/'));
        if path.starts_with("/health") || stored_file {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/api/v1{}", self.base_url(), path)
        }
    }

    /// Log in as the bootstrap admin
    pub async fn login_admin(&self) -> Result<TestUser> {
        self.login(&self.admin_email).await
    }

    /// Insert an active member directly and log in through the API
    pub async fn create_member(&self) -> Result<TestUser> {
        let email = unique_email("member");
        let generator = SnowflakeGenerator::new(SEED_NODE_ID);
        let mut user = User::new(generator.generate(), "Test Member".to_string(), &email);
        user.email_verified = true;

        let hash = hash_password(TEST_PASSWORD)?;
        PgUserRepository::new(self.pool.clone()).create(&user, &hash).await?;

        self.login(&email).await
    }

    async fn login(&self, email: &str) -> Result<TestUser> {
        let request = LoginRequest {
            email: email.to_string(),
            password: TEST_PASSWORD.to_string(),
        };
        let response = self.post("/auth/login", &request).await?;
        let auth: AuthResponse = assert_json(response, StatusCode::OK).await?;

        Ok(TestUser {
            id: auth.user.id,
            email: auth.user.email,
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
        })
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with a multipart form
    pub async fn post_form(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?)
    }

    /// Deliver a webhook body signed with `WEBHOOK_SECRET`
    pub async fn post_webhook(&self, body: &Value) -> Result<Response> {
        let raw = serde_json::to_vec(body)?;
        let signature = sign(WEBHOOK_SECRET.as_bytes(), &raw);
        Ok(self
            .client
            .post(self.url("/payments/webhook"))
            .header("content-type", "application/json")
            .header("x-razorpay-signature", signature)
            .body(raw)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).bearer_auth(token).send().await?)
    }
}

/// Checkout callback signature for an order and payment
pub fn checkout_signature(order_id: &str, payment_id: &str) -> String {
    sign(KEY_SECRET.as_bytes(), format!("{order_id}|{payment_id}").as_bytes())
}

/// Create a test configuration; overrides win over the environment
pub fn test_config(overrides: &HashMap<&'static str, String>) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    AppConfig::from_lookup(|key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .or_else(|| (key == "JWT_SECRET").then(|| "integration-test-secret".to_string()))
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("missing error code in {body}"))
}
