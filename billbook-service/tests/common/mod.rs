#![allow(dead_code)]

use billbook_service::config::{BillbookConfig, JwtConfig, MongoConfig, SecurityConfig};
use billbook_service::startup::Application;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // Random port, throwaway database per test.
        let config = BillbookConfig {
            common: CoreConfig {
                port: 0,
                log_level: "info".to_string(),
            },
            mongodb: MongoConfig {
                uri: std::env::var("TEST_MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                database: format!("billbook_test_{}", uuid::Uuid::new_v4().simple()),
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiry_days: 7,
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> reqwest::Response {
        let mut request = self
            .client
            .post(format!("{}{}", self.address, path))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: &Value) -> reqwest::Response {
        let mut request = self
            .client
            .put(format!("{}{}", self.address, path))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    /// PUT without a body - the status-update endpoints take query params.
    pub async fn put_empty(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.client.put(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.client.delete(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    /// Sign up a fresh user, returning their bearer token.
    pub async fn signup(&self, email: &str) -> String {
        let response = self
            .post(
                "/auth/signup",
                None,
                &json!({
                    "email": email,
                    "password": "correct horse battery staple",
                    "name": "Test Owner",
                }),
            )
            .await;
        assert_eq!(response.status(), 201, "signup failed for {}", email);
        let body: Value = response.json().await.expect("Failed to parse signup body");
        body["token"].as_str().expect("No token in response").to_string()
    }

    /// Sign up and create a business, returning (token, business_id).
    pub async fn signup_with_business(&self, email: &str, tax_rate: f64) -> (String, String) {
        let token = self.signup(email).await;
        let response = self
            .post(
                "/businesses",
                Some(&token),
                &json!({ "name": "Test Solar Works", "tax_rate": tax_rate }),
            )
            .await;
        assert_eq!(response.status(), 201, "business creation failed");
        let body: Value = response.json().await.expect("Failed to parse business body");
        let business_id = body["id"].as_str().expect("No business id").to_string();
        (token, business_id)
    }

    /// Create a customer under the caller's business, returning its id.
    pub async fn create_customer(&self, token: &str, name: &str) -> String {
        let response = self
            .post("/customers", Some(token), &json!({ "name": name }))
            .await;
        assert_eq!(response.status(), 201, "customer creation failed");
        let body: Value = response.json().await.expect("Failed to parse customer body");
        body["id"].as_str().expect("No customer id").to_string()
    }

    /// Create a product with the given stock, returning its id.
    pub async fn create_product(&self, token: &str, name: &str, stock: f64) -> String {
        let response = self
            .post(
                "/products",
                Some(token),
                &json!({
                    "name": name,
                    "price": 1000.0,
                    "tax_rate": 18.0,
                    "stock_quantity": stock,
                }),
            )
            .await;
        assert_eq!(response.status(), 201, "product creation failed");
        let body: Value = response.json().await.expect("Failed to parse product body");
        body["id"].as_str().expect("No product id").to_string()
    }
}
