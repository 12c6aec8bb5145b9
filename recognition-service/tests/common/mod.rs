use recognition_service::config::{BaiduConfig, RecognitionConfig};
use recognition_service::startup::Application;
use secrecy::Secret;
use std::time::Duration;
use wiremock::MockServer;

pub const DISH_TOKEN: &str = "test-dish-token";
pub const INGREDIENT_TOKEN: &str = "test-ingredient-token";

pub struct TestApp {
    pub address: String,
    pub upstream: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_timeout(5).await
    }

    /// Spawn the service on a random port, pointed at a wiremock
    /// upstream standing in for the Baidu API.
    pub async fn spawn_with_timeout(timeout_seconds: u64) -> Self {
        let upstream = MockServer::start().await;

        let config = RecognitionConfig {
            common: service_core::config::Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            service_name: "recognition-service".to_string(),
            log_level: "info".to_string(),
            baidu: BaiduConfig {
                api_base_url: upstream.uri(),
                dish_access_token: Secret::new(DISH_TOKEN.to_string()),
                ingredient_access_token: Secret::new(INGREDIENT_TOKEN.to_string()),
                timeout_seconds,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            address,
            upstream,
            client: reqwest::Client::new(),
        }
    }

    pub async fn post_dish(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/recognize/dish", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to send dish request")
    }

    pub async fn post_ingredient(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/recognize/ingredient", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to send ingredient request")
    }
}
