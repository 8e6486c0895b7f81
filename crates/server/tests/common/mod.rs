//! # Common Test Utilities
//!
//! `TestApp` spawns the real server on a random port. Its AI provider is
//! either an OpenAI-compatible provider pointed at an `httpmock::MockServer`,
//! or an in-process `MockAiProvider` for tests that only care about call
//! counts.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use briefly_server::{
    config::{self, AppConfig},
    router,
    state::{build_app_state, build_app_state_with_provider, AppState},
};
use briefly_test_utils::MockAiProvider;
use httpmock::MockServer;
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// The chat completions path served by the mock backend.
pub const CHAT_PATH: &str = "/v1/chat/completions";

/// Wraps `content` in an OpenAI-compatible chat completion body.
pub fn chat_reply(content: &str) -> Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

/// Writes a config file whose default provider points at `mock_server`.
pub fn write_test_config(dir: &TempDir, mock_server: &MockServer, extra: &str) -> Result<String> {
    let config_path = dir.path().join("config.yml");
    let config_content = format!(
        r#"
port: 0
max_body_bytes: 4096
default_provider: "gemini_default"
providers:
  gemini_default:
    provider: "local"
    api_url: "{}"
    api_key: null
    model_name: "mock-chat-model"
    timeout_secs: 5
{extra}
"#,
        mock_server.url(CHAT_PATH),
    );
    let mut file = File::create(&config_path)?;
    file.write_all(config_content.as_bytes())?;
    Ok(config_path.to_string_lossy().into_owned())
}

// --- Full Application Test Harness ---

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _config_dir: Option<TempDir>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with an HTTP provider backed by `httpmock`.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start_async().await;
        let config_dir = tempdir()?;
        let config_path = write_test_config(&config_dir, &mock_server, "")?;

        let config = config::get_config(Some(&config_path))?;
        let app_state = build_app_state(config)?;

        let mut app = TestApp::spawn_with_state(app_state, mock_server).await?;
        app._config_dir = Some(config_dir);
        Ok(app)
    }

    /// Spawns the server with an in-process provider stub.
    pub async fn spawn_with_provider(provider: MockAiProvider) -> Result<Self> {
        let mock_server = MockServer::start_async().await;
        let config_dir = tempdir()?;
        let config_path = write_test_config(&config_dir, &mock_server, "")?;

        let config = config::get_config(Some(&config_path))?;
        let app_state = build_app_state_with_provider(config, Box::new(provider))?;

        let mut app = TestApp::spawn_with_state(app_state, mock_server).await?;
        app._config_dir = Some(config_dir);
        Ok(app)
    }

    pub async fn spawn_with_state(app_state: AppState, mock_server: MockServer) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _config_dir: None,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{path}", self.address))
            .json(body)
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
