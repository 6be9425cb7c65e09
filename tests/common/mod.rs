//! Common test utilities for integration tests

use peer_feedback::auth::StaticBearerToken;
use peer_feedback::config::ServerConfig;
use peer_feedback::intake::FeedbackService;
use peer_feedback::roster::Roster;
use peer_feedback::server::FeedbackServer;
use peer_feedback::storage::StorageFactory;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const ADMIN_TOKEN: &str = "integration-token";
pub const INDEX_HTML: &str = "<!doctype html><title>Peer Feedback</title>";

/// A live server on an ephemeral port, stopped when dropped
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub data_dir: TempDir,
    _public_dir: TempDir,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let data_dir = TempDir::new().unwrap();
        let public_dir = TempDir::new().unwrap();
        std::fs::write(public_dir.path().join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(public_dir.path().join("style.css"), "body {}").unwrap();

        let config = ServerConfig {
            data_dir: data_dir.path().to_path_buf(),
            public_dir: public_dir.path().to_path_buf(),
            admin_token: ADMIN_TOKEN.to_string(),
            ..ServerConfig::default()
        };

        let store = StorageFactory::from_config(&config).await.unwrap();
        let service = Arc::new(FeedbackService::new(
            Arc::new(Roster::builtin()),
            store,
            Arc::new(StaticBearerToken::new(ADMIN_TOKEN)),
        ));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(FeedbackServer::new(config, service).serve(listener, async {
            let _ = rx.await;
        }));

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            data_dir,
            _public_dir: public_dir,
            shutdown: Some(tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn submit(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/feedback"))
            .json(body)
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// A complete submission from employee `number`, every colleague rated `score`
pub fn submission(number: u32, score: u8) -> Value {
    let roster = Roster::builtin();
    let evaluator = roster.find_by_number(number).unwrap();

    let mut ratings = Map::new();
    let mut reasons = Map::new();
    for other in roster.iter().filter(|e| e.id != evaluator.id) {
        ratings.insert(other.id.to_string(), json!(score));
        if score <= 3 || score >= 9 {
            reasons.insert(other.id.to_string(), json!("Consistent over the year"));
        }
    }

    json!({
        "evaluator": {
            "id": evaluator.id,
            "name": evaluator.name,
            "number": evaluator.number,
        },
        "ratings": ratings,
        "reasons": reasons,
        "timestamp": "2026-10-16T09:30:00.000Z",
    })
}
