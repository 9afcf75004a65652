#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;
use url_shortener_client::domain::entities::{ClickStats, DetailedStats};
use url_shortener_client::domain::ports::{Navigator, ShortenerGateway};
use url_shortener_client::error::GatewayError;

pub const PNG_A: &str = "data:image/png;base64,YQ==";
pub const PNG_B: &str = "data:image/png;base64,Yg==";

/// Lets a held gateway call complete.
pub struct Release(oneshot::Sender<()>);

impl Release {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

struct Step<T> {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<T, GatewayError>,
}

/// Replies for one gateway operation, consumed in call order.
///
/// A held reply waits for its [`Release`] before returning, so tests decide
/// the order in which concurrent calls complete.
pub struct Script<T> {
    steps: Mutex<VecDeque<Step<T>>>,
    calls: Mutex<Vec<String>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Script<T> {
    pub fn reply(&self, result: Result<T, GatewayError>) {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step { gate: None, result });
    }

    pub fn reply_held(&self, result: Result<T, GatewayError>) -> Release {
        let (tx, rx) = oneshot::channel();
        self.steps.lock().unwrap().push_back(Step {
            gate: Some(rx),
            result,
        });
        Release(tx)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn next(&self, argument: &str) -> Result<T, GatewayError> {
        self.calls.lock().unwrap().push(argument.to_string());
        let step = self.steps.lock().unwrap().pop_front();

        let Some(step) = step else {
            return Err(GatewayError::Transport(format!(
                "no scripted reply for '{argument}'"
            )));
        };
        if let Some(gate) = step.gate {
            let _ = gate.await;
        }
        step.result
    }
}

/// Gateway whose replies are scripted per operation.
#[derive(Default)]
pub struct ScriptedGateway {
    pub shorten: Script<String>,
    pub resolve: Script<String>,
    pub qr_code: Script<String>,
    pub stats_probe: Script<()>,
    pub stats_list: Script<Vec<ClickStats>>,
    pub stats_detail: Script<DetailedStats>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortenerGateway for ScriptedGateway {
    async fn shorten(&self, url: &str) -> Result<String, GatewayError> {
        self.shorten.next(url).await
    }

    async fn resolve(&self, short_code: &str) -> Result<String, GatewayError> {
        self.resolve.next(short_code).await
    }

    async fn qr_code(&self, url: &str) -> Result<String, GatewayError> {
        self.qr_code.next(url).await
    }

    async fn stats_probe(&self) -> Result<(), GatewayError> {
        self.stats_probe.next("").await
    }

    async fn stats_list(&self) -> Result<Vec<ClickStats>, GatewayError> {
        self.stats_list.next("").await
    }

    async fn stats_detail(&self, short_code: &str) -> Result<DetailedStats, GatewayError> {
        self.stats_detail.next(short_code).await
    }
}

/// Navigator that records every target.
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.visited.lock().unwrap().push(url.to_string());
    }
}

pub fn sample_stats() -> Vec<ClickStats> {
    vec![
        ClickStats::new("abc", "https://example.com/a", 3, "2024-01-15T10:30:00"),
        ClickStats::new("xyz", "https://example.com/b", 7, "2024-01-16"),
    ]
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}
