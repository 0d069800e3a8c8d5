//! BDD test world for the irrigation dashboard

use std::sync::{Arc, Mutex};

use cucumber::World;
use irrigation_dashboard::config::Config;
use irrigation_dashboard::i18n::Language;
use irrigation_dashboard::io::{HttpClient, HttpResponse};
use irrigation_dashboard::surface::RecordingSurface;
use irrigation_dashboard::{DashboardController, DashboardError};

/// Canned HTTP server. A `None` body means the request fails at transport level.
#[derive(Debug, Default)]
pub struct StubHttpClient {
    pub image_body: Mutex<Option<String>>,
    pub reply_body: Mutex<Option<String>>,
    pub posted: Mutex<Vec<serde_json::Value>>,
}

impl StubHttpClient {
    fn respond(body: Option<String>) -> irrigation_dashboard::Result<HttpResponse> {
        match body {
            Some(body) => Ok(HttpResponse::json_body(200, &body)),
            None => Err(DashboardError::Http("connection refused".to_string())),
        }
    }

    pub fn posted_commands(&self) -> Vec<String> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .filter_map(|body| body["command"].as_str().map(str::to_string))
            .collect()
    }
}

#[async_trait::async_trait]
impl HttpClient for StubHttpClient {
    async fn get(&self, _url: &str) -> irrigation_dashboard::Result<HttpResponse> {
        let body = self.image_body.lock().unwrap().clone();
        Self::respond(body)
    }

    async fn post_json(
        &self,
        _url: &str,
        body: &serde_json::Value,
    ) -> irrigation_dashboard::Result<HttpResponse> {
        self.posted.lock().unwrap().push(body.clone());
        let reply = self.reply_body.lock().unwrap().clone();
        Self::respond(reply)
    }
}

#[derive(Debug, Default, World)]
pub struct DashboardWorld {
    pub http: Arc<StubHttpClient>,
    pub language: Language,
    pub controller: Option<DashboardController<RecordingSurface>>,
    pub listening_started: Option<bool>,
}

impl DashboardWorld {
    /// The controller under test, created on first use
    pub fn controller(&mut self) -> &mut DashboardController<RecordingSurface> {
        if self.controller.is_none() {
            let config = Config {
                language: self.language,
                ..Config::default()
            };
            let http: Arc<dyn HttpClient> = self.http.clone();
            self.controller = Some(DashboardController::new(
                RecordingSurface::new(),
                &config,
                http,
            ));
        }
        self.controller.as_mut().expect("controller just created")
    }

    pub fn surface(&mut self) -> &RecordingSurface {
        self.controller().surface()
    }
}
