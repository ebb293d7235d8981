//! Mock backend helpers for integration tests

use std::sync::Mutex;

use lifebridge::session::Navigator;
use lifebridge::shared::AppConfig;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Context path the backend is deployed under
pub const CONTEXT_PATH: &str = "/hospital";

/// Config pointing at `server`
pub fn config_for(server: &MockServer) -> AppConfig {
    AppConfig::builder()
        .api_base_url(format!("{}{}/", server.uri(), CONTEXT_PATH))
        .build()
        .expect("mock server URL is a valid base URL")
}

/// Answer `POST /hospital/api/login` with `status` and `body`
pub async fn mount_login(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(format!("{CONTEXT_PATH}/api/login")))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Navigator that records every route it is sent to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}
