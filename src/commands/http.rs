//! HTTP call dispatcher
//!
//! Sends calls to the apps proxy of a server:
//! `POST {server}{apps_call_route}` with the call request as JSON body. The
//! call type is appended to the call path (`/jira/create` becomes
//! `/jira/create/form`).

use crate::commands::error::{CallError, CallResult};
use crate::commands::traits::CallDispatcher;
use crate::commands::types::{CallRequest, CallResponse, CallType};
use crate::core::version::apps_call_route;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Reported as `context.user_agent` on every call
pub const USER_AGENT: &str = "appcmd";

#[derive(Debug, Clone)]
pub struct HttpCallDispatcher {
    client: reqwest::Client,
    server_url: String,
    token: Option<String>,
}

impl HttpCallDispatcher {
    pub fn new(server_url: &str, token: Option<String>) -> CallResult<Self> {
        Self::with_timeout(server_url, token, DEFAULT_HTTP_TIMEOUT_SECS)
    }

    pub fn with_timeout(server_url: &str, token: Option<String>, timeout_secs: u64) -> CallResult<Self> {
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(CallError::new(format!(
                "Invalid server URL scheme. Only http:// and https:// are supported: {}",
                server_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CallError::new(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn call_url(&self) -> String {
        format!("{}{}", self.server_url, apps_call_route())
    }

    /// Request body for `call_type`
    pub fn payload(request: &CallRequest, call_type: CallType) -> CallRequest {
        let mut payload = request.clone();
        payload.path = format!("{}/{}", request.path.trim_end_matches('/'), call_type);
        payload.context.user_agent = Some(USER_AGENT.to_string());
        payload
    }
}

/// Server error text from a JSON body (`message` or `text`), else the status
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "text"]
                .iter()
                .find_map(|key| json.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| {
            format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            )
        })
}

#[async_trait::async_trait]
impl CallDispatcher for HttpCallDispatcher {
    async fn perform_call(&self, request: &CallRequest, call_type: CallType) -> CallResult<CallResponse> {
        let payload = Self::payload(request, call_type);
        log::debug!("POST {} ({} {})", self.call_url(), call_type, payload.path);

        let mut builder = self.client.post(self.call_url()).json(&payload);
        if let Some(token) = self.token.as_deref() {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CallError::new(format!("Network request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            log::warn!("{} call to {} failed: {}", call_type, payload.path, message);
            return Err(CallError::new(message));
        }

        response
            .json::<CallResponse>()
            .await
            .map_err(|e| CallError::new(format!("Failed to read response body: {}", e)))
    }
}
