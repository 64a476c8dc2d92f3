use gloo_net::http::Request;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::model::{self, RegistrationRequest, SubscriptionPlan};

const MAX_PLAIN_MESSAGE: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP seam. The browser build uses [`FetchTransport`]; tests swap in a fake.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<RawResponse, ApiError>;
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, ApiError>;
}

/// `fetch()` via gloo-net.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, ApiError> {
        let resp = Request::get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read(resp).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, ApiError> {
        let resp = Request::post(url)
            .json(body)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read(resp).await
    }
}

async fn read(resp: gloo_net::http::Response) -> Result<RawResponse, ApiError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::Transport(format!("could not read response body: {e}")))?;
    Ok(RawResponse { status, body })
}

/// Pulls a human message out of an error body: `{"message": ...}`, `{"error": ...}`,
/// `{"detail": ...}`, or short plain text.
pub fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        return ["message", "error", "detail"]
            .iter()
            .filter_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string);
    }

    let looks_like_markup = trimmed.starts_with('<');
    if looks_like_markup || trimmed.len() > MAX_PLAIN_MESSAGE {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn check(resp: RawResponse) -> Result<String, ApiError> {
    if resp.ok() {
        Ok(resp.body)
    } else {
        Err(ApiError::Server {
            status: resp.status,
            message: server_message(&resp.body),
        })
    }
}

/// Typed access to the gym backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GymClient<T = FetchTransport> {
    config: ApiConfig,
    transport: T,
}

impl GymClient<FetchTransport> {
    pub fn browser(config: ApiConfig) -> Self {
        Self::new(config, FetchTransport)
    }
}

impl<T: Transport> GymClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub async fn catalog(&self) -> Result<Vec<SubscriptionPlan>, ApiError> {
        let raw = self.transport.get(&self.config.subscriptions_url()).await?;
        model::parse_catalog(&check(raw)?)
    }

    pub async fn plan(&self, id: &str) -> Result<SubscriptionPlan, ApiError> {
        let raw = self.transport.get(&self.config.subscription_url(id)).await?;
        model::parse_plan(&check(raw)?)
    }

    /// The response body carries nothing the flow needs, so it is dropped.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<(), ApiError> {
        let body =
            serde_json::to_value(request).map_err(|e| ApiError::Shape(e.to_string()))?;
        let raw = self
            .transport
            .post_json(&self.config.register_url(), &body)
            .await?;
        check(raw).map(|_| ())
    }
}
