// crates/craft-core/src/http.rs - Request Dispatcher
//
// Issues exactly one HTTP call per invocation and hands the fully-read
// response to the renderer.
//
// PIPELINE:
// 1. Build the target URL (request::build_url)
// 2. Apply caller headers, then the bearer token, then the default
//    content-type for requests that carry a body
// 3. Send and read the body under one hard timeout
// 4. Render to the given writers and return the Outcome
//
// TIMEOUT:
// The send and the body read run inside a single tokio::time::timeout.
// When it fires the request future is dropped, which aborts the in-flight
// connection. The timer lives only as long as that one call.

use std::io::Write;
use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use tracing::debug;

use crate::body::DEFAULT_CONTENT_TYPE;
use crate::config::ResolvedConfig;
use crate::error::{CraftError, CraftResult};
use crate::render::{ApiResponse, Outcome, render};
use crate::request::{RequestDescriptor, build_url};

/// Sends request descriptors against one resolved API configuration
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    config: ResolvedConfig,
}

impl Dispatcher {
    pub fn new(config: ResolvedConfig) -> CraftResult<Self> {
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, config })
    }

    pub fn user_agent() -> &'static str {
        concat!("craft-cli/", env!("CARGO_PKG_VERSION"))
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Send the request and read the whole response body as text
    pub async fn send(&self, descriptor: &RequestDescriptor) -> CraftResult<ApiResponse> {
        let url = build_url(&self.config.base_url, &descriptor.path, &descriptor.query)?;
        let method = parse_method(&descriptor.method)?;
        let headers = build_headers(&self.config, descriptor)?;

        debug!(%method, %url, authenticated = self.config.token.is_some(), "dispatching request");

        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = &descriptor.body {
            request = request.body(body.clone());
        }

        let started = Instant::now();
        let call = async {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let (status, text) = tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| CraftError::Timeout(self.config.timeout_ms))??;

        debug!(
            status = status.as_u16(),
            bytes = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            text,
        })
    }

    /// Send the request and print the response per its output mode
    pub async fn dispatch<O: Write, E: Write>(
        &self,
        descriptor: &RequestDescriptor,
        out: &mut O,
        err: &mut E,
    ) -> CraftResult<Outcome> {
        let response = self.send(descriptor).await?;
        render(&response, descriptor.raw, out, err)
    }
}

fn parse_method(method: &str) -> CraftResult<Method> {
    Method::from_bytes(method.to_uppercase().as_bytes())
        .map_err(|_| CraftError::input(format!("Invalid HTTP method: {method}")))
}

/// Assemble the outgoing headers for `descriptor`
///
/// Caller headers go in first. The configured token is authoritative: it
/// replaces any Authorization header the caller supplied. A body without an
/// explicit content-type gets the descriptor's content type, or JSON.
pub fn build_headers(config: &ResolvedConfig, descriptor: &RequestDescriptor) -> CraftResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (key, value) in &descriptor.headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| CraftError::input(format!("Invalid header name: {key}")))?;
        headers.insert(name, header_value(value, key)?);
    }

    if let Some(token) = &config.token {
        let mut value = header_value(&format!("Bearer {token}"), "Authorization")?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    if descriptor.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
        let content_type = descriptor.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE);
        headers.insert(CONTENT_TYPE, header_value(content_type, "content-type")?);
    }

    Ok(headers)
}

fn header_value(value: &str, name: &str) -> CraftResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| CraftError::input(format!("Invalid value for header {name}.")))
}
