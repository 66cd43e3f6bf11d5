use lattice_core::{wire, ClientConfig, ResponseEnvelope};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::io;
use std::time::{Duration, Instant};

use crate::error::{LatticeError, Result};

/// Query string pairs appended to a request
pub type Query = [(&'static str, String)];

/// A response read without envelope interpretation
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// The body as JSON, or as a JSON string when it does not parse
    pub fn json_or_text(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

/// Executes single HTTP requests against a Lattice server.
///
/// One transport is built per client handle and shared by every operation
/// group; the underlying `reqwest::Client` pools connections and is safe to
/// share across tasks.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    api_url: String,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(LatticeError::validation(
                "timeout_secs",
                "timeout_secs must be at least 1",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| LatticeError::Generic(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: config.api_url(),
        })
    }

    /// Full address of an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<ResponseEnvelope> {
        self.execute(Method::GET, path, None, &[]).await
    }

    pub async fn get_with_query(&self, path: &str, query: &Query) -> Result<ResponseEnvelope> {
        self.execute(Method::GET, path, None, query).await
    }

    pub async fn head(&self, path: &str) -> Result<ResponseEnvelope> {
        self.execute(Method::HEAD, path, None, &[]).await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseEnvelope> {
        self.execute(Method::DELETE, path, None, &[]).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ResponseEnvelope> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PUT, path, Some(&body), &[]).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ResponseEnvelope> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, Some(&body), &[]).await
    }

    /// Perform one request and decode the response envelope
    #[tracing::instrument(level = "debug", skip(self, body, query))]
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &Query,
    ) -> Result<ResponseEnvelope> {
        let url = self.url(path);
        let started = Instant::now();

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| classify(&url, e))?;
        let status = response.status().as_u16();
        let headers = header_map(response.headers());

        if method == Method::HEAD {
            tracing::debug!(status, elapsed_ms = started.elapsed().as_millis() as u64, "HEAD completed");
            return Ok(ResponseEnvelope::from_status(status == 200, status, headers, None));
        }

        let text = response.text().await.map_err(|e| classify(&url, e))?;
        tracing::debug!(
            status,
            bytes = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );

        Ok(interpret(status, headers, &text))
    }

    /// GET a path and return the raw body, bypassing envelope decoding
    #[tracing::instrument(level = "debug", skip(self, query))]
    pub async fn fetch_raw(&self, path: &str, query: &Query) -> Result<RawResponse> {
        let url = self.url(path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| classify(&url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(&url, e))?;
        tracing::debug!(status, bytes = body.len(), "raw fetch completed");

        Ok(RawResponse { status, body })
    }
}

/// Map a reqwest failure onto the error taxonomy
fn classify(url: &str, err: reqwest::Error) -> LatticeError {
    if is_disconnect(&err) {
        tracing::warn!(url, error = %err, "connection failure");
        LatticeError::Connection {
            url: url.to_string(),
            source: err,
        }
    } else {
        LatticeError::Generic(format!("request to {url} failed: {err}"))
    }
}

/// No HTTP response was received: the connection was refused, timed out, or
/// was reset or closed by the peer before a response arrived.
fn is_disconnect(err: &reqwest::Error) -> bool {
    if err.is_connect() || err.is_timeout() {
        return true;
    }
    if err.is_request() && err.status().is_none() {
        return true;
    }

    let mut source = StdError::source(err);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<io::Error>() {
            if matches!(
                io.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

fn header_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Turn a response body into an envelope.
///
/// JSON objects are decoded as envelopes. Empty bodies, non-JSON bodies and
/// JSON that is not an object are wrapped using the HTTP status alone.
pub(crate) fn interpret(status: u16, headers: HashMap<String, String>, text: &str) -> ResponseEnvelope {
    let success = status < 400;
    if text.trim().is_empty() {
        return ResponseEnvelope::from_status(success, status, headers, None);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => {
            let mut envelope: ResponseEnvelope = wire::decode(&value);
            if envelope.status_code == 0 {
                envelope.status_code = status;
            }
            envelope
        }
        Ok(other) => ResponseEnvelope::from_status(success, status, headers, Some(other)),
        Err(_) => ResponseEnvelope::from_status(
            success,
            status,
            headers,
            Some(Value::String(text.to_string())),
        ),
    }
}
