//! # API Client
//!
//! [`Client`] is the only thing in grafctl that knows how to talk to the
//! dashboard service. It owns the base URL, the credentials, the extra static
//! headers and a [`Transport`], and is immutable once built.
//!
//! ## Transport Seam
//!
//! Requests are described by a plain [`ApiRequest`] and handed to a
//! [`Transport`]:
//! - [`http::HttpTransport`]: production, reqwest blocking client
//! - [`memory::MemoryTransport`]: canned responses for tests, records every request
//!
//! The client never interprets anything but the status code: a response is a
//! success only when the status is exactly 200.

use crate::error::{GrafctlError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

pub mod http;
pub mod memory;

pub use http::HttpTransport;
pub use memory::MemoryTransport;

/// Credentials derived from the `--key` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    None,
    Basic { user: String, password: String },
    Bearer(String),
}

impl Credentials {
    /// `user:pass` (split on the first colon) is basic auth, any other
    /// non-empty string is a bearer token.
    pub fn parse(auth: &str) -> Self {
        if let Some((user, password)) = auth.split_once(':') {
            Credentials::Basic {
                user: user.to_string(),
                password: password.to_string(),
            }
        } else if auth.is_empty() {
            Credentials::None
        } else {
            Credentials::Bearer(auth.to_string())
        }
    }

    /// Value of the `Authorization` header, if any.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Credentials::None => None,
            Credentials::Basic { user, password } => Some(format!(
                "Basic {}",
                STANDARD.encode(format!("{}:{}", user, password))
            )),
            Credentials::Bearer(token) => Some(format!("Bearer {}", token)),
        }
    }
}

/// Parses `Name:Value,Name:Value` into a header map.
pub fn parse_headers(headers: &str) -> Result<BTreeMap<String, String>> {
    let mut parsed = BTreeMap::new();
    for entry in headers.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (name, value) = entry.split_once(':').ok_or_else(|| {
            GrafctlError::Config(format!("header '{}' is not in Name:Value form", entry))
        })?;
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            return Err(GrafctlError::Config(format!(
                "header '{}' has an empty name",
                entry
            )));
        }
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| GrafctlError::Config(format!("invalid header name '{}'", name)))?;
        HeaderValue::from_str(value).map_err(|_| {
            GrafctlError::Config(format!("invalid value for header '{}'", name))
        })?;
        parsed.insert(name.to_string(), value.to_string());
    }
    Ok(parsed)
}

/// A fully built request, ready for a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

/// Raw answer from a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Status line as the service would print it, e.g. `404 Not Found`.
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

/// Sends requests to the dashboard service.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

#[derive(Deserialize)]
struct ServiceMessage {
    #[serde(default)]
    message: Option<String>,
}

pub struct Client {
    base_url: Url,
    credentials: Credentials,
    headers: BTreeMap<String, String>,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Builds a client backed by the reqwest transport.
    pub fn new(auth: &str, headers: &str, base_url: &str) -> Result<Self> {
        Self::with_transport(auth, headers, base_url, HttpTransport::new()?)
    }

    pub fn with_transport<T: Transport + 'static>(
        auth: &str,
        headers: &str,
        base_url: &str,
        transport: T,
    ) -> Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| GrafctlError::Config(format!("invalid URL '{}': {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(GrafctlError::Config(format!(
                "invalid URL '{}': cannot be used as a base URL",
                base_url
            )));
        }
        let credentials = Credentials::parse(auth);
        if let Some(value) = credentials.header_value() {
            HeaderValue::from_str(&value)
                .map_err(|_| GrafctlError::Config("API key contains invalid characters".into()))?;
        }

        Ok(Self {
            base_url: url,
            credentials,
            headers: parse_headers(headers)?,
            transport: Box::new(transport),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn extra_headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Joins `path` onto the base URL's path and applies auth and headers.
    pub fn build_request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> ApiRequest {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);

        let mut headers = Vec::new();
        if let Some(auth) = self.credentials.header_value() {
            headers.push(("Authorization".to_string(), auth));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        for (name, value) in &self.headers {
            headers.push((name.clone(), value.clone()));
        }

        match body.as_deref() {
            Some(b) => debug!(
                method = %method,
                url = %url,
                body = %String::from_utf8_lossy(b),
                "request"
            ),
            None => debug!(method = %method, url = %url, "request"),
        }

        ApiRequest {
            method,
            url,
            headers,
            body,
        }
    }

    /// Sends the request and returns the body of a 200 response.
    pub fn execute(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        let response = self.transport.send(request)?;
        debug!(status = response.status, url = %request.url, "response");
        if response.status != 200 {
            let message = serde_json::from_slice::<ServiceMessage>(&response.body)
                .ok()
                .and_then(|m| m.message)
                .filter(|m| !m.is_empty());
            return Err(GrafctlError::from_status(
                response.status,
                response.status_line(),
                message,
            ));
        }
        Ok(response.body)
    }
}
