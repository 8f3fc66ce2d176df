//! The HTTP seam. The dispatcher builds a [Request] and hands it to a
//! [Transport], which is responsible for everything network-related:
//! connection pooling, timeouts, and TLS.

use super::{
    api::{APIResult, PostMessageResponse, CLIENT},
    error::SlackError,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::warn;

/// An outgoing request: its JSON body, headers in the order they're set, and
/// anything else the transport may understand.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub json: Value,
    pub headers: Vec<(String, String)>,
    pub options: Map<String, Value>,
}

impl Request {
    pub fn new(json: Value) -> Self {
        Request {
            json,
            headers: Vec::new(),
            options: Map::new(),
        }
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Merge `overrides` over the request one top-level key at a time, with
    /// the overrides winning. `json` replaces the body and `headers` replaces
    /// every header; any other key becomes a transport option.
    pub fn merge(mut self, overrides: &Map<String, Value>) -> Result<Self, SlackError> {
        for (k, v) in overrides {
            match k.as_str() {
                "json" => self.json = v.clone(),
                "headers" => self.headers = to_headers(v)?,
                _ => {
                    self.options.insert(k.clone(), v.clone());
                }
            }
        }

        Ok(self)
    }
}

/// Header values may be given as strings, numbers or booleans.
fn to_headers(x: &Value) -> Result<Vec<(String, String)>, SlackError> {
    let obj = x
        .as_object()
        .ok_or_else(|| SlackError::InvalidHeader(x.to_string()))?;

    obj.iter()
        .map(|(k, v)| match v {
            Value::String(s) => Ok((k.clone(), s.clone())),
            Value::Number(_) | Value::Bool(_) => Ok((k.clone(), v.to_string())),
            _ => Err(SlackError::InvalidHeader(k.clone())),
        })
        .collect()
}

/// A positive number of seconds which fits in a [Duration].
fn to_timeout(x: &Value) -> Option<Duration> {
    x.as_f64()
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}

/// What came back from Slack, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SlackError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Interpret the body as a `chat.postMessage` result. Slack reports most
    /// failures with a 200 and `"ok": false`, which becomes
    /// [SlackError::APIResponseError].
    pub fn api_result(&self) -> Result<PostMessageResponse, SlackError> {
        match self.json::<APIResult<PostMessageResponse>>()? {
            APIResult::Ok(res) => Ok(res),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}

/// Performs the actual POST. Failures are returned as they are; nothing is
/// retried.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, url: &str, req: Request) -> Result<Response, SlackError>;
}

/// A [Transport] on top of [reqwest]. Non-2xx statuses are failures.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }
}

/// Shares a single connection pool across every default transport.
impl Default for ReqwestTransport {
    fn default() -> Self {
        ReqwestTransport::new(CLIENT.clone())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, url: &str, req: Request) -> Result<Response, SlackError> {
        let mut builder = self.client.post(url);

        // Headers go first so that `json` doesn't add a second content type.
        for (k, v) in &req.headers {
            builder = builder.header(k.as_str(), v.as_str());
        }
        builder = builder.json(&req.json);

        for (k, v) in &req.options {
            match (k.as_str(), to_timeout(v)) {
                ("timeout", Some(timeout)) => builder = builder.timeout(timeout),
                ("timeout", None) => warn!("Ignoring invalid request timeout: {}", v),
                _ => warn!("Ignoring unsupported request option: {}", k),
            }
        }

        let res = builder.send().await?.error_for_status()?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(Response { status, body })
    }
}
