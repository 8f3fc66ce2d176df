//! Type definitions and helpers for the Slack API.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// <https://api.slack.com/methods/chat.postMessage>
pub const POST_MESSAGE: &str = "/chat.postMessage";

/// A reusable client that holds a connection pool internally, as per
/// [reqwest::Client].
//`Lazy` allows every default transport to share one pool rather than have
// callers drill a client through.
pub(crate) static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channel": "C123ABC456",
///     "ts": "1503435956.000247"
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and should be checked on responses too,
// primarily to ensure appropriate deserialization behaviour in case of an
// otherwise empty successful response.
//
// Ideally we'd be able to use `ok` as a tag, rather than defining `APIResult`
// as untagged. See:
//   <https://github.com/serde-rs/serde/issues/745#issuecomment-294314786>
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}

/// <https://api.slack.com/methods/chat.postMessage#examples>
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostMessageResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    pub channel: String,
    /// Identifies the posted message, for example to reply in its thread.
    pub ts: String,
}
