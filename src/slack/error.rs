use crate::slack::notification::Driver;
use std::{error, fmt};

/// Sum type representing every possible unexceptional fail state.
///
/// A recipient opting out of a driver isn't represented here; see
/// [super::dispatcher::Dispatcher::send].
#[derive(Debug)]
pub enum SlackError {
    /// The request couldn't be made, or Slack answered with a non-2xx status.
    APIRequestFailed(reqwest::Error),
    /// Slack answered `{"ok": false}` with the enclosed error code.
    APIResponseError(String),
    /// The recipient's route for this driver came without a usable token.
    MissingToken(Driver),
    Json(serde_json::Error),
    /// A header supplied via the message's transport overrides.
    InvalidHeader(String),
}

impl From<reqwest::Error> for SlackError {
    fn from(e: reqwest::Error) -> Self {
        SlackError::APIRequestFailed(e)
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(e: serde_json::Error) -> Self {
        SlackError::Json(e)
    }
}

impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            SlackError::APIRequestFailed(e) => format!("Slack API request failed: {:?}", e),
            SlackError::APIResponseError(e) => format!("Slack API returned error: {}", e),
            SlackError::MissingToken(d) => format!("No Slack token routed for driver: {}", d),
            SlackError::Json(e) => format!("Slack JSON could not be processed: {}", e),
            SlackError::InvalidHeader(h) => format!("Invalid header for Slack request: {}", h),
        };

        write!(f, "{}", x)
    }
}

impl error::Error for SlackError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            SlackError::APIRequestFailed(e) => Some(e),
            SlackError::Json(e) => Some(e),
            _ => None,
        }
    }
}
