//! Helpers around Slack's use of OAuth Bearer Authentication.

use std::fmt;

/// A newtype wrapper around Slack access tokens, typically `xoxb-` bot tokens
/// or `xoxp-` user tokens.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct SlackAccessToken(pub String);

impl SlackAccessToken {
    /// Tokens made up of nothing but whitespace can't authenticate anything.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for SlackAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlackAccessToken(..)")
    }
}

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
///
/// ```
/// use iris::slack::auth::{to_auth_header_val, SlackAccessToken};
///
/// let token = SlackAccessToken("xoxb-foo".into());
/// assert_eq!(to_auth_header_val(&token), "Bearer xoxb-foo");
/// ```
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0)
}
