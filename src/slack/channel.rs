//! Slack channel references as consumers write them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A channel as Slack's `chat.postMessage` accepts it: a name with its
/// leading hash (`#general`), a bare channel ID (`C0123456789`), or a user ID
/// for direct messages.
///
/// ```
/// use iris::slack::channel::ChannelName;
///
/// let by_name = ChannelName::from("#playground");
/// let by_id =   ChannelName::from("C0123456789");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelName(pub String);

/// Format without the surrounding newtype wrapper.
///
/// ```
/// use iris::slack::channel::ChannelName;
///
/// let x = ChannelName::from("#fp");
/// assert_eq!(format!("{}", x), "#fp");
/// ```
impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelName {
    fn from(x: &str) -> Self {
        ChannelName(x.to_owned())
    }
}

impl From<String> for ChannelName {
    fn from(x: String) -> Self {
        ChannelName(x)
    }
}
