//! The contracts between the dispatcher, the entity being notified, and the
//! notification itself.

use super::{auth::SlackAccessToken, channel::ChannelName, message::Message, transport::Response};
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};
use std::fmt;

/// Names the messaging channel a notification targets. Recipients use it to
/// decide which route, if any, applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Driver(pub String);

impl Default for Driver {
    fn default() -> Self {
        Driver("slack".to_owned())
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Driver {
    fn from(x: &str) -> Self {
        Driver(x.to_owned())
    }
}

/// Per-recipient, per-driver routing: who we authenticate as, and where
/// messages go unless they say otherwise.
///
/// Routes can be kept in configuration:
///
/// ```
/// use iris::slack::notification::Route;
///
/// let route: Route = serde_json::from_str(r##"{"token": "xoxb-foo", "channel": "#general"}"##).unwrap();
/// ```
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Route {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub token: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub channel: Option<String>,
}

impl Route {
    pub fn new<T: Into<String>>(token: T) -> Self {
        Route {
            token: Some(token.into()),
            channel: None,
        }
    }

    /// The channel used when a message doesn't name one.
    pub fn with_channel<T: Into<String>>(mut self, channel: T) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// The token, if there's one worth sending.
    pub fn access_token(&self) -> Option<SlackAccessToken> {
        self.token
            .as_ref()
            .map(|t| SlackAccessToken(t.clone()))
            .filter(|t| !t.is_blank())
    }

    pub fn default_channel(&self) -> Option<ChannelName> {
        self.channel.as_deref().map(ChannelName::from)
    }
}

/// The entity being notified.
pub trait Notifiable: Sized {
    /// Where to deliver `notification` via `driver`. `None` opts the
    /// recipient out, and nothing is sent.
    fn route_notification_for<N>(&self, driver: &Driver, notification: &N) -> Option<Route>
    where
        N: Notification<Self>;
}

/// Something worth telling a [Notifiable] about.
pub trait Notification<R> {
    /// Build the message for `notifiable`. `driver` is the dispatcher's, for
    /// notifications shared between several workspaces or apps.
    fn to_slack(&self, notifiable: &R, driver: &Driver) -> Message;
}

/// Notifications which post-process Slack's response into something of
/// their own, sent with [super::dispatcher::Dispatcher::send_with_hook].
pub trait ResponseHook {
    type Output;

    fn response(&self, res: Response) -> Self::Output;
}
