//! Compose a message to post to Slack.
//!
//! Messages are built fluently, once per notification, and consumed by
//! [super::dispatcher::Dispatcher]:
//!
//! ```
//! use iris::slack::message::Message;
//!
//! let msg = Message::new()
//!     .success()
//!     .from("Ghostbot", Some(":ghost:"))
//!     .to("#ghost-talk")
//!     .content("Deployed")
//!     .attachment(|a| a.title("Release", None).field("Version", "v42"));
//! ```

use super::{attachment::Attachment, channel::ChannelName};
use serde_json::{Map, Value};

/// The nature of the notification, determining the default colour of every
/// attachment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Level {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    /// Informational messages aren't coloured.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Level::Info => None,
            Level::Success => Some("good"),
            Level::Warning => Some("warning"),
            Level::Error => Some("danger"),
        }
    }
}

/// The avatar shown next to the username. Only one can be in effect, so
/// whichever was set last wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// An emoji code such as `:ghost:`.
    Emoji(String),
    /// A URL to an image.
    Image(String),
}

#[derive(Debug, Default)]
pub struct Message {
    pub(crate) level: Level,
    /// Not part of the `chat.postMessage` payload. Kept for notifications
    /// which inspect it themselves.
    pub(crate) as_user: Option<bool>,
    pub(crate) username: Option<String>,
    pub(crate) icon: Option<Icon>,
    pub(crate) channel: Option<ChannelName>,
    pub(crate) content: String,
    pub(crate) link_names: Option<u8>,
    pub(crate) unfurl_links: Option<bool>,
    pub(crate) unfurl_media: Option<bool>,
    pub(crate) attachments: Vec<Attachment>,
    pub(crate) thread_ts: Option<String>,
    pub(crate) thread_broadcast: Option<bool>,
    pub(crate) http: Map<String, Value>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn info(self) -> Self {
        self.level(Level::Info)
    }

    pub fn success(self) -> Self {
        self.level(Level::Success)
    }

    pub fn warning(self) -> Self {
        self.level(Level::Warning)
    }

    pub fn error(self) -> Self {
        self.level(Level::Error)
    }

    /// Post under a custom username, optionally with an emoji icon.
    pub fn from<T: Into<String>>(mut self, username: T, icon: Option<&str>) -> Self {
        self.username = Some(username.into());

        if let Some(icon) = icon {
            self.icon = Some(Icon::Emoji(icon.to_owned()));
        }

        self
    }

    pub fn icon<T: Into<String>>(mut self, emoji: T) -> Self {
        self.icon = Some(Icon::Emoji(emoji.into()));
        self
    }

    pub fn image<T: Into<String>>(mut self, url: T) -> Self {
        self.icon = Some(Icon::Image(url.into()));
        self
    }

    /// Whether to post as the authed user rather than as a bot.
    pub fn as_user(mut self, as_user: bool) -> Self {
        self.as_user = Some(as_user);
        self
    }

    /// Override the channel routed for the recipient.
    pub fn to<T: Into<ChannelName>>(mut self, channel: T) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn content<T: Into<String>>(mut self, content: T) -> Self {
        self.content = content.into();
        self
    }

    /// Build and append an attachment. Attachments are posted in the order
    /// they're added.
    pub fn attachment<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Attachment) -> Attachment,
    {
        self.attachments.push(f(Attachment::new()));
        self
    }

    /// Find and link channel names and usernames.
    pub fn link_names(mut self) -> Self {
        self.link_names = Some(1);
        self
    }

    pub fn unfurl_links(mut self, unfurl: bool) -> Self {
        self.unfurl_links = Some(unfurl);
        self
    }

    pub fn unfurl_media(mut self, unfurl: bool) -> Self {
        self.unfurl_media = Some(unfurl);
        self
    }

    /// Options merged over the outgoing request, winning over anything the
    /// dispatcher sets. See [super::transport::Request::merge].
    pub fn http(mut self, options: Map<String, Value>) -> Self {
        self.http = options;
        self
    }

    /// Reply in the thread of the given parent message `ts`.
    pub fn thread_timestamp<T: ToString>(mut self, ts: T) -> Self {
        self.thread_ts = Some(ts.to_string());
        self
    }

    /// Also post a thread reply to the channel.
    pub fn thread_broadcast(mut self, broadcast: bool) -> Self {
        self.thread_broadcast = Some(broadcast);
        self
    }

    /// The colour implied by the message's level.
    pub fn color(&self) -> Option<&'static str> {
        self.level.color()
    }

    pub fn get_level(&self) -> Level {
        self.level
    }

    pub fn get_as_user(&self) -> Option<bool> {
        self.as_user
    }

    pub fn get_channel(&self) -> Option<&ChannelName> {
        self.channel.as_ref()
    }

    pub fn get_attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}
