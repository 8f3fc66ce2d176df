//! Secondary, coloured content hung off a [super::message::Message].
//!
//! <https://api.slack.com/reference/messaging/attachments>

use super::block::{AttachmentBlock, DividerBlock};
use super::field::{AttachmentField, FieldSource};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch, as Slack expects for an attachment's `ts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl From<i64> for Timestamp {
    fn from(x: i64) -> Self {
        Timestamp(x)
    }
}

impl From<u32> for Timestamp {
    fn from(x: u32) -> Self {
        Timestamp(x.into())
    }
}

/// Times before the epoch are clamped to it.
impl From<SystemTime> for Timestamp {
    fn from(x: SystemTime) -> Self {
        let secs = x
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Timestamp(i64::try_from(secs).unwrap_or(i64::MAX))
    }
}

impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for Timestamp {
    fn from(x: chrono::DateTime<Tz>) -> Self {
        Timestamp(x.timestamp())
    }
}

/// A single attachment. Every attribute is optional; those never set are left
/// out of the payload entirely.
#[derive(Debug, Default)]
pub struct Attachment {
    pub(crate) fallback: Option<String>,
    pub(crate) color: Option<String>,
    pub(crate) pretext: Option<String>,
    pub(crate) author_name: Option<String>,
    pub(crate) author_link: Option<String>,
    pub(crate) author_icon: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) thumb_url: Option<String>,
    pub(crate) footer: Option<String>,
    pub(crate) footer_icon: Option<String>,
    pub(crate) timestamp: Option<Timestamp>,
    pub(crate) fields: Vec<AttachmentField>,
    /// Where each field added as a bare pair sits in `fields`, by title.
    pair_fields: HashMap<String, usize>,
    pub(crate) actions: Vec<Value>,
    pub(crate) markdown: Vec<String>,
    pub(crate) callback_id: Option<String>,
    pub(crate) blocks: Vec<Box<dyn AttachmentBlock>>,
}

impl Attachment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title, optionally linking it.
    pub fn title<T: Into<String>>(mut self, title: T, url: Option<&str>) -> Self {
        self.title = Some(title.into());

        if let Some(url) = url {
            self.url = Some(url.to_owned());
        }

        self
    }

    /// Link the title.
    pub fn url<T: Into<String>>(mut self, url: T) -> Self {
        self.url = Some(url.into());
        self
    }

    /// The main body text.
    pub fn content<T: Into<String>>(mut self, content: T) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Plaintext summary for clients which can't display attachments.
    pub fn fallback<T: Into<String>>(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Either one of `good`, `warning` and `danger`, or a hex colour. Takes
    /// precedence over the colour implied by the message's level.
    pub fn color<T: Into<String>>(mut self, color: T) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Text shown above the attachment.
    pub fn pretext<T: Into<String>>(mut self, pretext: T) -> Self {
        self.pretext = Some(pretext.into());
        self
    }

    pub fn author<T: Into<String>>(mut self, name: T, link: Option<&str>, icon: Option<&str>) -> Self {
        self.author_name = Some(name.into());
        self.author_link = link.map(str::to_owned);
        self.author_icon = icon.map(str::to_owned);
        self
    }

    /// Add a short field. Bare pairs form a map from title to value: a title
    /// already added as a pair has its field replaced in place. Fields built
    /// with [Self::field_with] are never replaced.
    pub fn field<K: Into<String>, V: Into<String>>(self, title: K, value: V) -> Self {
        self.push_field((title, value))
    }

    /// Build a field in place, for example to make it [AttachmentField::long].
    pub fn field_with<F>(self, f: F) -> Self
    where
        F: FnOnce(AttachmentField) -> AttachmentField,
    {
        self.push_field(f(AttachmentField::new()))
    }

    pub fn push_field<T: Into<FieldSource>>(mut self, field: T) -> Self {
        match field.into() {
            FieldSource::Pair(title, value) => {
                let field = AttachmentField::new().title(title.as_str()).content(value);

                match self.pair_fields.get(&title) {
                    Some(&i) => self.fields[i] = field,
                    None => {
                        self.pair_fields.insert(title, self.fields.len());
                        self.fields.push(field);
                    }
                }
            }
            FieldSource::Built(field) => self.fields.push(field),
        }

        self
    }

    /// Replace every field with short fields built from title/value pairs, in
    /// iteration order.
    pub fn fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.clear();
        self.pair_fields.clear();
        fields
            .into_iter()
            .fold(self, |acc, (k, v)| acc.field(k, v))
    }

    /// Names the sub-fields, for example `text` or `pretext`, which should be
    /// formatted as mrkdwn.
    pub fn markdown<I, T>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.markdown = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn image<T: Into<String>>(mut self, url: T) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn thumb<T: Into<String>>(mut self, url: T) -> Self {
        self.thumb_url = Some(url.into());
        self
    }

    pub fn footer<T: Into<String>>(mut self, footer: T) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn footer_icon<T: Into<String>>(mut self, url: T) -> Self {
        self.footer_icon = Some(url.into());
        self
    }

    pub fn timestamp<T: Into<Timestamp>>(mut self, ts: T) -> Self {
        self.timestamp = Some(ts.into());
        self
    }

    /// Add a link button. `style` is `primary` or `danger` if supplied.
    ///
    /// <https://api.slack.com/reference/messaging/attachments#action_fields>
    pub fn action<T, U>(mut self, text: T, url: U, style: Option<&str>) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        let mut x = json!({
            "type": "button",
            "text": text.into(),
            "url": url.into(),
        });

        if let (Some(style), Some(obj)) = (style, x.as_object_mut()) {
            obj.insert("style".to_owned(), Value::from(style));
        }

        self.actions.push(x);
        self
    }

    /// Replace the actions with raw action objects, which are passed through
    /// untouched.
    pub fn actions(mut self, actions: Vec<Value>) -> Self {
        self.actions = actions;
        self
    }

    /// Identifies the attachment's actions in interactive callbacks.
    pub fn callback_id<T: Into<String>>(mut self, id: T) -> Self {
        self.callback_id = Some(id.into());
        self
    }

    pub fn block<B: AttachmentBlock + 'static>(mut self, block: B) -> Self {
        self.blocks.push(Box::new(block));
        self
    }

    pub fn divider_block(self) -> Self {
        self.block(DividerBlock)
    }

    pub fn get_fields(&self) -> &[AttachmentField] {
        &self.fields
    }
}
