//! Slack's block API is its most modern, and allows us to mix rich formatting
//! with foreign plaintext inside an attachment.
//!
//! <https://api.slack.com/reference/block-kit/blocks>

use serde::ser::{self, SerializeStruct};
use serde_json::{json, Value};
use std::fmt;

/// Anything which can be placed in an attachment's `blocks`. Implement this
/// for new kinds of block; the payload builder only ever asks a block for its
/// wire representation, in insertion order.
pub trait AttachmentBlock: fmt::Debug + Send + Sync {
    fn to_block(&self) -> Value;
}

/// A text object as used within blocks.
///
/// <https://api.slack.com/reference/block-kit/composition-objects#text>
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Plaintext(String),
    /// "mrkdown" is Slack's alternative to Markdown.
    ///
    /// <https://api.slack.com/reference/surfaces/formatting#basics>
    Mrkdwn(String),
}

impl ser::Serialize for Text {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut state = serializer.serialize_struct("Text", 2)?;

        let (typ, text) = match self {
            Text::Plaintext(x) => ("plain_text", x),
            Text::Mrkdwn(x) => ("mrkdwn", x),
        };
        state.serialize_field("type", typ)?;
        state.serialize_field("text", text)?;

        state.end()
    }
}

/// A visual separator.
///
/// <https://api.slack.com/reference/block-kit/blocks#divider>
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DividerBlock;

impl AttachmentBlock for DividerBlock {
    fn to_block(&self) -> Value {
        json!({ "type": "divider" })
    }
}

/// <https://api.slack.com/reference/block-kit/blocks#section>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock(pub Text);

impl AttachmentBlock for SectionBlock {
    fn to_block(&self) -> Value {
        json!({ "type": "section", "text": self.0 })
    }
}

/// Headers only support plaintext.
///
/// <https://api.slack.com/reference/block-kit/blocks#header>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock(pub String);

impl AttachmentBlock for HeaderBlock {
    fn to_block(&self) -> Value {
        json!({ "type": "header", "text": Text::Plaintext(self.0.clone()) })
    }
}

/// Small, muted text.
///
/// <https://api.slack.com/reference/block-kit/blocks#context>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock(pub Vec<Text>);

impl AttachmentBlock for ContextBlock {
    fn to_block(&self) -> Value {
        json!({ "type": "context", "elements": self.0 })
    }
}

/// <https://api.slack.com/reference/block-kit/blocks#image>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlock {
    pub image_url: String,
    pub alt_text: String,
}

impl AttachmentBlock for ImageBlock {
    fn to_block(&self) -> Value {
        json!({
            "type": "image",
            "image_url": self.image_url,
            "alt_text": self.alt_text,
        })
    }
}
