//! Flatten a [Message] into the JSON body of a `chat.postMessage` request.
//!
//! Anything the caller never set is left out altogether rather than sent as
//! `null`, and empty collections count as unset. Collections keep the order
//! in which they were built.

use super::{
    attachment::{Attachment, Timestamp},
    channel::ChannelName,
    field::AttachmentField,
    message::{Icon, Message},
};
use serde::Serialize;
use serde_json::Value;

/// <https://api.slack.com/methods/chat.postMessage#args>
// Field order is the order keys are written in: `text` and `attachments`
// always lead.
#[derive(Debug, Serialize)]
pub struct MessageRequest<'a> {
    text: &'a str,
    attachments: Vec<AttachmentRequest<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a ChannelName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_emoji: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_names: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unfurl_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unfurl_media: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_broadcast: Option<bool>,
}

/// <https://api.slack.com/reference/messaging/attachments#fields>
#[derive(Debug, Serialize)]
pub struct AttachmentRequest<'a> {
    #[serde(skip_serializing_if = "is_empty")]
    actions: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    author_icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_link: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    blocks: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty")]
    fields: &'a [AttachmentField],
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer_icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty")]
    mrkdwn_in: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pretext: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumb_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title_link: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ts: Option<Timestamp>,
}

fn is_empty<T>(xs: &&[T]) -> bool {
    xs.is_empty()
}

/// Map a [Message] to its format on Slack's end. `default_channel` is used
/// only when the message doesn't name a channel itself.
pub fn build_payload<'a>(
    msg: &'a Message,
    default_channel: Option<&'a ChannelName>,
) -> MessageRequest<'a> {
    let (icon_emoji, icon_url) = match &msg.icon {
        Some(Icon::Emoji(x)) => (Some(x.as_str()), None),
        Some(Icon::Image(x)) => (None, Some(x.as_str())),
        None => (None, None),
    };

    MessageRequest {
        text: &msg.content,
        attachments: msg
            .attachments
            .iter()
            .map(|a| build_attachment(a, msg.color()))
            .collect(),
        channel: msg.channel.as_ref().or(default_channel),
        icon_emoji,
        icon_url,
        link_names: msg.link_names,
        unfurl_links: msg.unfurl_links,
        unfurl_media: msg.unfurl_media,
        username: msg.username.as_deref(),
        thread_ts: msg.thread_ts.as_deref(),
        reply_broadcast: msg.thread_broadcast,
    }
}

/// An attachment's own colour wins over `level_color`, the colour implied by
/// the message's level.
fn build_attachment<'a>(a: &'a Attachment, level_color: Option<&'a str>) -> AttachmentRequest<'a> {
    AttachmentRequest {
        actions: &a.actions,
        author_icon: a.author_icon.as_deref(),
        author_link: a.author_link.as_deref(),
        author_name: a.author_name.as_deref(),
        blocks: a.blocks.iter().map(|b| b.to_block()).collect(),
        color: a.color.as_deref().or(level_color),
        callback_id: a.callback_id.as_deref(),
        fallback: a.fallback.as_deref(),
        fields: &a.fields,
        footer: a.footer.as_deref(),
        footer_icon: a.footer_icon.as_deref(),
        image_url: a.image_url.as_deref(),
        mrkdwn_in: &a.markdown,
        pretext: a.pretext.as_deref(),
        text: a.content.as_deref(),
        thumb_url: a.thumb_url.as_deref(),
        title: a.title.as_deref(),
        title_link: a.url.as_deref(),
        ts: a.timestamp,
    }
}
