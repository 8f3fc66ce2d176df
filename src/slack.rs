//! Post notifications to Slack with a single `chat.postMessage` call per
//! recipient.
//!
//! A [message::Message] is built fluently, flattened by [payload] into the
//! JSON body, and delivered by a [dispatcher::Dispatcher] using the route the
//! recipient supplies for the dispatcher's driver.

pub mod api;
pub mod attachment;
pub mod auth;
pub mod block;
pub mod channel;
pub mod dispatcher;
pub mod error;
pub mod field;
pub mod message;
pub mod notification;
pub mod payload;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use error::SlackError;
pub use message::Message;
pub use notification::{Driver, Notifiable, Notification, ResponseHook, Route};
