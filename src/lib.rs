//! A messenger for notifications, in the tradition of its namesake.
//!
//! The only communication mechanism currently supported is [Slack][slack]'s
//! `chat.postMessage` API.
//!
//! [slack]: https://slack.com

pub mod config;
mod de;
pub mod slack;
