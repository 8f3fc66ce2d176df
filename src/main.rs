//! Post a one-off message to Slack from the command line:
//!
//! ```sh
//! SLACK_TOKEN=xoxb-... SLACK_CHANNEL=#playground iris "Deploy finished"
//! ```
//!
//! Configuration is read from the environment and an optional `.env`; see
//! [iris::config].

use dotenvy::dotenv;
use iris::{
    config::Config,
    slack::{
        api::PostMessageResponse,
        message::Level,
        transport::{ReqwestTransport, Response},
        Dispatcher, Driver, Message, Notifiable, Notification, ResponseHook, Route, SlackError,
    },
};
use std::{env, process};
use tracing::{error, info, warn};

/// Every invocation notifies the single configured workspace.
struct Workspace(Route);

impl Notifiable for Workspace {
    fn route_notification_for<N>(&self, _: &Driver, _: &N) -> Option<Route>
    where
        N: Notification<Self>,
    {
        Some(self.0.clone())
    }
}

struct Broadcast {
    level: Level,
    content: String,
}

impl Notification<Workspace> for Broadcast {
    fn to_slack(&self, _: &Workspace, _: &Driver) -> Message {
        Message::new().level(self.level).content(self.content.as_str())
    }
}

/// Slack reports most failures with a 200, so look inside.
impl ResponseHook for Broadcast {
    type Output = Result<PostMessageResponse, SlackError>;

    fn response(&self, res: Response) -> Self::Output {
        res.api_result()
    }
}

/// A leading `--success`, `--warning` or `--error` sets the level; the rest
/// is the message.
fn parse_args<I: Iterator<Item = String>>(mut args: std::iter::Peekable<I>) -> Broadcast {
    let level = match args.peek().map(String::as_str) {
        Some("--success") => Some(Level::Success),
        Some("--warning") => Some(Level::Warning),
        Some("--error") => Some(Level::Error),
        _ => None,
    };
    if level.is_some() {
        args.next();
    }

    Broadcast {
        level: level.unwrap_or_default(),
        content: args.collect::<Vec<_>>().join(" "),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let config = Config::from_env().unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    let notification = parse_args(env::args().skip(1).peekable());
    if notification.content.is_empty() {
        error!("Nothing to send");
        process::exit(1);
    }

    let dispatcher = Dispatcher::new(ReqwestTransport::default())
        .with_driver(config.driver.clone())
        .with_api_base(config.api_base.clone());

    let res = dispatcher
        .send_with_hook(&Workspace(config.route()), &notification)
        .await
        .and_then(Option::transpose);

    match res {
        Ok(Some(posted)) => info!("Posted {} in {}", posted.ts, posted.channel),
        Ok(None) => info!("Nothing routed for driver {}", config.driver),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
