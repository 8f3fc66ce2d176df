//! Configuration from the environment, for processes which send on behalf of
//! a single workspace.
//!
//! - `SLACK_TOKEN`: required bot or user token.
//! - `SLACK_CHANNEL`: channel used when a message doesn't name one.
//! - `SLACK_DRIVER`: driver name, `slack` by default.
//! - `SLACK_API_BASE`: Slack API base URL, Slack's own by default.
//!
//! Empty variables count as unset.

use crate::slack::{api::API_BASE, notification::Driver, Route};
use std::{env, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub channel: Option<String>,
    pub driver: Driver,
    pub api_base: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(k) => write!(f, "No ${} environment variable found", k),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Read the process environment. Loading any `.env` file is left to the
    /// caller.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        Ok(Config {
            token: get("SLACK_TOKEN").ok_or(ConfigError::Missing("SLACK_TOKEN"))?,
            channel: get("SLACK_CHANNEL"),
            driver: get("SLACK_DRIVER").map(Driver).unwrap_or_default(),
            api_base: get("SLACK_API_BASE").unwrap_or_else(|| API_BASE.to_owned()),
        })
    }

    /// The route every recipient of this process shares.
    pub fn route(&self) -> Route {
        Route {
            token: Some(self.token.clone()),
            channel: self.channel.clone(),
        }
    }
}
