//! Exchange settings: coin amounts, code format, and actor plumbing.
//!
//! Defaults reproduce the campus deployment. Every field can be overridden through an
//! `ERRANDS_*` environment variable, e.g. `ERRANDS_ORDER_STAKE=20`.

use ::config::{Config as ConfigLib, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Coins credited to every new reward account.
pub const DEFAULT_SIGNUP_BONUS: i64 = 50;

/// Coins a requester must hold to post, and pays the accepter on completion.
pub const DEFAULT_ORDER_STAKE: i64 = 10;

/// Prefix of the human-facing order reference.
pub const DEFAULT_DISPLAY_CODE_PREFIX: &str = "#NBO";

/// Display codes tried before order creation gives up.
pub const DEFAULT_DISPLAY_CODE_ATTEMPTS: u32 = 5;

/// Mailbox capacity of each actor.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// Deadline for a single client call, in milliseconds.
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 5_000;

const ENV_PREFIX: &str = "ERRANDS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("{0} must be greater than zero")]
    MustBePositive(&'static str),
}

/// Settings for one running exchange.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Opening balance of a new reward account.
    pub signup_bonus: i64,

    /// Minimum balance to post an order, and the amount moved on completion.
    pub order_stake: i64,

    /// Prefix prepended to the five random digits of a display code.
    pub display_code_prefix: String,

    /// Attempts at a free display code before `IdGenerationFailed`.
    pub display_code_attempts: u32,

    /// Bounded mailbox size for every actor.
    pub mailbox_capacity: usize,

    /// Per-call deadline; expiry surfaces as a timeout error.
    pub call_timeout_ms: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            signup_bonus: DEFAULT_SIGNUP_BONUS,
            order_stake: DEFAULT_ORDER_STAKE,
            display_code_prefix: DEFAULT_DISPLAY_CODE_PREFIX.to_string(),
            display_code_attempts: DEFAULT_DISPLAY_CODE_ATTEMPTS,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
        }
    }
}

impl ExchangeConfig {
    /// Defaults overlaid with any `ERRANDS_*` environment variables, then validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`ExchangeConfig::from_env`], reading `ERRANDS_*` variables from `vars`
    /// instead of the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        let config: Self = ConfigLib::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the exchange cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order_stake <= 0 {
            return Err(ConfigError::MustBePositive("order_stake"));
        }
        if self.display_code_attempts == 0 {
            return Err(ConfigError::MustBePositive("display_code_attempts"));
        }
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::MustBePositive("mailbox_capacity"));
        }
        if self.call_timeout_ms == 0 {
            return Err(ConfigError::MustBePositive("call_timeout_ms"));
        }
        Ok(())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}
