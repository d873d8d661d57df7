use crate::core::settlement_ledger::TransitionPolicy;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    /// Reject marks on settlements that are not pending instead of opening a record.
    pub strict_payment_transitions: bool,
    pub settlement_cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            strict_payment_transitions: env::var("STRICT_PAYMENT_TRANSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            settlement_cache_ttl: Duration::from_secs(
                env::var("SETTLEMENT_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300),
            ),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        if self.strict_payment_transitions {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Lenient
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 3000,
            log_level: "info".to_string(),
            strict_payment_transitions: true,
            settlement_cache_ttl: Duration::from_secs(300),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
