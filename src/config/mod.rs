use crate::error::{ProblemError, Result};
use serde::Deserialize;
use std::env;

/// Environment variable read by [`ProblemDetailsConfig::from_env`].
pub const ONLY_ON_JSON_REQUESTS_ENV: &str = "PROBLEM_DETAILS_ONLY_ON_JSON_REQUESTS";

/// Construction-time settings of the problem details middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProblemDetailsConfig {
    /// Only intercept faults for requests that send `Accept: application/json`.
    pub only_on_json_requests: bool,
}

impl Default for ProblemDetailsConfig {
    fn default() -> Self {
        Self {
            only_on_json_requests: true,
        }
    }
}

impl ProblemDetailsConfig {
    /// Load from process environment, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ONLY_ON_JSON_REQUESTS_ENV) {
            config.only_on_json_requests = parse_bool(ONLY_ON_JSON_REQUESTS_ENV, &raw)?;
        }
        Ok(config)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ProblemError::invalid_config(
            key,
            format!("expected a boolean, got {other:?}"),
        )),
    }
}
