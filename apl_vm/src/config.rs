//! Session configuration.
//!
//! Read from a TOML document:
//!
//! ```toml
//! origin = 0
//! debug = true
//! ```
//!
//! or from the `APL_ORIGIN` and `APL_DEBUG` environment variables.

use std::env;

use serde::Deserialize;

use crate::vm::error::{AplError, AplResult};

const DEFAULT_ORIGIN: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Index origin, 0 or 1
    pub origin: i64,
    /// Trace every evaluated statement
    pub debug: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            debug: false,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(source: &str) -> AplResult<Self> {
        let config: SessionConfig =
            toml::from_str(source).map_err(|e| AplError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> AplResult<Self> {
        Self::from_vars(
            env::var("APL_ORIGIN").ok().as_deref(),
            env::var("APL_DEBUG").ok().as_deref(),
        )
    }

    /// Build from raw variable values. Unset or blank values keep the default.
    pub fn from_vars(origin: Option<&str>, debug: Option<&str>) -> AplResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = origin.map(str::trim).filter(|s| !s.is_empty()) {
            config.origin = raw
                .parse()
                .map_err(|_| AplError::InvalidConfig(format!("APL_ORIGIN: not an integer: {raw}")))?;
        }
        if let Some(raw) = debug.map(str::trim).filter(|s| !s.is_empty()) {
            config.debug = parse_flag(raw)
                .ok_or_else(|| AplError::InvalidConfig(format!("APL_DEBUG: not a flag: {raw}")))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AplResult<()> {
        validate_origin(self.origin)
    }
}

pub(crate) fn validate_origin(origin: i64) -> AplResult<()> {
    match origin {
        0 | 1 => Ok(()),
        other => Err(AplError::InvalidConfig(format!(
            "index origin must be 0 or 1, got {other}"
        ))),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
