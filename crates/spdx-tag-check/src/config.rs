//! Checker configuration parsed from environment variables.
//!
//! Every setting can be overridden via environment variables prefixed with
//! `SPDX_TAG_CHECK_`; command-line flags take precedence over both.

use std::env;
use std::str::FromStr;

use spdx_tag::BuilderOptions;

use crate::error::CheckError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "SPDX_TAG_CHECK_LOG_LEVEL";
/// Environment variable enabling strict tag checking.
pub const STRICT_VAR: &str = "SPDX_TAG_CHECK_STRICT";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so a clean run prints only the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging.
    Trace,
    /// Per-record progress.
    Debug,
    /// Per-document progress.
    Info,
    /// Only problems.
    #[default]
    Warn,
    /// Only failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CheckError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, CheckError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(CheckError::InvalidConfig(format!(
            "invalid {name} value '{value}', expected true or false"
        ))),
    }
}

/// Configuration for a checker run.
///
/// # Environment Variables
///
/// - `SPDX_TAG_CHECK_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `SPDX_TAG_CHECK_STRICT`: report unknown tags as errors (true/false)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Treat tags no record accepts as errors.
    pub strict: bool,
}

impl CheckConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, CheckError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing variables.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CheckError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };
        let strict = match lookup(STRICT_VAR) {
            Some(val) => parse_flag(STRICT_VAR, &val)?,
            None => false,
        };
        Ok(Self { log_level, strict })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>, strict: Option<bool>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(strict) = strict {
            self.strict = strict;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Builder options implied by this configuration.
    #[must_use]
    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            strict: self.strict,
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("Warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let result = "loud".parse::<LogLevel>();
        assert!(result.unwrap_err().to_string().contains("unknown log level"));
    }

    #[test]
    fn defaults_apply_when_variables_are_missing() {
        let config = CheckConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CheckConfig::default());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(!config.strict);
    }

    #[test]
    fn reads_values_through_lookup() {
        let config = CheckConfig::from_lookup(|name| match name {
            LOG_LEVEL_VAR => Some("debug".to_owned()),
            STRICT_VAR => Some("yes".to_owned()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.builder_options().strict);
    }

    #[test]
    fn rejects_invalid_strict_flag() {
        let err = CheckConfig::from_lookup(|name| {
            (name == STRICT_VAR).then(|| "sometimes".to_owned())
        })
        .unwrap_err();
        assert!(err.to_string().contains("SPDX_TAG_CHECK_STRICT"));
    }

    #[test]
    fn apply_overrides_updates_selected_fields() {
        let config = CheckConfig::default().apply_overrides(Some(LogLevel::Error), Some(true));
        assert_eq!(config.log_level, LogLevel::Error);
        assert!(config.strict);

        let config = CheckConfig::default()
            .with_log_level(LogLevel::Info)
            .apply_overrides(None, None);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.strict);
    }
}
