//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::RouterOptions;

/// Root configuration: router options plus the initial route table.
///
/// `T` is the payload attached to each route. The command-line tool uses
/// `serde_json::Value` so any TOML value can be carried through.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig<T = serde_json::Value> {
    /// Keep trailing slashes significant (`/a/` and `/a` differ).
    pub strict_trailing_slash: bool,

    /// Routes registered in order at construction.
    pub routes: Vec<RouteEntry<T>>,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl<T> Default for RouterConfig<T> {
    fn default() -> Self {
        Self {
            strict_trailing_slash: false,
            routes: Vec::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl<T> RouterConfig<T> {
    pub fn options(&self) -> RouterOptions {
        RouterOptions {
            strict_trailing_slash: self.strict_trailing_slash,
        }
    }
}

/// A single route: pattern plus payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteEntry<T> {
    /// Router pattern, e.g. `/users/:id` or `/files/**:rest`.
    pub path: String,

    /// Payload returned by lookups that resolve to this route.
    pub data: T,
}

impl<T> RouteEntry<T> {
    pub fn new(path: impl Into<String>, data: T) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format for log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}
