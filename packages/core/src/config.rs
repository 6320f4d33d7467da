//! Runtime API configuration
//!
//! ApiConfig is built once at startup, usually from the environment, and
//! handed to every `BookmarksApi` instance. It is immutable afterwards.

use crate::services::DEFAULT_SEARCH_LIMIT;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default capacity of a scope's broadcast channel
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 128;

/// Default application scope
pub const DEFAULT_SCOPE: &str = "default";

pub const SEARCH_LIMIT_ENV: &str = "BOOKMARKS_SEARCH_LIMIT";
pub const EVENT_CAPACITY_ENV: &str = "BOOKMARKS_EVENT_CAPACITY";
pub const SCOPE_ENV: &str = "BOOKMARKS_SCOPE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    /// Maximum results per search (default and upper bound: 50)
    pub search_result_limit: usize,

    /// Events a slow listener may lag behind before losing some (default: 128)
    pub event_channel_capacity: usize,

    /// Scope whose listening contexts receive the model's events
    pub scope: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            search_result_limit: DEFAULT_SEARCH_LIMIT,
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

impl ApiConfig {
    /// Read `BOOKMARKS_SEARCH_LIMIT`, `BOOKMARKS_EVENT_CAPACITY` and
    /// `BOOKMARKS_SCOPE`, falling back to defaults for unset or unparsable
    /// values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            search_result_limit: match parse_or(&lookup, SEARCH_LIMIT_ENV, defaults.search_result_limit) {
                limit if limit > DEFAULT_SEARCH_LIMIT => {
                    warn!(
                        "{}={} exceeds the maximum, using {}",
                        SEARCH_LIMIT_ENV, limit, DEFAULT_SEARCH_LIMIT
                    );
                    DEFAULT_SEARCH_LIMIT
                }
                limit => limit,
            },
            event_channel_capacity: parse_or(
                &lookup,
                EVENT_CAPACITY_ENV,
                defaults.event_channel_capacity,
            ),
            scope: lookup(SCOPE_ENV)
                .filter(|scope| !scope.trim().is_empty())
                .unwrap_or(defaults.scope),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.search_result_limit == 0 {
            return Err("search_result_limit must be at least 1".to_string());
        }
        if self.search_result_limit > DEFAULT_SEARCH_LIMIT {
            return Err(format!(
                "search_result_limit must be at most {}",
                DEFAULT_SEARCH_LIMIT
            ));
        }
        if self.event_channel_capacity == 0 {
            return Err("event_channel_capacity must be at least 1".to_string());
        }
        if self.scope.trim().is_empty() {
            return Err("scope must not be empty".to_string());
        }
        Ok(())
    }
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.search_result_limit, 50);
        assert_eq!(config.event_channel_capacity, 128);
        assert_eq!(config.scope, "default");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup() {
        let vars = HashMap::from([
            (SEARCH_LIMIT_ENV, "10"),
            (EVENT_CAPACITY_ENV, "lots"),
            (SCOPE_ENV, "profile-1"),
        ]);
        let config = ApiConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.search_result_limit, 10);
        assert_eq!(config.event_channel_capacity, DEFAULT_EVENT_CHANNEL_CAPACITY);
        assert_eq!(config.scope, "profile-1");
    }

    #[test]
    fn test_search_limit_above_maximum() {
        let config = ApiConfig {
            search_result_limit: 100,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());

        let config =
            ApiConfig::from_lookup(|key| (key == SEARCH_LIMIT_ENV).then(|| "100".to_string()));
        assert_eq!(config.search_result_limit, DEFAULT_SEARCH_LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_and_blank() {
        let config = ApiConfig {
            search_result_limit: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ApiConfig {
            scope: " ".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"scope": "work"}"#).unwrap();
        assert_eq!(config.scope, "work");
        assert_eq!(config.search_result_limit, 50);
    }
}
