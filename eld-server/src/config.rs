//! Server configuration from the environment.
//!
//! | Variable                     | Default                  |
//! |------------------------------|--------------------------|
//! | `ELD_BIND_ADDR`              | `127.0.0.1:3000`         |
//! | `ELD_PLANNER_URL`            | `http://127.0.0.1:8000`  |
//! | `ELD_PLANNER_TIMEOUT_SECS`   | `30`                     |
//! | `ELD_PLANNER_MAX_CONCURRENT` | `4`                      |
//! | `ELD_MOCK_PLAN`              | unset                    |
//! | `ELD_STATIC_DIR`             | `static`                 |
//! | `ELD_PLAN_TTL_SECS`          | `3600`                   |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::planner::{DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENT};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_PLANNER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_PLAN_TTL_SECS: u64 = 3600;

/// A variable that is set but unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be a whole number of seconds greater than zero, got {value:?}")]
    InvalidSeconds { var: &'static str, value: String },

    #[error("{var} must be a whole number greater than zero, got {value:?}")]
    InvalidCount { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Runtime settings for the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub planner_url: String,
    pub planner_timeout: Duration,
    /// Planning requests allowed in flight at once.
    pub planner_max_concurrent: usize,
    /// When set, plans come from this file instead of the planner.
    pub mock_plan: Option<PathBuf>,
    pub static_dir: PathBuf,
    pub plan_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            planner_url: DEFAULT_BASE_URL.to_string(),
            planner_timeout: Duration::from_secs(DEFAULT_PLANNER_TIMEOUT_SECS),
            planner_max_concurrent: DEFAULT_MAX_CONCURRENT,
            mock_plan: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            plan_ttl: Duration::from_secs(DEFAULT_PLAN_TTL_SECS),
        }
    }
}

impl ServerConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`, which returns a variable's value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &'static str| lookup(var).map(|v| v.trim().to_string());

        let bind = get("ELD_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "ELD_BIND_ADDR",
            value: bind.clone(),
        })?;

        let planner_url = match get("ELD_PLANNER_URL") {
            Some(url) if url.is_empty() => {
                return Err(ConfigError::Empty {
                    var: "ELD_PLANNER_URL",
                });
            }
            Some(url) => url,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let planner_timeout = seconds(
            "ELD_PLANNER_TIMEOUT_SECS",
            get("ELD_PLANNER_TIMEOUT_SECS"),
            DEFAULT_PLANNER_TIMEOUT_SECS,
        )?;
        let planner_max_concurrent = count(
            "ELD_PLANNER_MAX_CONCURRENT",
            get("ELD_PLANNER_MAX_CONCURRENT"),
            DEFAULT_MAX_CONCURRENT,
        )?;
        let plan_ttl = seconds(
            "ELD_PLAN_TTL_SECS",
            get("ELD_PLAN_TTL_SECS"),
            DEFAULT_PLAN_TTL_SECS,
        )?;

        let mock_plan = get("ELD_MOCK_PLAN")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let static_dir = get("ELD_STATIC_DIR")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            bind_addr,
            planner_url,
            planner_timeout,
            planner_max_concurrent,
            mock_plan,
            static_dir,
            plan_ttl,
        })
    }
}

fn seconds(var: &'static str, value: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::from_secs(default));
    };
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds { var, value }),
    }
}

fn count(var: &'static str, value: Option<String>, default: usize) -> Result<usize, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidCount { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(from_pairs(&[]).unwrap(), ServerConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = from_pairs(&[
            ("ELD_BIND_ADDR", "0.0.0.0:8080"),
            ("ELD_PLANNER_URL", "https://planner.example.com"),
            ("ELD_PLANNER_TIMEOUT_SECS", "90"),
            ("ELD_PLANNER_MAX_CONCURRENT", "2"),
            ("ELD_MOCK_PLAN", "data/mock_plan.json"),
            ("ELD_STATIC_DIR", "/srv/eld/static"),
            ("ELD_PLAN_TTL_SECS", " 600 "),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.planner_url, "https://planner.example.com");
        assert_eq!(config.planner_timeout, Duration::from_secs(90));
        assert_eq!(config.planner_max_concurrent, 2);
        assert_eq!(config.mock_plan, Some(PathBuf::from("data/mock_plan.json")));
        assert_eq!(config.static_dir, PathBuf::from("/srv/eld/static"));
        assert_eq!(config.plan_ttl, Duration::from_secs(600));
    }

    #[test]
    fn bad_values_are_errors() {
        assert_eq!(
            from_pairs(&[("ELD_BIND_ADDR", "localhost")]),
            Err(ConfigError::InvalidAddr {
                var: "ELD_BIND_ADDR",
                value: "localhost".into(),
            })
        );
        assert!(matches!(
            from_pairs(&[("ELD_PLANNER_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidSeconds { .. })
        ));
        assert!(matches!(
            from_pairs(&[("ELD_PLAN_TTL_SECS", "an hour")]),
            Err(ConfigError::InvalidSeconds { var: "ELD_PLAN_TTL_SECS", .. })
        ));
        assert!(matches!(
            from_pairs(&[("ELD_PLANNER_MAX_CONCURRENT", "0")]),
            Err(ConfigError::InvalidCount { .. })
        ));
        assert!(matches!(
            from_pairs(&[("ELD_PLANNER_URL", "  ")]),
            Err(ConfigError::Empty { .. })
        ));
    }

    #[test]
    fn empty_mock_plan_means_unset() {
        assert_eq!(from_pairs(&[("ELD_MOCK_PLAN", "")]).unwrap().mock_plan, None);
    }
}
