//! Logging preferences
//!
//! Persisted as a small JSON object by `persistence::ConfigStore`.

use serde::{Deserialize, Serialize};

/// Plugin settings
///
/// Keys missing from the stored document take their default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Append journal lines to the log file
    #[serde(rename = "LogInFile")]
    pub log_in_file: bool,
    /// Echo journal lines to the server console
    #[serde(rename = "LogInConsole")]
    pub log_in_console: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_in_file: true,
            log_in_console: true,
        }
    }
}

impl Config {
    /// Both sinks off
    pub fn silent() -> Self {
        Self {
            log_in_file: false,
            log_in_console: false,
        }
    }

    /// Whether the journal has anywhere to write
    pub fn any_output(&self) -> bool {
        self.log_in_file || self.log_in_console
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(json, r#"{"LogInFile":true,"LogInConsole":true}"#);
    }

    #[test]
    fn test_missing_key_defaults_true() {
        let config: Config = serde_json::from_str(r#"{"LogInFile":false}"#).unwrap();
        assert_eq!(
            config,
            Config {
                log_in_file: false,
                log_in_console: true,
            }
        );
        assert!(config.any_output());
        assert!(!Config::silent().any_output());
    }
}
