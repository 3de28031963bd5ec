//! Engine configuration injected at scheduler assembly
//!
//! Hosts ship settings over IPC as JSON; missing fields take their defaults so
//! a partial payload never fails. The configuration is passed explicitly to the
//! scheduler builder and threaded into every annotator call.

use serde::{Deserialize, Serialize};

/// Settings consumed by the decoration engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DecorationConfig {
    /// Hide markdown marks (heading `#` runs, emphasis delimiters, inline-code
    /// backticks, horizontal rules, link URLs) outside the selection
    pub hide_marks: bool,
}

impl DecorationConfig {
    /// Parse a JSON settings payload; malformed input degrades to defaults
    pub fn from_json(payload: &str) -> Self {
        match serde_json::from_str(payload) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("invalid decoration settings payload: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_disabled() {
        assert_eq!(DecorationConfig::from_json("{}"), DecorationConfig::default());
        assert!(!DecorationConfig::from_json("{}").hide_marks);
    }

    #[test]
    fn test_partial_payload_parses() {
        let config = DecorationConfig::from_json(r#"{"hide_marks": true}"#);
        assert!(config.hide_marks);
    }

    #[test]
    fn test_malformed_payload_degrades_to_defaults() {
        let config = DecorationConfig::from_json("not json");
        assert_eq!(config, DecorationConfig::default());
    }
}
