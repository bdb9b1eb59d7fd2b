//! Relay configuration.
//!
//! Loaded from JSON or straight from the environment. Only two knobs: the
//! bot token and an optional default destination channel for responses
//! whose context carries none.

use serde::Deserialize;

const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
const CHANNEL_VAR: &str = "DISCORD_DEFAULT_CHANNEL_ID";

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    pub bot_token: String,
    #[serde(default)]
    pub default_channel_id: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing env var \"{0}\"")]
    MissingEnvVar(&'static str),

    #[error("invalid value for env var \"{var}\": {value}")]
    InvalidEnvVar { var: &'static str, value: String },
}

impl RelayConfig {
    /// Read configuration from `DISCORD_BOT_TOKEN` and
    /// `DISCORD_DEFAULT_CHANNEL_ID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(TOKEN_VAR).ok(),
            std::env::var(CHANNEL_VAR).ok(),
        )
    }

    fn from_vars(
        token: Option<String>,
        channel: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bot_token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ConfigError::MissingEnvVar(TOKEN_VAR)),
        };
        let default_channel_id = match channel {
            None => None,
            Some(raw) => Some(raw.parse().map_err(|_| ConfigError::InvalidEnvVar {
                var: CHANNEL_VAR,
                value: raw.clone(),
            })?),
        };
        Ok(Self { bot_token, default_channel_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vars_requires_token() {
        let err = RelayConfig::from_vars(None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN")));

        let err = RelayConfig::from_vars(Some(String::new()), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn from_vars_parses_channel() {
        let cfg = RelayConfig::from_vars(Some("tok".into()), Some("42".into())).unwrap();
        assert_eq!(cfg.default_channel_id, Some(42));

        let err =
            RelayConfig::from_vars(Some("tok".into()), Some("not-a-number".into())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
    }

    #[test]
    fn deserializes_from_json() {
        let cfg: RelayConfig =
            serde_json::from_str(r#"{"bot_token":"tok"}"#).unwrap();
        assert_eq!(cfg.bot_token, "tok");
        assert_eq!(cfg.default_channel_id, None);
    }
}
