use crate::errors::ConfigError;
use crate::policy::IncrementPolicy;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/habits.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub policy: IncrementPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let policy = match lookup("HABIT_POLICY") {
            Some(value) => value.parse()?,
            None => IncrementPolicy::default(),
        };

        Ok(Self {
            port,
            data_path,
            policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.data_path, PathBuf::from("data/habits.json"));
        assert_eq!(cfg.policy, IncrementPolicy::Random);
    }

    #[test]
    fn bad_port_falls_back_but_bad_policy_fails() {
        let cfg = config(&[("PORT", "not-a-port"), ("HABIT_POLICY", "fixed")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.policy, IncrementPolicy::Fixed);

        let err = config(&[("HABIT_POLICY", "daily")]).unwrap_err();
        assert!(err.to_string().contains("daily"));
    }
}
