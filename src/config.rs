use serde::{Deserialize, Serialize};

use crate::calculator::{CalculatorInputs, OptimizationInputs};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Let the planner borrow overhead/hydration/Redis/replication from the
    /// most recent footprint estimate
    pub share_footprint_params: bool,
    /// Initial values offered by `GET /api/storage/defaults`
    pub defaults: CalculatorDefaults,
}

/// Starting inputs for both calculators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorDefaults {
    pub footprint: CalculatorInputs,
    pub optimization: OptimizationInputs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9100".to_string(),
            share_footprint_params: true,
            defaults: CalculatorDefaults::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source; `from_env` passes the
    /// process environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = var("STORAGE_CALC_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(val) = var("STORAGE_CALC_SHARE_PARAMS") {
            if let Some(v) = parse_bool(&val) {
                config.share_footprint_params = v;
            }
        }

        // Default presets
        if let Some(val) = var("STORAGE_CALC_EMBEDDING_DIM") {
            if let Ok(d) = val.parse::<u32>() {
                if d > 0 {
                    config.defaults.footprint.embedding_dim = d;
                    config.defaults.optimization.embedding_dim = d;
                }
            }
        }
        if let Some(val) = var("STORAGE_CALC_REPLICATION_FACTOR") {
            if let Ok(v) = val.parse::<u32>() {
                // 0 is not a valid factor; keep the default
                if v > 0 {
                    config.defaults.footprint.replication_factor = v;
                }
            }
        }

        config
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" ON "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = Config::from_vars(vars(&[
            ("STORAGE_CALC_BIND_ADDR", "0.0.0.0:8080"),
            ("STORAGE_CALC_SHARE_PARAMS", "off"),
            ("STORAGE_CALC_EMBEDDING_DIM", "1024"),
            ("STORAGE_CALC_REPLICATION_FACTOR", "2"),
        ]));
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(!config.share_footprint_params);
        assert_eq!(config.defaults.footprint.embedding_dim, 1024);
        assert_eq!(config.defaults.optimization.embedding_dim, 1024);
        assert_eq!(config.defaults.footprint.replication_factor, 2);
    }

    #[test]
    fn test_from_vars_ignores_invalid_values() {
        let config = Config::from_vars(vars(&[
            ("STORAGE_CALC_SHARE_PARAMS", "maybe"),
            ("STORAGE_CALC_EMBEDDING_DIM", "wide"),
            ("STORAGE_CALC_REPLICATION_FACTOR", "0"),
        ]));
        let defaults = Config::default();
        assert!(config.share_footprint_params);
        assert_eq!(config.defaults.footprint.embedding_dim, 512);
        assert_eq!(
            config.defaults.footprint.replication_factor,
            defaults.defaults.footprint.replication_factor
        );
    }

    #[test]
    fn test_default_config_shares_params() {
        let config = Config::default();
        assert!(config.share_footprint_params);
        assert_eq!(config.defaults.footprint.embedding_dim, 512);
        assert_eq!(config.defaults.optimization.bm25_percent, 20.0);
    }
}
