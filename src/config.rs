use std::time::Duration;

use crate::check::StockPolicy;
use crate::limits::DEFAULT_DEBOUNCE_MS;

/// Validator tuning. Defaults come from `limits`; deployments override via
/// `VESTRY_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub stock_policy: StockPolicy,
    pub debounce: Duration,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            stock_policy: StockPolicy::default(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl ValidatorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_u32 = |key: &str, fallback: u32| {
            var(key).and_then(|s| s.parse().ok()).unwrap_or(fallback)
        };
        let debounce_ms: u64 = var("VESTRY_DEBOUNCE_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            stock_policy: StockPolicy {
                default_threshold: parse_u32(
                    "VESTRY_LOW_STOCK_THRESHOLD",
                    defaults.stock_policy.default_threshold,
                ),
                instrument_threshold: parse_u32(
                    "VESTRY_INSTRUMENT_THRESHOLD",
                    defaults.stock_policy.instrument_threshold,
                ),
            },
            debounce: Duration::from_millis(debounce_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_without_overrides() {
        let config = ValidatorConfig::from_lookup(|_| None);
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.stock_policy.default_threshold, 2);
        assert_eq!(config.stock_policy.instrument_threshold, 0);
        assert_eq!(config.debounce, Duration::from_millis(500));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("VESTRY_LOW_STOCK_THRESHOLD", "5"),
            ("VESTRY_DEBOUNCE_MS", "250"),
        ]
        .into_iter()
        .collect();
        let config = ValidatorConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.stock_policy.default_threshold, 5);
        assert_eq!(config.stock_policy.instrument_threshold, 0);
        assert_eq!(config.debounce, Duration::from_millis(250));
    }

    #[test]
    fn unparseable_overrides_fall_back() {
        let config =
            ValidatorConfig::from_lookup(|k| (k == "VESTRY_DEBOUNCE_MS").then(|| "soon".into()));
        assert_eq!(config.debounce, Duration::from_millis(500));
    }
}
