//! Query configuration that downstream crates can serialize/deserialize.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Capacity bound for caches created through `as_cached_with`.
    /// `None` means unbounded. Negative values are rejected by `validate`.
    pub cache_capacity: Option<i64>,

    /// Distinct-key count after which equality-scan lookups log a
    /// quadratic-cost warning.
    pub scan_warn_threshold: usize,

    /// Emit trace events when an operator materializes its upstream.
    pub trace_materialization: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            cache_capacity: None,
            scan_warn_threshold: 1024,
            trace_materialization: true,
        }
    }
}

impl QueryConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYSEQ_CACHE_CAPACITY`: default cache capacity (signed; validated later)
    /// - `LAZYSEQ_SCAN_WARN_THRESHOLD`: distinct-key warning threshold
    /// - `LAZYSEQ_TRACE_MATERIALIZATION`: `true`/`false`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAZYSEQ_CACHE_CAPACITY") {
            if let Ok(v) = s.trim().parse::<i64>() {
                cfg.cache_capacity = Some(v);
            }
        }

        if let Ok(s) = std::env::var("LAZYSEQ_SCAN_WARN_THRESHOLD") {
            if let Ok(v) = s.trim().parse::<usize>() {
                cfg.scan_warn_threshold = v;
            }
        }

        if let Ok(s) = std::env::var("LAZYSEQ_TRACE_MATERIALIZATION") {
            if let Ok(v) = s.trim().parse::<bool>() {
                cfg.trace_materialization = v;
            }
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Process-wide snapshot, read from the environment on first use.
    pub fn global() -> &'static QueryConfig {
        static GLOBAL: OnceLock<QueryConfig> = OnceLock::new();
        GLOBAL.get_or_init(QueryConfig::from_env)
    }

    pub fn validate(&self) -> Result<()> {
        self.cache_capacity().map(|_| ())
    }

    /// The configured cache bound as an unsigned capacity.
    pub fn cache_capacity(&self) -> Result<Option<usize>> {
        match self.cache_capacity {
            None => Ok(None),
            Some(v) if v < 0 => Err(QueryError::invalid_argument(format!(
                "cache capacity must be non-negative, got {v}"
            ))),
            Some(v) => usize::try_from(v)
                .map(Some)
                .map_err(|_| QueryError::invalid_argument(format!("cache capacity {v} too large"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unbounded() {
        let cfg = QueryConfig::default();
        assert_eq!(cfg.cache_capacity().unwrap(), None);
        assert_eq!(cfg.scan_warn_threshold, 1024);
        assert!(cfg.trace_materialization);
    }

    #[test]
    fn json_fills_missing_fields() {
        let cfg = QueryConfig::from_json(r#"{ "cache_capacity": 16 }"#).unwrap();
        assert_eq!(cfg.cache_capacity().unwrap(), Some(16));
        assert_eq!(cfg.scan_warn_threshold, 1024);
    }

    #[test]
    fn negative_capacity_is_invalid() {
        let err = QueryConfig::from_json(r#"{ "cache_capacity": -1 }"#).unwrap_err();
        assert!(matches!(err, QueryError::InvalidArgument(_)));
    }

    #[test]
    fn malformed_json_maps_to_config_error() {
        let err = QueryConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }
}
