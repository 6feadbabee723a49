use std::env;

use crate::models::Orientation;
use crate::topology::layout::{self, LayoutConfig};

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub telemetry_source: String,
    pub telemetry_timeout_secs: u64,
    pub default_orientation: Orientation,
    pub layout: LayoutConfig,
    pub frontend_dir: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let default_orientation = Orientation::parse(&get("DEFAULT_ORIENTATION", "TB"))
            .unwrap_or_default();

        let layout = LayoutConfig {
            node_sep: get("LAYOUT_NODE_SEP", "").parse().unwrap_or(layout::MIN_NODE_SEP),
            rank_sep: get("LAYOUT_RANK_SEP", "").parse().unwrap_or(layout::MIN_RANK_SEP),
            margin: get("LAYOUT_MARGIN", "").parse().unwrap_or(layout::DEFAULT_MARGIN),
            sweeps: get("LAYOUT_SWEEPS", "").parse().unwrap_or(layout::DEFAULT_SWEEPS),
        }
        .sanitized();

        Self {
            listen_addr: get("LISTEN_ADDR", "0.0.0.0:8080"),
            telemetry_source: get("TELEMETRY_SOURCE", "sample"),
            telemetry_timeout_secs: get("TELEMETRY_TIMEOUT_SECS", "30").parse().unwrap_or(30),
            default_orientation,
            layout,
            frontend_dir: get("FRONTEND_DIR", "/app/frontend"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load_with(&[]);
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
        assert_eq!(cfg.telemetry_source, "sample");
        assert_eq!(cfg.telemetry_timeout_secs, 30);
        assert_eq!(cfg.default_orientation, Orientation::TopBottom);
        assert_eq!(cfg.layout, LayoutConfig::default());
    }

    #[test]
    fn test_overrides_and_clamping() {
        let cfg = load_with(&[
            ("DEFAULT_ORIENTATION", "lr"),
            ("LAYOUT_NODE_SEP", "200"),
            ("LAYOUT_RANK_SEP", "40"),
            ("LAYOUT_SWEEPS", "not-a-number"),
            ("TELEMETRY_SOURCE", "file:/data/devices.json"),
        ]);
        assert_eq!(cfg.default_orientation, Orientation::LeftRight);
        assert_eq!(cfg.layout.node_sep, 200.0);
        assert_eq!(cfg.layout.rank_sep, layout::MIN_RANK_SEP);
        assert_eq!(cfg.layout.sweeps, layout::DEFAULT_SWEEPS);
        assert_eq!(cfg.telemetry_source, "file:/data/devices.json");
    }
}
