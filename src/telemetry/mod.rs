//! Device snapshot sources. The poller that produces SNMP/LLDP snapshots
//! lives elsewhere; this module only knows how to fetch what it publishes.

mod file;
mod http;
pub mod sample;

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::models::Device;

pub use file::FileSource;
pub use http::HttpSource;

/// Anything that can hand over a complete device snapshot
#[async_trait::async_trait]
pub trait DeviceSource: Send + Sync {
    async fn fetch_devices(&self) -> Result<Vec<Device>>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Built-in demo network
pub struct SampleSource;

#[async_trait::async_trait]
impl DeviceSource for SampleSource {
    async fn fetch_devices(&self) -> Result<Vec<Device>> {
        Ok(sample::sample_devices())
    }

    fn describe(&self) -> String {
        "built-in sample network".to_string()
    }
}

/// Build a source from a `TELEMETRY_SOURCE` value:
/// `sample`, `file:<path>`, or an `http://` / `https://` URL.
pub fn from_spec(spec: &str, timeout_secs: u64) -> Result<Arc<dyn DeviceSource>> {
    let spec = spec.trim();
    if spec.is_empty() || spec.eq_ignore_ascii_case("sample") {
        return Ok(Arc::new(SampleSource));
    }
    if let Some(path) = spec.strip_prefix("file:") {
        if path.is_empty() {
            bail!("file telemetry source needs a path");
        }
        return Ok(Arc::new(FileSource::new(path)));
    }
    if spec.starts_with("http://") || spec.starts_with("https://") {
        return Ok(Arc::new(HttpSource::new(spec.to_string(), timeout_secs)?));
    }
    bail!("unsupported telemetry source: {}", spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spec() {
        assert_eq!(from_spec("sample", 5).unwrap().describe(), "built-in sample network");
        assert_eq!(from_spec("", 5).unwrap().describe(), "built-in sample network");
        assert_eq!(
            from_spec("file:/tmp/devices.json", 5).unwrap().describe(),
            "file /tmp/devices.json"
        );
        assert_eq!(
            from_spec("http://poller:9000/devices/", 5).unwrap().describe(),
            "http://poller:9000/devices/"
        );
        assert!(from_spec("file:", 5).is_err());
        assert!(from_spec("ftp://poller/devices", 5).is_err());
    }

    #[test]
    fn test_sample_source() {
        let devices = tokio_test::block_on(SampleSource.fetch_devices()).unwrap();
        assert_eq!(devices.len(), 18);
    }
}
