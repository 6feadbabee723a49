use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::models::Device;

use super::DeviceSource;

/// Reads a JSON array of devices from disk on every fetch
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DeviceSource for FileSource {
    async fn fetch_devices(&self) -> Result<Vec<Device>> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read device snapshot {}", self.path.display()))?;
        let devices: Vec<Device> = serde_json::from_str(&data)
            .with_context(|| format!("Invalid device snapshot {}", self.path.display()))?;
        Ok(devices)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("netmap-{}-{}.json", name, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_reads_snapshot() {
        let path = temp_path("ok");
        let devices = super::super::sample::sample_devices();
        tokio::fs::write(&path, serde_json::to_string(&devices).unwrap()).await.unwrap();

        let loaded = FileSource::new(&path).fetch_devices().await.unwrap();
        assert_eq!(loaded.len(), devices.len());
        assert_eq!(loaded[0].id, "isp-a");
        assert_eq!(loaded[0].interfaces[0].connected_to.as_deref(), Some("core-rtr-01"));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = FileSource::new(temp_path("missing")).fetch_devices().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read device snapshot"));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_an_error() {
        let path = temp_path("bad");
        tokio::fs::write(&path, "{\"not\": \"a list\"}").await.unwrap();
        let err = FileSource::new(&path).fetch_devices().await.unwrap_err();
        assert!(err.to_string().contains("Invalid device snapshot"));
        let _ = tokio::fs::remove_file(&path).await;
    }
}
