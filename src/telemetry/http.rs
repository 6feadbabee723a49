use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::models::Device;

use super::DeviceSource;

/// Fetches the device list from the telemetry collector's HTTP API
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { url, client })
    }
}

#[async_trait::async_trait]
impl DeviceSource for HttpSource {
    async fn fetch_devices(&self) -> Result<Vec<Device>> {
        let resp = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to reach telemetry API {}", self.url))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Telemetry API error {}: {}", status, body));
        }

        let devices: Vec<Device> = resp
            .json()
            .await
            .with_context(|| format!("Invalid device list from {}", self.url))?;
        Ok(devices)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
