use std::env;
use std::time::Duration;

use super::entities::{BusLines, BusPositions};
use super::error::{UwaveError, UwaveResult};
use super::TransitSource;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://test.uwave.sg/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct UwaveClient {
    client: reqwest::Client,
    base_url: Url,
}

impl UwaveClient {
    pub fn new(base_url: &str, timeout: Duration) -> UwaveResult<UwaveClient> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UwaveError::Config(format!("Invalid base url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UwaveError::Config(format!("Not a base url: {}", base_url)));
        }

        let client = UwaveClient {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            base_url,
        };

        Ok(client)
    }

    /// Reads `UWAVE_BASE_URL` and `UWAVE_TIMEOUT_SECS`, falling back to the public test feed
    pub fn from_env() -> UwaveResult<UwaveClient> {
        let base_url = env::var("UWAVE_BASE_URL").unwrap_or(DEFAULT_BASE_URL.to_string());
        let timeout_secs = match env::var("UWAVE_TIMEOUT_SECS") {
            Ok(secs) => secs
                .parse::<u64>()
                .map_err(|e| UwaveError::Config(format!("Invalid UWAVE_TIMEOUT_SECS: {}", e)))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        UwaveClient::new(&base_url, Duration::from_secs(timeout_secs))
    }

    fn url(&self, segments: &[&str]) -> UwaveResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UwaveError::Config(format!("Not a base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request<T>(&self, url: Url) -> UwaveResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        log::debug!("Requesting {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UwaveError::Status(status.as_u16(), url));
        }

        let data_str = response.text().await?;
        log::trace!("Response: {}", data_str);
        serde_json::from_str(&data_str).map_err(|source| UwaveError::Decode { url, source })
    }
}

impl TransitSource for UwaveClient {
    async fn get_bus_lines(&self) -> UwaveResult<BusLines> {
        let url = self.url(&["busLines"])?;
        self.request(url).await
    }

    async fn get_bus_positions(&self, bus_line_id: &str) -> UwaveResult<BusPositions> {
        let url = self.url(&["busPositions", bus_line_id])?;
        self.request(url).await
    }
}
