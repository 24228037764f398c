use crate::domain::ports::{CatalogProvider, RawCatalog};
use crate::utils::error::{FitmentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches the make/model/year catalog from an HTTP JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogProvider {
    client: Client,
    endpoint: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl HttpCatalogProvider {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_options(endpoint, Duration::from_secs(10), 2, Duration::from_millis(500))
    }

    pub fn with_options(
        endpoint: impl Into<String>,
        timeout: Duration,
        retry_attempts: u32,
        retry_delay: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fitment/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            retry_attempts,
            retry_delay,
        })
    }

    async fn fetch_once(&self) -> Result<RawCatalog> {
        tracing::debug!("Requesting catalog from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if !status.is_success() {
            return Err(FitmentError::CatalogFetchError {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<RawCatalog>().await?)
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn fetch_catalog(&self) -> Result<RawCatalog> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(catalog) => return Ok(catalog),
                Err(e) if e.is_retryable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "Catalog fetch failed ({}), retry {}/{} in {:?}",
                        e,
                        attempt,
                        self.retry_attempts,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
