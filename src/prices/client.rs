use eyre::Result;
use reqwest::Client;
use url::Url;

use super::{PriceMap, PriceRecord};
use crate::config::Config;
use crate::notify::{Notification, Notifier};

/// Fetches the price list. One request, no retry.
#[derive(Debug, Clone)]
pub struct PriceClient {
    url: Url,
    client: Client,
}

impl PriceClient {
    /// # Errors
    /// * If `url` is not a valid URL
    /// * If the HTTP client cannot be built
    pub fn new(url: &str, timeout: Option<std::time::Duration>) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| eyre::eyre!("invalid price list url {url}: {e}"))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            url,
            client: builder.build()?,
        })
    }

    /// # Errors
    /// * If the configured url is invalid
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.prices_url, config.prices_timeout)
    }

    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// # Errors
    /// * On network failure, a non success status, or a body that is not a price list
    pub async fn fetch(&self) -> Result<PriceMap> {
        log::debug!("prices: fetching {}", self.url);

        let records = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PriceRecord>>()
            .await?;

        let prices = PriceMap::from_records(records);
        log::info!(
            "prices: loaded {} tokens, {} with a valid price",
            prices.len(),
            prices.valid_tokens().len()
        );
        Ok(prices)
    }
}

/// Fetches prices, degrading to an empty map on failure.
///
/// A failure is reported through `notifier` as "Error fetching prices". Callers then
/// run with no usable prices instead of aborting.
pub async fn load_prices(client: &PriceClient, notifier: &Notifier) -> PriceMap {
    match client.fetch().await {
        Ok(prices) => prices,
        Err(e) => {
            log::error!("prices: failed to fetch {}: {e}", client.url());
            notifier
                .notify(Notification::error("Error fetching prices").with_description(&e.to_string()))
                .await;
            PriceMap::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(PriceClient::new("not a url", None).is_err());
        assert!(PriceClient::new("https://interview.switcheo.com/prices.json", None).is_ok());
    }

    #[tokio::test]
    async fn test_load_prices_degrades_to_empty_and_notifies() {
        // Nothing listens on port 9 of localhost
        let client = PriceClient::new(
            "http://127.0.0.1:9/prices.json",
            Some(std::time::Duration::from_secs(2)),
        )
        .unwrap();
        let notifier = Notifier::recording();

        let prices = load_prices(&client, &notifier).await;

        assert!(prices.is_empty());
        let recorded = notifier.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].title, "Error fetching prices");
    }
}
