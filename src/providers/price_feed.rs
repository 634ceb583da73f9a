use super::util::with_retry;
use crate::core::price::{PriceFeed, PriceObservation, parse_observation_date};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

#[derive(Debug, Deserialize)]
struct PriceFeedItem {
    currency: String,
    date: String,
    price: f64,
}

/// Price list served as a JSON array from a single URL.
pub struct HttpPriceFeed {
    url: String,
    retries: usize,
}

impl HttpPriceFeed {
    pub fn new(url: &str, retries: usize) -> Self {
        Self {
            url: url.to_string(),
            retries,
        }
    }

    /// Records with an unparseable date are dropped.
    fn into_observations(items: Vec<PriceFeedItem>) -> Vec<PriceObservation> {
        items
            .into_iter()
            .filter_map(|item| match parse_observation_date(&item.date) {
                Ok(date) => Some(PriceObservation {
                    currency: item.currency,
                    date,
                    price: item.price,
                }),
                Err(e) => {
                    warn!(currency = %item.currency, error = %e, "Skipping price record");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    #[instrument(name = "PriceFeedFetch", skip(self), fields(url = %self.url))]
    async fn fetch_observations(&self) -> Result<Vec<PriceObservation>> {
        debug!("Requesting price list");
        let response = with_retry(
            || async { reqwest::get(&self.url).await?.error_for_status() },
            self.retries,
            500,
        )
        .await
        .context("Price list request failed")?;

        let response_text = response
            .text()
            .await
            .context("Failed to get response text")?;

        let items: Vec<PriceFeedItem> = match serde_json::from_str(&response_text) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse price list response"
                );
                return Err(e).context("Failed to parse price list response");
            }
        };

        debug!(records = items.len(), "Received price list");
        Ok(Self::into_observations(items))
    }
}
