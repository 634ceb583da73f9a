//! Price observations and the latest-price snapshot built from them

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

/// A single reported price for a currency at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub currency: String,
    pub date: DateTime<Utc>,
    pub price: f64,
}

impl PriceObservation {
    pub fn new(currency: &str, date: DateTime<Utc>, price: f64) -> Self {
        Self {
            currency: currency.to_string(),
            date,
            price,
        }
    }
}

/// Parses the date formats seen in price feeds into UTC.
///
/// Accepts RFC 3339 timestamps, naive date-times and bare dates. Naive values
/// are read as UTC, bare dates as midnight UTC.
pub fn parse_observation_date(date_str: &str) -> Result<DateTime<Utc>> {
    let trimmed = date_str.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("Failed to parse date: {date_str}"))
}

/// Latest known price per currency code.
///
/// Iterates in ascending currency code order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSnapshot {
    prices: BTreeMap<String, f64>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, currency: &str) -> Option<f64> {
        self.prices.get(currency).copied()
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.prices.contains_key(currency)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Reduces observations to the most recent price per currency.
///
/// An observation replaces the stored one only when its date is strictly
/// later, so on equal dates the first one seen is kept.
pub fn normalize<I>(observations: I) -> PriceSnapshot
where
    I: IntoIterator<Item = PriceObservation>,
{
    let mut latest: BTreeMap<String, (DateTime<Utc>, f64)> = BTreeMap::new();
    let mut seen = 0usize;

    for obs in observations {
        seen += 1;
        match latest.entry(obs.currency) {
            Entry::Vacant(slot) => {
                slot.insert((obs.date, obs.price));
            }
            Entry::Occupied(mut slot) => {
                if obs.date > slot.get().0 {
                    slot.insert((obs.date, obs.price));
                }
            }
        }
    }

    debug!(
        observations = seen,
        currencies = latest.len(),
        "Normalized price observations"
    );

    PriceSnapshot {
        prices: latest
            .into_iter()
            .map(|(currency, (_, price))| (currency, price))
            .collect(),
    }
}

#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch_observations(&self) -> Result<Vec<PriceObservation>>;
}

/// Fetches a fresh batch from the feed and normalizes it.
pub async fn load_snapshot(feed: &(dyn PriceFeed + Send + Sync)) -> Result<PriceSnapshot> {
    let observations = feed
        .fetch_observations()
        .await
        .context("Failed to fetch price observations")?;
    Ok(normalize(observations))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(currency: &str, date: &str, price: f64) -> PriceObservation {
        PriceObservation::new(currency, parse_observation_date(date).unwrap(), price)
    }

    #[test]
    fn test_normalize_empty() {
        let snapshot = normalize(Vec::new());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_normalize_later_date_wins() {
        let snapshot = normalize(vec![
            obs("ETH", "2024-01-01", 100.0),
            obs("ETH", "2024-01-02", 110.0),
        ]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("ETH"), Some(110.0));
    }

    #[test]
    fn test_normalize_later_date_wins_regardless_of_position() {
        let snapshot = normalize(vec![
            obs("ETH", "2024-01-02", 110.0),
            obs("ETH", "2024-01-01", 100.0),
        ]);
        assert_eq!(snapshot.get("ETH"), Some(110.0));
    }

    #[test]
    fn test_normalize_equal_dates_keep_first_seen() {
        let snapshot = normalize(vec![
            obs("USDC", "2023-08-29T07:10:40.000Z", 0.98),
            obs("USDC", "2023-08-29T07:10:40.000Z", 1.02),
        ]);
        assert_eq!(snapshot.get("USDC"), Some(0.98));
    }

    #[test]
    fn test_normalize_one_price_per_currency() {
        let snapshot = normalize(vec![
            obs("ETH", "2024-01-01", 100.0),
            obs("USDC", "2024-01-01", 1.0),
            obs("ETH", "2024-01-03", 120.0),
            obs("BLUR", "2024-01-02", 0.2),
            obs("USDC", "2023-12-31", 0.9),
        ]);
        let currencies: Vec<&str> = snapshot.currencies().collect();
        assert_eq!(currencies, vec!["BLUR", "ETH", "USDC"]);
        assert_eq!(snapshot.get("ETH"), Some(120.0));
        assert_eq!(snapshot.get("USDC"), Some(1.0));
        assert_eq!(snapshot.get("BLUR"), Some(0.2));
    }

    #[test]
    fn test_parse_observation_date_formats() {
        let rfc = parse_observation_date("2023-08-29T07:10:40.000Z").unwrap();
        let naive = parse_observation_date("2023-08-29T07:10:40").unwrap();
        assert_eq!(rfc, naive);

        let offset = parse_observation_date("2023-08-29T09:10:40+02:00").unwrap();
        assert_eq!(rfc, offset);

        let day = parse_observation_date("2024-01-01").unwrap();
        assert_eq!(day.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_parse_observation_date_invalid() {
        let result = parse_observation_date("yesterday");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("yesterday"));
    }
}
