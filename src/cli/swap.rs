use super::ui;
use crate::core::{PriceFeed, SwapForm, SwapReceipt, load_snapshot};
use anyhow::Result;
use std::time::Duration;
use tracing::debug;

/// Builds a form with fresh prices and the requested selection applied.
///
/// A failed price fetch is logged and leaves the form without prices.
pub async fn prepare_form(
    feed: &(dyn PriceFeed + Send + Sync),
    from: &str,
    to: &str,
    amount: &str,
) -> SwapForm {
    let mut form = SwapForm::new(from, to);

    let pb = ui::new_spinner("Fetching prices...");
    let loaded = load_snapshot(feed).await;
    pb.finish_and_clear();

    match loaded {
        Ok(snapshot) => form.prices_loaded(snapshot),
        Err(e) => form.prices_failed(&e),
    }
    form.set_amount(amount);
    debug!(
        currencies = form.prices().len(),
        from,
        to,
        output = %form.output(),
        "Form prepared"
    );
    form
}

pub async fn run(form: &mut SwapForm, delay: Duration) -> Result<SwapReceipt> {
    let pb = ui::new_spinner("Swapping…");
    let result = form.swap(delay).await;
    pb.finish_and_clear();

    let receipt = match result {
        Ok(receipt) => receipt,
        Err(e) => {
            eprintln!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            return Err(e.into());
        }
    };
    println!(
        "{}",
        ui::style_text(&receipt.message(), ui::StyleType::Success)
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PriceObservation, SwapError};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    struct StaticFeed(Vec<PriceObservation>);

    #[async_trait]
    impl PriceFeed for StaticFeed {
        async fn fetch_observations(&self) -> Result<Vec<PriceObservation>> {
            Ok(self.0.clone())
        }
    }

    struct FailingFeed;

    #[async_trait]
    impl PriceFeed for FailingFeed {
        async fn fetch_observations(&self) -> Result<Vec<PriceObservation>> {
            anyhow::bail!("connection refused")
        }
    }

    fn static_feed() -> StaticFeed {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        StaticFeed(vec![
            PriceObservation::new("ETH", date, 2000.0),
            PriceObservation::new("USDC", date, 1.0),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn test_swap_end_to_end() {
        let feed = static_feed();
        let mut form = prepare_form(&feed, "ETH", "USDC", "1").await;

        let receipt = run(&mut form, Duration::from_millis(1500)).await.unwrap();

        assert!(receipt.message().contains("2000.000000"));
        assert!(!form.is_busy());
    }

    #[tokio::test]
    async fn test_swap_rejects_same_currency() {
        let feed = static_feed();
        let mut form = prepare_form(&feed, "ETH", "ETH", "1").await;

        let err = run(&mut form, Duration::ZERO).await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<SwapError>(),
            Some(&SwapError::SameCurrency)
        );
    }

    #[tokio::test]
    async fn test_prepare_form_survives_fetch_failure() {
        let form = prepare_form(&FailingFeed, "ETH", "USDC", "1").await;

        assert!(form.prices().is_empty());
        assert!(form.currencies().is_empty());
        assert_eq!(form.output().to_string(), "0");
    }
}
