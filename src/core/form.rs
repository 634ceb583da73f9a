//! State and transitions of the swap form
//!
//! The output amount is recomputed by every transition that changes one of
//! its inputs: the snapshot, either selection, or the amount.

use crate::core::convert::{ConversionResult, convert, parse_amount};
use crate::core::price::PriceSnapshot;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("Amount must be greater than 0")]
    InvalidAmount,
    #[error("Cannot swap the same currency")]
    SameCurrency,
    #[error("A swap is already in progress")]
    InProgress,
}

/// Form state captured when a swap starts, including the quoted output.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapTicket {
    pub amount: String,
    pub from: String,
    pub to: String,
    pub output: ConversionResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwapReceipt {
    pub amount: String,
    pub from: String,
    pub to: String,
    pub output: ConversionResult,
}

impl SwapReceipt {
    pub fn message(&self) -> String {
        format!(
            "Swapped {} {} → {} {}",
            self.amount, self.from, self.output, self.to
        )
    }
}

#[derive(Debug, Clone)]
pub struct SwapForm {
    prices: PriceSnapshot,
    from: String,
    to: String,
    amount: String,
    output: ConversionResult,
    busy: bool,
    error: Option<SwapError>,
}

impl SwapForm {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            prices: PriceSnapshot::new(),
            from: from.to_string(),
            to: to.to_string(),
            amount: String::new(),
            output: ConversionResult::Unavailable,
            busy: false,
            error: None,
        }
    }

    fn recompute(&mut self) {
        self.output = convert(&self.prices, &self.from, &self.to, &self.amount);
    }

    pub fn prices_loaded(&mut self, snapshot: PriceSnapshot) {
        debug!(currencies = snapshot.len(), "Price snapshot replaced");
        self.prices = snapshot;
        self.recompute();
    }

    /// A failed fetch leaves the current snapshot in place.
    pub fn prices_failed(&mut self, err: &anyhow::Error) {
        warn!(error = %err, "Price fetch failed, keeping previous prices");
    }

    pub fn select_from(&mut self, currency: &str) {
        self.from = currency.to_string();
        self.recompute();
    }

    pub fn select_to(&mut self, currency: &str) {
        self.to = currency.to_string();
        self.recompute();
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.to_string();
        self.recompute();
    }

    pub fn prices(&self) -> &PriceSnapshot {
        &self.prices
    }

    pub fn currencies(&self) -> Vec<&str> {
        self.prices.currencies().collect()
    }

    pub fn from_currency(&self) -> &str {
        &self.from
    }

    pub fn to_currency(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn output(&self) -> ConversionResult {
        self.output
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&SwapError> {
        self.error.as_ref()
    }

    /// Checks the swap preconditions, amount first.
    pub fn validate(&self) -> Result<(), SwapError> {
        match parse_amount(&self.amount) {
            Some(v) if v > 0.0 => {}
            _ => return Err(SwapError::InvalidAmount),
        }
        if self.from == self.to {
            return Err(SwapError::SameCurrency);
        }
        Ok(())
    }

    pub fn begin_swap(&mut self) -> Result<SwapTicket, SwapError> {
        if self.busy {
            return Err(SwapError::InProgress);
        }
        if let Err(e) = self.validate() {
            self.error = Some(e.clone());
            return Err(e);
        }

        self.error = None;
        self.busy = true;
        Ok(SwapTicket {
            amount: self.amount.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            output: self.output,
        })
    }

    /// Edits made while busy do not affect the receipt.
    pub fn finish_swap(&mut self, ticket: SwapTicket) -> SwapReceipt {
        self.busy = false;
        SwapReceipt {
            amount: ticket.amount,
            from: ticket.from,
            to: ticket.to,
            output: ticket.output,
        }
    }

    /// Runs a simulated swap, holding the form busy for `delay`.
    pub async fn swap(&mut self, delay: Duration) -> Result<SwapReceipt, SwapError> {
        let ticket = self.begin_swap()?;
        debug!(?ticket, ?delay, "Swap started");
        tokio::time::sleep(delay).await;
        let receipt = self.finish_swap(ticket);
        debug!(output = %receipt.output, "Swap finished");
        Ok(receipt)
    }
}
