//! Conversion between two currencies through their spot prices

use crate::core::price::PriceSnapshot;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;

/// Outcome of a conversion.
///
/// `Unavailable` displays as `"0"`, an amount always with 6 fixed decimals,
/// ties rounded away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ConversionResult {
    #[default]
    Unavailable,
    Amount(f64),
}

impl ConversionResult {
    pub fn amount(&self) -> Option<f64> {
        match self {
            ConversionResult::Unavailable => None,
            ConversionResult::Amount(v) => Some(*v),
        }
    }
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionResult::Unavailable => write!(f, "0"),
            ConversionResult::Amount(v) => match Decimal::from_f64_retain(*v) {
                Some(d) => {
                    let rounded =
                        d.round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero);
                    write!(f, "{rounded:.6}")
                }
                // Outside Decimal's range
                None => write!(f, "{v:.6}"),
            },
        }
    }
}

/// Parses a user-entered amount. Empty, non-numeric and non-finite input
/// yields `None`.
pub fn parse_amount(amount: &str) -> Option<f64> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A price usable as a conversion leg: present and non-zero.
fn usable_price(snapshot: &PriceSnapshot, currency: &str) -> Option<f64> {
    // Zero is treated like a missing price.
    snapshot.get(currency).filter(|p| *p != 0.0)
}

/// Converts `amount` of `from` into `to` using the snapshot prices.
pub fn convert(snapshot: &PriceSnapshot, from: &str, to: &str, amount: &str) -> ConversionResult {
    let Some(value) = parse_amount(amount) else {
        return ConversionResult::Unavailable;
    };
    let (Some(from_price), Some(to_price)) =
        (usable_price(snapshot, from), usable_price(snapshot, to))
    else {
        return ConversionResult::Unavailable;
    };

    ConversionResult::Amount(value * from_price / to_price)
}
