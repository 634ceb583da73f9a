//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod form;
pub mod icon;
pub mod log;
pub mod price;

// Re-export main types for cleaner imports
pub use convert::{ConversionResult, convert};
pub use form::{SwapError, SwapForm, SwapReceipt};
pub use icon::IconResolver;
pub use price::{PriceFeed, PriceObservation, PriceSnapshot, load_snapshot, normalize};
