//! Offer pricing
//!
//! `estimator` holds the pure estimate formula; `price_table` resolves an
//! optional remote base price with a fixed fallback.

pub mod estimator;
pub mod price_table;

pub use estimator::{estimate, estimate_from_base, DeviceAttributes};
pub use price_table::{BaseSource, HttpPriceTable, PriceQuoter, PriceTable, PriceTableFetcher, Quote};
