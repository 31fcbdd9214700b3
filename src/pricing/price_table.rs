//! Remote base price table
//!
//! An optional brand -> model -> base price table fetched over HTTP. When a
//! table is configured but cannot be fetched, quoting falls back to a fixed
//! base price so the wizard is never blocked.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::estimator::{base_price, estimate_from_base, DeviceAttributes};
use crate::config::PricingSettings;
use crate::error::{BuybackError, BuybackResult};

/// Base prices keyed by brand, then model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable(BTreeMap<String, BTreeMap<String, i64>>);

impl PriceTable {
    pub fn new(entries: BTreeMap<String, BTreeMap<String, i64>>) -> Self {
        Self(entries)
    }

    /// Case-insensitive lookup of a brand/model pair
    pub fn lookup(&self, brand: &str, model: &str) -> Option<i64> {
        let brand = brand.trim();
        let model = model.trim();

        self.0
            .iter()
            .find(|(b, _)| b.eq_ignore_ascii_case(brand))
            .and_then(|(_, models)| {
                models
                    .iter()
                    .find(|(m, _)| m.eq_ignore_ascii_case(model))
                    .map(|(_, price)| *price)
            })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Source of a price table
pub trait PriceTableFetcher {
    fn fetch(&self) -> BuybackResult<PriceTable>;
}

/// Fetches the table with a blocking GET
#[derive(Debug, Clone)]
pub struct HttpPriceTable {
    url: String,
    timeout: Duration,
}

impl HttpPriceTable {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl PriceTableFetcher for HttpPriceTable {
    fn fetch(&self) -> BuybackResult<PriceTable> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();

        let response = agent
            .get(&self.url)
            .set("accept", "application/json")
            .call()
            .map_err(|e| BuybackError::PriceLookup(format!("GET {} failed: {}", self.url, e)))?;

        response.into_json::<PriceTable>().map_err(|e| {
            BuybackError::PriceLookup(format!("Invalid price table from {}: {}", self.url, e))
        })
    }
}

/// Where a quote's base price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSource {
    /// Built-in device-type base
    DeviceType,
    /// Brand/model entry in the remote table
    PriceTable,
    /// Remote table unavailable
    Fallback,
}

impl fmt::Display for BaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceType => write!(f, "device type"),
            Self::PriceTable => write!(f, "price table"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A computed offer together with how its base was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub base: i64,
    pub source: BaseSource,
    pub price: i64,
    /// Lookup error when the fallback was used
    pub warning: Option<String>,
}

/// Resolves a base price and runs the estimator
pub struct PriceQuoter {
    fetcher: Option<Box<dyn PriceTableFetcher>>,
    fallback_base_price: i64,
}

impl PriceQuoter {
    /// Quoter that only uses the device-type bases
    pub fn offline() -> Self {
        Self {
            fetcher: None,
            fallback_base_price: PricingSettings::default().fallback_base_price,
        }
    }

    pub fn with_fetcher(fetcher: Box<dyn PriceTableFetcher>, fallback_base_price: i64) -> Self {
        Self {
            fetcher: Some(fetcher),
            fallback_base_price,
        }
    }

    pub fn from_settings(settings: &PricingSettings) -> Self {
        match settings.price_table_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Self::with_fetcher(
                Box::new(HttpPriceTable::new(url, Duration::from_secs(settings.timeout_secs))),
                settings.fallback_base_price,
            ),
            _ => Self {
                fetcher: None,
                fallback_base_price: settings.fallback_base_price,
            },
        }
    }

    fn resolve_base(&self, attributes: &DeviceAttributes) -> (i64, BaseSource, Option<String>) {
        let type_base = (base_price(attributes.device_type), BaseSource::DeviceType, None);

        let Some(fetcher) = &self.fetcher else {
            return type_base;
        };

        match fetcher.fetch() {
            Ok(table) => {
                let hit = match (&attributes.brand, &attributes.model) {
                    (Some(brand), Some(model)) => table.lookup(brand, model),
                    _ => None,
                };
                match hit {
                    Some(base) => (base, BaseSource::PriceTable, None),
                    None => type_base,
                }
            }
            Err(e) => (self.fallback_base_price, BaseSource::Fallback, Some(e.to_string())),
        }
    }

    pub fn quote(&self, attributes: &DeviceAttributes, current_year: i32) -> Quote {
        let (base, source, warning) = self.resolve_base(attributes);
        Quote {
            base,
            source,
            price: estimate_from_base(attributes, base, current_year),
            warning,
        }
    }
}
