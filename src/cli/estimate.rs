//! One-off estimate command

use chrono::{Datelike, Local};
use clap::Args;

use crate::config::Settings;
use crate::display::format_quote;
use crate::error::{BuybackError, BuybackResult};
use crate::models::{Condition, DeviceType, StorageCapacity};
use crate::pricing::{DeviceAttributes, PriceQuoter};
use crate::steps::device_details::check_purchase_year;

/// Arguments for `estimate`
#[derive(Args)]
pub struct EstimateArgs {
    /// Device type (smartphone, tablet, laptop, other)
    #[arg(short = 't', long = "type")]
    pub device_type: String,
    /// Condition (new, used, fair, poor, damaged)
    #[arg(short, long)]
    pub condition: String,
    /// Storage capacity (e.g. "128GB", "1TB")
    #[arg(short, long)]
    pub storage: Option<String>,
    /// Number of defects
    #[arg(short, long, default_value = "0")]
    pub defects: usize,
    /// Purchase year
    #[arg(short, long)]
    pub year: i32,
    /// Brand, for the remote price table
    #[arg(long)]
    pub brand: Option<String>,
    /// Model, for the remote price table
    #[arg(long)]
    pub model: Option<String>,
}

impl EstimateArgs {
    fn attributes(&self, current_year: i32) -> BuybackResult<DeviceAttributes> {
        check_purchase_year(self.year, current_year)?;

        let device_type = DeviceType::parse(&self.device_type).ok_or_else(|| {
            BuybackError::Validation(format!(
                "Invalid device type: '{}'. Valid types: smartphone, tablet, laptop, other",
                self.device_type
            ))
        })?;
        let condition = Condition::parse(&self.condition).ok_or_else(|| {
            BuybackError::Validation(format!(
                "Invalid condition: '{}'. Valid conditions: new, used, fair, poor, damaged",
                self.condition
            ))
        })?;
        let storage = self
            .storage
            .as_deref()
            .map(StorageCapacity::parse)
            .transpose()
            .map_err(BuybackError::Validation)?;

        Ok(DeviceAttributes {
            device_type,
            brand: self.brand.clone(),
            model: self.model.clone(),
            condition,
            storage,
            defect_count: self.defects,
            purchase_year: self.year,
        })
    }
}

pub fn handle_estimate_command(settings: &Settings, args: EstimateArgs) -> BuybackResult<()> {
    let current_year = Local::now().year();
    let attributes = args.attributes(current_year)?;
    let quote = PriceQuoter::from_settings(&settings.pricing).quote(&attributes, current_year);

    print!("{}", format_quote(&quote, &settings.currency_symbol));
    Ok(())
}
