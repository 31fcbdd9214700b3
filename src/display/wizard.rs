//! Wizard display formatting
//!
//! Progress overview, the final review summary and offers.

use std::fmt::Display;

use crate::models::SectionedFormData;
use crate::pricing::{BaseSource, Quote};
use crate::wizard::{Step, WizardState};

const NOT_PROVIDED: &str = "Not provided";

/// Format an amount in whole currency units
pub fn format_money(amount: i64, currency_symbol: &str) -> String {
    if amount < 0 {
        format!("-{}{}", currency_symbol, amount.unsigned_abs())
    } else {
        format!("{}{}", currency_symbol, amount)
    }
}

fn or_placeholder<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_PROVIDED.to_string())
}

fn list_or_none<T: Display>(values: &Option<Vec<T>>) -> String {
    match values {
        Some(values) if !values.is_empty() => values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        _ => "None".to_string(),
    }
}

/// Step list with the current position marked
pub fn format_progress(state: &WizardState) -> String {
    let current = state.current_step;
    let mut output = format!(
        "Step {} of {}: {}\n",
        current.index() + 1,
        Step::COUNT,
        current.title()
    );

    for step in Step::ALL {
        let marker = if step < current {
            "[x]"
        } else if step == current {
            "[>]"
        } else {
            "[ ]"
        };
        output.push_str(&format!("  {} {}\n", marker, step.title()));
    }

    output
}

/// Summary of every section, as shown before submitting
pub fn format_review(payload: &SectionedFormData, currency_symbol: &str) -> String {
    let selection = &payload.device_selection;
    let details = &payload.device_details;
    let delivery = &payload.delivery;
    let identity = &payload.identity;
    let price = &payload.price;

    let mut output = String::new();

    output.push_str("Device\n");
    output.push_str(&format!("  Type:           {}\n", or_placeholder(&selection.device_type)));
    output.push_str(&format!("  Brand:          {}\n", or_placeholder(&details.brand)));
    output.push_str(&format!("  Model:          {}\n", or_placeholder(&details.model)));
    output.push_str(&format!("  Purchase year:  {}\n", or_placeholder(&details.purchase_year)));
    output.push_str(&format!("  Condition:      {}\n", or_placeholder(&details.condition)));
    output.push_str(&format!("  Storage:        {}\n", or_placeholder(&details.storage)));
    output.push_str(&format!("  Serial number:  {}\n", or_placeholder(&details.serial_number)));
    output.push_str(&format!("  Defects:        {}\n", list_or_none(&details.defects)));
    let images = details
        .images
        .as_ref()
        .map(|paths| paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>());
    output.push_str(&format!("  Images:         {}\n", list_or_none(&images)));

    output.push_str("\nDelivery\n");
    output.push_str(&format!("  Method:         {}\n", or_placeholder(&delivery.method)));
    output.push_str(&format!("  Address:        {}\n", or_placeholder(&delivery.address)));
    output.push_str(&format!("  Preferred date: {}\n", or_placeholder(&delivery.preferred_date)));
    output.push_str(&format!("  Instructions:   {}\n", or_placeholder(&delivery.instructions)));
    output.push_str(&format!("  Tracking no.:   {}\n", or_placeholder(&delivery.tracking_number)));
    output.push_str(&format!("  Courier:        {}\n", or_placeholder(&delivery.courier_name)));

    output.push_str("\nIdentity\n");
    output.push_str(&format!("  Full name:      {}\n", or_placeholder(&identity.full_name)));
    output.push_str(&format!("  ID type:        {}\n", or_placeholder(&identity.id_type)));
    output.push_str(&format!("  ID number:      {}\n", or_placeholder(&identity.id_number)));
    output.push_str(&format!("  CNIC:           {}\n", or_placeholder(&identity.cnic)));
    output.push_str(&format!("  Email:          {}\n", or_placeholder(&identity.email)));
    output.push_str(&format!("  Phone:          {}\n", or_placeholder(&identity.phone_number)));
    output.push_str(&format!(
        "  ID image:       {}\n",
        or_placeholder(&identity.id_image.as_ref().map(|p| p.display().to_string()))
    ));
    output.push_str(&format!(
        "  Terms agreed:   {}\n",
        if identity.terms_agreed == Some(true) { "Yes" } else { "No" }
    ));

    output.push_str("\nOffer\n");
    output.push_str(&format!(
        "  Price:          {}\n",
        or_placeholder(&price.estimated_price.map(|p| format_money(p, currency_symbol)))
    ));
    output.push_str(&format!(
        "  Accepted:       {}\n",
        if price.accepted == Some(true) { "Yes" } else { "No" }
    ));
    output.push_str(&format!("  Status:         {}\n", or_placeholder(&price.status)));
    output.push_str(&format!("  Payout method:  {}\n", or_placeholder(&price.payout_method)));

    output
}

pub fn format_quote(quote: &Quote, currency_symbol: &str) -> String {
    let mut output = format!("Estimated offer: {}\n", format_money(quote.price, currency_symbol));
    output.push_str(&format!(
        "  Base price:     {} ({})\n",
        format_money(quote.base, currency_symbol),
        quote.source
    ));
    if quote.source == BaseSource::Fallback {
        if let Some(warning) = &quote.warning {
            output.push_str(&format!("  Note: price table unavailable ({})\n", warning));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SectionName, SectionPatch};

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(250, "$"), "$250");
        assert_eq!(format_money(0, "€"), "€0");
        assert_eq!(format_money(-5, "$"), "-$5");
    }

    #[test]
    fn test_progress_marks_current_step() {
        let state = WizardState {
            current_step: Step::Delivery,
            ..Default::default()
        };
        let output = format_progress(&state);

        assert!(output.starts_with("Step 3 of 6: Delivery"));
        assert!(output.contains("[x] Device details"));
        assert!(output.contains("[>] Delivery"));
        assert!(output.contains("[ ] Review & submit"));
    }

    #[test]
    fn test_review_uses_placeholders() {
        let output = format_review(&SectionedFormData::default(), "$");
        assert!(output.contains("Brand:          Not provided"));
        assert!(output.contains("Defects:        None"));
        assert!(output.contains("Terms agreed:   No"));
    }

    #[test]
    fn test_review_shows_values() {
        let mut payload = SectionedFormData::default();
        payload.apply(
            SectionPatch::from_fields(
                SectionName::DeviceDetails,
                [("brand", "Apple"), ("defects", "Scratches,Dents")],
            )
            .unwrap(),
        );

        let output = format_review(&payload, "$");
        assert!(output.contains("Brand:          Apple"));
        assert!(output.contains("Defects:        Scratches, Dents"));
    }

    #[test]
    fn test_format_quote() {
        let quote = Quote {
            base: 500,
            source: BaseSource::Fallback,
            price: 450,
            warning: Some("timed out".into()),
        };
        let output = format_quote(&quote, "$");
        assert!(output.contains("Estimated offer: $450"));
        assert!(output.contains("$500 (fallback)"));
        assert!(output.contains("timed out"));
    }
}
