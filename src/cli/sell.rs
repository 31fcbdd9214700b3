//! Sell wizard CLI commands
//!
//! Every invocation restores the wizard from the progress store, performs
//! one action and leaves the result persisted for the next invocation.

use clap::{Subcommand, ValueEnum};
use serde::Serialize;

use crate::audit::AuditLogger;
use crate::config::{BuybackPaths, Settings};
use crate::display::{format_money, format_progress, format_quote, format_review};
use crate::error::{BuybackError, BuybackResult};
use crate::models::{SectionName, SectionPatch, SectionedFormData};
use crate::pricing::PriceQuoter;
use crate::sink;
use crate::steps::{self, price_review, StepContext};
use crate::storage::FileStore;
use crate::wizard::{Step, WizardController};

/// Output format for `sell status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Sell wizard subcommands
#[derive(Subcommand)]
pub enum SellCommands {
    /// Show progress and the fields entered for the current step
    Status {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Move to the next step without completing the current one
    Next,
    /// Go back one step
    Back,
    /// Save draft values into a section without validating or advancing
    Set {
        /// Section name (device-selection, device-details, delivery, identity, price)
        section: String,
        /// Values as key=value (lists are comma-separated)
        #[arg(value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Complete the current step with the given values and advance
    Complete {
        /// Values as key=value (lists are comma-separated)
        #[arg(value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Show the offer for the device entered so far
    Quote,
    /// Submit the sell request (review step only)
    Submit,
    /// Discard all progress
    Reset,
}

/// Parse a `key=value` argument
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

fn build_patch(section: SectionName, fields: &[(String, String)]) -> BuybackResult<SectionPatch> {
    SectionPatch::from_fields(section, fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView<'a> {
    current_step: usize,
    step: Step,
    sell_form_data: &'a SectionedFormData,
}

/// Handle a sell command
pub fn handle_sell_command(
    paths: &BuybackPaths,
    settings: &Settings,
    cmd: SellCommands,
) -> BuybackResult<()> {
    let audit = settings
        .audit_enabled
        .then(|| AuditLogger::new(paths.audit_log()));
    let store = FileStore::new(paths.progress_file());
    let mut wizard = WizardController::restore_with_audit(store, audit);

    let ctx = || StepContext::new(PriceQuoter::from_settings(&settings.pricing));

    match cmd {
        SellCommands::Status { format } => {
            let state = wizard.state();
            let view = StatusView {
                current_step: state.current_step.index(),
                step: state.current_step,
                sell_form_data: &state.payload,
            };

            match format {
                OutputFormat::Text => {
                    print!("{}", format_progress(state));
                    println!();
                    match state.current_step.section() {
                        Some(section) if !state.payload.is_section_empty(section) => {
                            let json = serde_json::to_string_pretty(&state.payload.section_json(section))?;
                            println!("Entered so far ({}):", section);
                            println!("{}", json);
                        }
                        Some(section) => println!("Nothing entered for {} yet.", section),
                        None => print!("{}", format_review(&state.payload, &settings.currency_symbol)),
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                OutputFormat::Yaml => print!(
                    "{}",
                    serde_yaml::to_string(&view)
                        .map_err(|e| BuybackError::Json(format!("Failed to render YAML: {}", e)))?
                ),
            }
        }

        SellCommands::Next => {
            if wizard.advance()? {
                println!("Moved to: {}", wizard.current_step());
            } else {
                println!("Already at the last step: {}", wizard.current_step());
            }
        }

        SellCommands::Back => {
            let step = steps::back(&mut wizard)?;
            println!("Moved back to: {}", step);
        }

        SellCommands::Set { section, fields } => {
            let section = SectionName::parse(&section).ok_or_else(|| {
                BuybackError::Validation(format!(
                    "Unknown section: '{}'. Valid sections: {}",
                    section,
                    SectionName::ALL.map(|s| s.as_str()).join(", ")
                ))
            })?;
            if fields.is_empty() {
                return Err(BuybackError::Validation("No fields given".into()));
            }

            wizard.update_section(build_patch(section, &fields)?)?;
            println!("Saved {} field(s) to {}", fields.len(), section);
        }

        SellCommands::Complete { fields } => {
            let step = wizard.current_step();
            let section = step.section().ok_or_else(|| BuybackError::InvalidStep {
                step: step.title().to_string(),
                reason: "use 'sell submit' to finish".into(),
            })?;

            let ctx = ctx();
            let next = steps::complete(&mut wizard, build_patch(section, &fields)?, &ctx)?;

            if section == SectionName::Price {
                if let Some(price) = wizard.payload().price.estimated_price {
                    println!(
                        "Offer accepted: {} (pending review)",
                        format_money(price, &settings.currency_symbol)
                    );
                }
            } else {
                println!("{} complete.", step);
            }
            println!("Now at step {} of {}: {}", next.index() + 1, Step::COUNT, next);
        }

        SellCommands::Quote => {
            let quote = price_review::offer(wizard.payload(), &ctx())?;
            print!("{}", format_quote(&quote, &settings.currency_symbol));
        }

        SellCommands::Submit => {
            let step = wizard.current_step();
            if step != Step::Review {
                return Err(BuybackError::InvalidStep {
                    step: step.title().to_string(),
                    reason: "submitting is only possible from the review step".into(),
                });
            }
            steps::validate_all(wizard.payload(), &ctx())?;

            let mut sink = sink::from_settings(settings, paths)?;
            let id = wizard.submit(&mut sink)?;
            println!("Submitted sell request {}", id);
            println!("Your offer is pending review.");
        }

        SellCommands::Reset => {
            wizard.reset()?;
            println!("Progress cleared. Back at: {}", wizard.current_step());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("brand=Apple").unwrap(),
            ("brand".to_string(), "Apple".to_string())
        );
        assert_eq!(
            parse_assignment("address=12 Mall Rd, a=b").unwrap(),
            ("address".to_string(), "12 Mall Rd, a=b".to_string())
        );
        assert_eq!(parse_assignment("defects=").unwrap().1, "");
        assert!(parse_assignment("brand").is_err());
        assert!(parse_assignment("=Apple").is_err());
    }
}
