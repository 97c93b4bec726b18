use crate::core::timeutil::round2;
use crate::domain::model::PricingType;
use crate::utils::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeBreakdown {
    pub amount_charged: f64,
    pub client_hourly_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payout {
    pub cleaner_pay: f64,
    pub profit: f64,
}

/// Derives the complementary rate from whichever pricing field the client
/// carries. Flat-rate clients get an effective hourly rate; hourly clients
/// get a per-visit amount. Derived values are rounded to cents.
pub fn charge_and_rate(
    pricing_type: PricingType,
    duration_hours: f64,
    charge_per_cleaning: Option<f64>,
    hourly_rate: Option<f64>,
) -> Result<ChargeBreakdown> {
    match pricing_type {
        PricingType::PerCleaning => {
            let charge = charge_per_cleaning.ok_or_else(|| EngineError::MissingConfigError {
                field: "charge_per_cleaning".to_string(),
            })?;
            if duration_hours <= 0.0 {
                return Err(EngineError::ProcessingError {
                    message: format!(
                        "cannot derive an hourly rate from a {}h cleaning; supply a positive duration",
                        duration_hours
                    ),
                });
            }
            Ok(ChargeBreakdown {
                amount_charged: charge,
                client_hourly_rate: round2(charge / duration_hours),
            })
        }
        PricingType::Hourly => {
            let rate = hourly_rate.ok_or_else(|| EngineError::MissingConfigError {
                field: "hourly_rate".to_string(),
            })?;
            Ok(ChargeBreakdown {
                amount_charged: round2(rate * duration_hours),
                client_hourly_rate: rate,
            })
        }
    }
}

/// Negative profit is a legitimate outcome (underpriced job), not an error.
pub fn payout_and_profit(amount_charged: f64, cleaner_hourly_rate: f64, duration_hours: f64) -> Payout {
    let cleaner_pay = cleaner_hourly_rate * duration_hours;
    Payout {
        cleaner_pay,
        profit: amount_charged - cleaner_pay,
    }
}
