use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use property_calc_core::emi::calculator;
use property_calc_core::emi::installment::LoanParameters;

use crate::commands::strip_result_keys;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EmiView {
    /// Installment and totals
    Summary,
    /// One row per loan year
    Yearly,
    /// One row per monthly period
    Schedule,
    /// Everything, in the output envelope
    Full,
}

/// Arguments for the EMI calculator
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 7.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "summary")]
    pub view: EmiView,
}

impl EmiArgs {
    fn flags_complete(&self) -> bool {
        self.principal.is_some() && self.rate.is_some() && self.tenure.is_some()
    }
}

pub fn run_emi(args: EmiArgs, decimals: u32) -> Result<Value, Box<dyn std::error::Error>> {
    let piped = input::read_input(args.input.as_deref(), args.flags_complete())?;
    let params: LoanParameters = match piped {
        Some(params) => params,
        None => LoanParameters {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args.tenure.ok_or("--tenure is required (or provide --input)")?,
            start_date: args.start_date,
        },
    };

    let mut output = calculator::calculate_emi(&params)?;
    output.result = output.result.rounded(decimals);

    match args.view {
        EmiView::Yearly => Ok(serde_json::to_value(&output.result.yearly)?),
        EmiView::Schedule => Ok(serde_json::to_value(&output.result.schedule.periods)?),
        EmiView::Full => Ok(serde_json::to_value(&output)?),
        EmiView::Summary => {
            let mut value = serde_json::to_value(&output)?;
            strip_result_keys(&mut value, &["yearly", "schedule"]);
            Ok(value)
        }
    }
}
