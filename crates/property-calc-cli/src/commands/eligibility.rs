use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use property_calc_core::eligibility::affordability::AffordabilityRequest;
use property_calc_core::eligibility::calculator::{self, AffordabilityInput, EligibilityInput};
use property_calc_core::eligibility::loan_limit::EligibilityRequest;

use crate::commands::strip_result_keys;
use crate::input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoanLimitView {
    /// Loan size, installment and ratios
    Summary,
    /// Loan size at each sweep rate
    Sensitivity,
    /// Monthly schedule of the eligible loan
    Schedule,
    /// Everything, in the output envelope
    Full,
}

/// Income-side flags shared by eligibility and affordability
#[derive(Args)]
pub struct IncomeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Net monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Installments already being paid each month
    #[arg(long, default_value = "0")]
    pub obligations: Decimal,

    /// Share of income available for installments (default 0.6)
    #[arg(long)]
    pub ceiling: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.8)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Rates for the sensitivity sweep (comma-separated, e.g. "7,8.5,10")
    #[arg(long, value_delimiter = ',')]
    pub sweep: Option<Vec<Decimal>>,

    #[arg(long, value_enum, default_value = "summary")]
    pub view: LoanLimitView,
}

impl IncomeArgs {
    fn request(&self) -> Result<EligibilityRequest, Box<dyn std::error::Error>> {
        let mut request = EligibilityRequest::new(
            self.income.ok_or("--income is required (or provide --input)")?,
            self.obligations,
        );
        if let Some(ceiling) = self.ceiling {
            request.income_utilization_ceiling = ceiling;
        }
        Ok(request)
    }

    fn flags_complete(&self) -> bool {
        self.income.is_some() && self.rate.is_some() && self.tenure.is_some()
    }

    fn terms(&self) -> Result<(Decimal, u32), Box<dyn std::error::Error>> {
        Ok((
            self.rate.ok_or("--rate is required (or provide --input)")?,
            self.tenure.ok_or("--tenure is required (or provide --input)")?,
        ))
    }
}

/// Arguments for the affordability calculator
#[derive(Args)]
pub struct AffordabilityArgs {
    #[command(flatten)]
    pub income: IncomeArgs,

    /// Cash paid upfront towards the property
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,
}

pub fn run_eligibility(
    args: IncomeArgs,
    decimals: u32,
) -> Result<Value, Box<dyn std::error::Error>> {
    let piped = input::read_input(args.input.as_deref(), args.flags_complete())?;
    let mut elig_input: EligibilityInput = match piped {
        Some(parsed) => parsed,
        None => {
            let (rate, tenure) = args.terms()?;
            EligibilityInput {
                request: args.request()?,
                annual_interest_rate_pct: rate,
                tenure_years: tenure,
                include_schedule: false,
                sensitivity_rates: args.sweep.clone(),
            }
        }
    };
    elig_input.include_schedule |= args.view == LoanLimitView::Schedule;

    let mut output = calculator::calculate_eligibility(&elig_input)?;
    output.result = output.result.rounded(decimals);

    match args.view {
        LoanLimitView::Sensitivity => Ok(serde_json::to_value(&output.result.rate_sensitivity)?),
        LoanLimitView::Schedule => {
            let periods = output.result.schedule.map(|s| s.periods).unwrap_or_default();
            Ok(serde_json::to_value(periods)?)
        }
        LoanLimitView::Full => Ok(serde_json::to_value(&output)?),
        LoanLimitView::Summary => {
            let mut value = serde_json::to_value(&output)?;
            strip_result_keys(&mut value, &["rate_sensitivity", "schedule"]);
            Ok(value)
        }
    }
}

pub fn run_affordability(
    args: AffordabilityArgs,
    decimals: u32,
) -> Result<Value, Box<dyn std::error::Error>> {
    let view = args.income.view;
    let piped = input::read_input(args.income.input.as_deref(), args.income.flags_complete())?;
    let mut afford_input: AffordabilityInput = match piped {
        Some(parsed) => parsed,
        None => {
            let (rate, tenure) = args.income.terms()?;
            AffordabilityInput {
                request: AffordabilityRequest::new(args.income.request()?, args.down_payment),
                annual_interest_rate_pct: rate,
                tenure_years: tenure,
                include_schedule: false,
                sensitivity_rates: args.income.sweep.clone(),
            }
        }
    };
    afford_input.include_schedule |= view == LoanLimitView::Schedule;

    let mut output = calculator::calculate_affordability(&afford_input)?;
    output.result = output.result.rounded(decimals);

    match view {
        LoanLimitView::Sensitivity => Ok(serde_json::to_value(&output.result.rate_sensitivity)?),
        LoanLimitView::Schedule => {
            let periods = output.result.schedule.map(|s| s.periods).unwrap_or_default();
            Ok(serde_json::to_value(periods)?)
        }
        LoanLimitView::Full => Ok(serde_json::to_value(&output)?),
        LoanLimitView::Summary => {
            let mut value = serde_json::to_value(&output)?;
            strip_result_keys(&mut value, &["rate_sensitivity", "schedule"]);
            Ok(value)
        }
    }
}
