use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use property_calc_core::area::conversion::{self, AreaConversionInput, AreaUnit};

use crate::input;

/// Arguments for area unit conversion
#[derive(Args)]
pub struct AreaArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Area to convert
    #[arg(long)]
    pub value: Option<Decimal>,

    /// Source unit (sqm, sqft, sqyd, acre, hectare, cent, bigha)
    #[arg(long)]
    pub from: Option<AreaUnit>,

    /// Target unit
    #[arg(long)]
    pub to: Option<AreaUnit>,

    /// Print the value in every other unit instead of the summary
    #[arg(long)]
    pub all_units: bool,
}

impl AreaArgs {
    fn flags_complete(&self) -> bool {
        self.value.is_some() && self.from.is_some() && self.to.is_some()
    }
}

pub fn run_area(args: AreaArgs, decimals: u32) -> Result<Value, Box<dyn std::error::Error>> {
    let piped = input::read_input(args.input.as_deref(), args.flags_complete())?;
    let area_input: AreaConversionInput = match piped {
        Some(parsed) => parsed,
        None => AreaConversionInput {
            value: args.value.ok_or("--value is required (or provide --input)")?,
            from: args.from.ok_or("--from is required (or provide --input)")?,
            to: args.to.ok_or("--to is required (or provide --input)")?,
        },
    };

    let mut output = conversion::conversion_table(&area_input)?;
    // Areas get extra places: a cent in hectares is 0.004
    let dp = decimals.saturating_add(4);
    output.result.converted = output.result.converted.round_dp(dp).normalize();
    for eq in &mut output.result.equivalents {
        eq.value = eq.value.round_dp(dp).normalize();
    }

    if args.all_units {
        return Ok(serde_json::to_value(&output.result.equivalents)?);
    }
    let mut value = serde_json::to_value(&output)?;
    crate::commands::strip_result_keys(&mut value, &["equivalents"]);
    Ok(value)
}
