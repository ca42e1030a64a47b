mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;

use commands::area::AreaArgs;
use commands::eligibility::{AffordabilityArgs, IncomeArgs};
use commands::emi::EmiArgs;

/// Home-loan and property calculators
#[derive(Parser)]
#[command(
    name = "propcalc",
    version,
    about = "Home-loan EMI, eligibility, affordability and area calculators",
    long_about = "A CLI for home-loan calculations with decimal precision. Computes \
                  equated monthly installments and amortisation schedules, the largest \
                  loan an income supports, the property value that loan plus a down \
                  payment buys, and conversions between land-area units."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Decimal places for money in the output (0 to 28)
    #[arg(
        long,
        default_value_t = 2,
        global = true,
        value_parser = clap::value_parser!(u32).range(0..=28)
    )]
    decimals: u32,

    /// Log filter when RUST_LOG is unset (e.g. "debug")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Equated monthly installment and amortisation schedule
    Emi(EmiArgs),
    /// Maximum loan supported by an income
    Eligibility(IncomeArgs),
    /// Property value affordable with the eligible loan plus a down payment
    Affordability(AffordabilityArgs),
    /// Convert an area between units
    Area(AreaArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(2);
    }

    let decimals = cli.decimals;
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::emi::run_emi(args, decimals),
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args, decimals),
        Commands::Affordability(args) => commands::eligibility::run_affordability(args, decimals),
        Commands::Area(args) => commands::area::run_area(args, decimals),
        Commands::Version => {
            println!("propcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!(format = ?cli.output, "writing output");
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimals_bounded() {
        let cli = Cli::try_parse_from(["propcalc", "--decimals", "28", "version"]).unwrap();
        assert_eq!(cli.decimals, 28);
        assert!(Cli::try_parse_from(["propcalc", "--decimals", "4294967295", "version"]).is_err());
    }
}
