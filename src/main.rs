//! csi-profitability: projects service and repeat-purchase profit for a
//! cohort of vehicle buyers.
//!
//! Usage:
//!   csi-profitability --csi 870 --customers 100 --end-year 2040
//!   csi-profitability --config scenario.json --output results.csv
//!   csi-profitability --csi 950 --no-export

use anyhow::{Context, Result};
use csi_profitability::error::{SimError, SimResult};
use csi_profitability::io::reporting::{self, DEFAULT_EXPORT_FILE};
use csi_profitability::model::csi::csi_rates;
use csi_profitability::simulation::config::SimulationConfig;
use csi_profitability::simulation::engine::simulate;
use std::env;
use std::str::FromStr;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // 1. SETUP CONFIGURATION
    // Defaults, then an optional JSON file, then individual flags.
    let config = build_config(&args)?;
    config.validate()?;

    let output = flag_value(&args, "--output")?.unwrap_or(DEFAULT_EXPORT_FILE);
    let export = !args.iter().any(|a| a == "--no-export");

    let rates = csi_rates(config.csi_score);
    println!("=== CSI Profitability Simulator ===");
    println!("  csi score:        {}", config.csi_score);
    println!(
        "  rates:            service {:.0}%, repeat {:.0}%",
        rates.service_return_rate * 100.0,
        rates.repeat_purchase_rate * 100.0
    );
    println!("  initial buyers:   {}", config.initial_customers);
    println!("  ownership/warr.:  {} / {} years", config.ownership_years, config.warranty_years);
    println!("  years:            {}..={}", config.start_year, config.end_year);
    println!();

    // 2. RUN SIMULATION
    let table = simulate(&config);

    // 3. PRINT RESULTS
    print!("{}", reporting::render_table(&table));

    // 4. EXPORT RESULTS
    if export {
        reporting::export_csv(output, &table)
            .with_context(|| format!("writing results to '{output}'"))?;
        println!("\nResults written to ./{output}");
    }

    Ok(())
}

fn build_config(args: &[String]) -> SimResult<SimulationConfig> {
    let mut config = match flag_value(args, "--config")? {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };

    override_flag(args, "--csi", &mut config.csi_score)?;
    override_flag(args, "--customers", &mut config.initial_customers)?;
    override_flag(args, "--service-profit", &mut config.service_profit_per_year)?;
    override_flag(args, "--ownership-years", &mut config.ownership_years)?;
    override_flag(args, "--warranty-years", &mut config.warranty_years)?;
    override_flag(args, "--vehicle-profit", &mut config.vehicle_sale_profit)?;
    override_flag(args, "--start-year", &mut config.start_year)?;
    override_flag(args, "--end-year", &mut config.end_year)?;

    log::debug!("Resolved config: {config:?}");
    Ok(config)
}

/// Value following `flag`. A flag given as the last argument has no value.
fn flag_value<'a>(args: &'a [String], flag: &str) -> SimResult<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(i) => match args.get(i + 1) {
            Some(value) => Ok(Some(value.as_str())),
            None => Err(SimError::InvalidFlag {
                flag: flag.to_string(),
                value: String::new(),
            }),
        },
    }
}

fn override_flag<T: FromStr>(args: &[String], flag: &str, target: &mut T) -> SimResult<()> {
    if let Some(raw) = flag_value(args, flag)? {
        *target = raw.parse().map_err(|_| SimError::InvalidFlag {
            flag: flag.to_string(),
            value: raw.to_string(),
        })?;
    }
    Ok(())
}
