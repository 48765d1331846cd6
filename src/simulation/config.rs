// src/simulation/config.rs

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

/// Calendar years a projection may start or end in.
pub const YEAR_WINDOW: RangeInclusive<i32> = 1900..=2200;

/// Longest projection the input surface accepts.
pub const MAX_PROJECTION_YEARS: usize = 100;

/// The eight scalar inputs of a projection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub csi_score: i32,
    pub initial_customers: u32,
    pub service_profit_per_year: f64,
    pub ownership_years: u32,
    pub warranty_years: u32,
    pub vehicle_sale_profit: f64,
    pub start_year: i32,
    pub end_year: i32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            csi_score: 870,
            initial_customers: 100,
            service_profit_per_year: 350.0,
            ownership_years: 2,
            warranty_years: 3,
            vehicle_sale_profit: 1225.0,
            start_year: 2026,
            end_year: 2040,
        }
    }
}

impl SimulationConfig {
    /// Loads a config from JSON. Fields left out keep their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Number of simulated years; zero when the range is inverted.
    pub fn year_count(&self) -> usize {
        if self.end_year < self.start_year {
            0
        } else {
            (i64::from(self.end_year) - i64::from(self.start_year) + 1) as usize
        }
    }

    /// Input-surface constraints. The simulation itself never calls this.
    ///
    /// An inverted year range is accepted: it produces an empty projection.
    /// Both years must fall in `YEAR_WINDOW` and the span may not exceed
    /// `MAX_PROJECTION_YEARS`.
    pub fn validate(&self) -> SimResult<()> {
        if !(0..=1000).contains(&self.csi_score) {
            return Err(invalid("csi_score", format!("{} is outside 0..=1000", self.csi_score)));
        }
        if self.initial_customers < 1 {
            return Err(invalid("initial_customers", "must be at least 1".into()));
        }
        if self.ownership_years < 1 {
            return Err(invalid("ownership_years", "must be at least 1".into()));
        }
        if self.warranty_years < 1 {
            return Err(invalid("warranty_years", "must be at least 1".into()));
        }
        check_profit("service_profit_per_year", self.service_profit_per_year)?;
        check_profit("vehicle_sale_profit", self.vehicle_sale_profit)?;
        check_year("start_year", self.start_year)?;
        check_year("end_year", self.end_year)?;
        if self.year_count() > MAX_PROJECTION_YEARS {
            return Err(invalid(
                "end_year",
                format!(
                    "{}..={} spans {} years, more than {MAX_PROJECTION_YEARS}",
                    self.start_year,
                    self.end_year,
                    self.year_count()
                ),
            ));
        }
        Ok(())
    }
}

fn check_profit(name: &'static str, value: f64) -> SimResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(name, format!("{value} must be a finite amount >= 0")));
    }
    Ok(())
}

fn check_year(name: &'static str, year: i32) -> SimResult<()> {
    if !YEAR_WINDOW.contains(&year) {
        return Err(invalid(
            name,
            format!(
                "{year} is outside {}..={}",
                YEAR_WINDOW.start(),
                YEAR_WINDOW.end()
            ),
        ));
    }
    Ok(())
}

fn invalid(name: &'static str, reason: String) -> SimError {
    SimError::InvalidParameter { name, reason }
}
