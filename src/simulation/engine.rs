// src/simulation/engine.rs

use crate::model::csi::{csi_rates, CsiRates};
use crate::model::wave::CohortWave;
use crate::simulation::config::SimulationConfig;
use crate::simulation::table::ProjectionTable;
use serde::Serialize;

/// One simulated year. Counts and profit are already rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyRecord {
    pub year: i32,
    pub service_customers: u64,
    pub repeat_purchases: u64,
    pub total_profit: f64,
}

/// Rounding used for gating contributions, for the displayed counts and for
/// yearly profit. Inputs are non-negative, so this is round-half-up.
pub fn round_count(value: f64) -> f64 {
    value.round()
}

/// A contribution only counts if it rounds to at least one customer.
/// Anything smaller is dropped for the year, not carried forward.
pub fn counts_toward(contribution: f64) -> bool {
    round_count(contribution) >= 1.0
}

pub struct WaveSimulation {
    config: SimulationConfig,
    rates: CsiRates,

    // Every wave ever created, oldest first
    pub waves: Vec<CohortWave>,
    pub history: Vec<YearlyRecord>,
}

impl WaveSimulation {
    pub fn new(config: SimulationConfig) -> Self {
        let rates = csi_rates(config.csi_score);
        let initial = CohortWave::new(
            config.start_year.saturating_sub(1),
            f64::from(config.initial_customers),
        );

        Self {
            history: Vec::new(),
            config,
            rates,
            waves: vec![initial],
        }
    }

    pub fn run(&mut self) {
        log::info!(
            "Simulating {}..={} for CSI {} (service {:.2}, repeat {:.2})",
            self.config.start_year,
            self.config.end_year,
            self.config.csi_score,
            self.rates.service_return_rate,
            self.rates.repeat_purchase_rate
        );

        for year in self.config.start_year..=self.config.end_year {
            self.step(year);
        }

        log::info!(
            "Simulation finished: {} years, {} waves",
            self.history.len(),
            self.waves.len()
        );
    }

    fn step(&mut self, year: i32) {
        let mut service_total = 0.0;
        let mut repeat_total = 0.0;

        // Waves spawned this year are held aside so they are not aged or
        // serviced until next year.
        let mut spawned = Vec::new();

        for wave in &self.waves {
            if wave.in_warranty(year, self.config.warranty_years) {
                let service = wave.count * self.rates.service_return_rate;
                if counts_toward(service) {
                    service_total += service;
                }
            }

            if wave.at_ownership_mark(year, self.config.ownership_years) {
                let repeats = wave.count * self.rates.repeat_purchase_rate;
                if counts_toward(repeats) {
                    repeat_total += repeats;
                    // The new wave carries the unrounded count.
                    spawned.push(CohortWave::new(year, repeats));
                    log::trace!(
                        "{year}: wave from {} spawned {repeats:.4} repeat buyers",
                        wave.origin_year
                    );
                }
            }
        }

        self.waves.extend(spawned);
        self.record_year(year, service_total, repeat_total);
    }

    fn record_year(&mut self, year: i32, service_total: f64, repeat_total: f64) {
        let service_customers = round_count(service_total) as u64;
        let repeat_purchases = round_count(repeat_total) as u64;
        // Rounded per year so the totals row sums what is displayed.
        let total_profit = round_count(
            service_customers as f64 * self.config.service_profit_per_year
                + repeat_purchases as f64 * self.config.vehicle_sale_profit,
        );

        log::debug!(
            "{year}: service {service_customers}, repeat {repeat_purchases}, profit {total_profit:.2}, {} waves",
            self.waves.len()
        );

        self.history.push(YearlyRecord {
            year,
            service_customers,
            repeat_purchases,
            total_profit,
        });
    }

    pub fn into_table(self) -> ProjectionTable {
        ProjectionTable::from_records(self.history)
    }
}

/// Runs the whole projection for `config`.
///
/// Pure: the same config always yields the same table. No input validation
/// happens here; an inverted year range yields a table with no yearly rows
/// and zero totals.
pub fn simulate(config: &SimulationConfig) -> ProjectionTable {
    let mut sim = WaveSimulation::new(config.clone());
    if config.end_year < config.start_year {
        log::warn!(
            "End year {} is before start year {}; projection is empty",
            config.end_year,
            config.start_year
        );
    }
    sim.run();
    sim.into_table()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(csi_score: i32, initial_customers: u32, end_year: i32) -> SimulationConfig {
        SimulationConfig {
            csi_score,
            initial_customers,
            end_year,
            ..Default::default()
        }
    }

    #[test]
    fn gate_drops_sub_half_contributions() {
        assert!(!counts_toward(0.0));
        assert!(!counts_toward(0.49));
        assert!(!counts_toward(0.499_999));
        assert!(counts_toward(0.5));
        assert!(counts_toward(0.51));
    }

    #[test]
    fn initial_wave_predates_start_year() {
        let sim = WaveSimulation::new(SimulationConfig::default());
        assert_eq!(sim.waves, vec![CohortWave::new(2025, 100.0)]);
    }

    #[test]
    fn yearly_profit_is_rounded() {
        // 51 service visits at 350.5 each is 17,875.5.
        let mut sim = WaveSimulation::new(SimulationConfig {
            service_profit_per_year: 350.5,
            ownership_years: 5,
            ..config(870, 100, 2027)
        });
        sim.run();

        let profits: Vec<f64> = sim.history.iter().map(|r| r.total_profit).collect();
        assert_eq!(profits, vec![17_876.0, 17_876.0]);
    }

    #[test]
    fn wide_year_range_does_not_preallocate() {
        let sim = WaveSimulation::new(SimulationConfig {
            start_year: -2_000_000_000,
            end_year: 2_000_000_000,
            ..Default::default()
        });
        assert_eq!(sim.history.capacity(), 0);
    }

    #[test]
    fn spawned_wave_keeps_unrounded_count() {
        // 870 -> repeat rate 0.24; 2027 is the ownership mark of the 2025 wave.
        let mut sim = WaveSimulation::new(config(870, 101, 2027));
        sim.run();

        assert_eq!(sim.waves.len(), 2);
        let spawned = sim.waves[1];
        assert_eq!(spawned.origin_year, 2027);
        assert!((spawned.count - 101.0 * 0.24).abs() < 1e-9);
        assert_eq!(sim.history[1].repeat_purchases, 24);
    }

    #[test]
    fn spawned_wave_contributes_from_the_next_year() {
        let mut sim = WaveSimulation::new(SimulationConfig {
            ownership_years: 1,
            warranty_years: 1,
            ..config(1000, 100, 2027)
        });
        sim.run();

        // 2026: initial wave age 1 -> 74 service, 35 repeats.
        assert_eq!(sim.history[0].service_customers, 74);
        assert_eq!(sim.history[0].repeat_purchases, 35);
        // 2027: 2026 spawn (35) age 1 -> 25.9 service, 12.25 repeats.
        assert_eq!(sim.history[1].service_customers, 26);
        assert_eq!(sim.history[1].repeat_purchases, 12);
        assert_eq!(sim.waves.len(), 3);
    }

    #[test]
    fn tiny_cohort_spawns_nothing() {
        // 1 customer at the fallback rates: 0.14 service, 0.16 repeat.
        let mut sim = WaveSimulation::new(config(500, 1, 2040));
        sim.run();

        assert_eq!(sim.waves.len(), 1);
        assert!(sim
            .history
            .iter()
            .all(|r| r.service_customers == 0 && r.repeat_purchases == 0));
    }

    #[test]
    fn inverted_range_runs_no_years() {
        let mut sim = WaveSimulation::new(SimulationConfig {
            start_year: 2030,
            end_year: 2026,
            ..Default::default()
        });
        sim.run();
        assert!(sim.history.is_empty());
    }
}
