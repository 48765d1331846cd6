//! CSI profitability projection.
//!
//! Projects service visits and repeat vehicle purchases for a cohort of buyers,
//! year by year, with customer-satisfaction (CSI) driven return rates.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;

pub use error::{SimError, SimResult};
pub use simulation::table::ProjectionTable;
pub use simulation::config::SimulationConfig;
pub use simulation::engine::{simulate, YearlyRecord};
