// src/simulation/table.rs

use crate::simulation::engine::YearlyRecord;

/// Column sums over every yearly row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TotalsRow {
    pub service_customers: u64,
    pub repeat_purchases: u64,
    pub total_profit: f64,
}

/// Label shown in the year column of a display row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowLabel {
    Total,
    Year(i32),
}

/// A row as it is displayed or exported.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: RowLabel,
    pub service_customers: u64,
    pub repeat_purchases: u64,
    pub total_profit: f64,
}

/// Yearly records in ascending year order, plus their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionTable {
    pub totals: TotalsRow,
    pub records: Vec<YearlyRecord>,
}

impl ProjectionTable {
    /// Totals are summed from the already-rounded yearly values.
    pub fn from_records(records: Vec<YearlyRecord>) -> Self {
        let totals = records.iter().fold(TotalsRow::default(), |acc, r| TotalsRow {
            service_customers: acc.service_customers + r.service_customers,
            repeat_purchases: acc.repeat_purchases + r.repeat_purchases,
            total_profit: acc.total_profit + r.total_profit,
        });

        Self { totals, records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Display order: totals first, then each year.
    pub fn rows(&self) -> impl Iterator<Item = TableRow> + '_ {
        let totals = TableRow {
            label: RowLabel::Total,
            service_customers: self.totals.service_customers,
            repeat_purchases: self.totals.repeat_purchases,
            total_profit: self.totals.total_profit,
        };

        std::iter::once(totals).chain(self.records.iter().map(|r| TableRow {
            label: RowLabel::Year(r.year),
            service_customers: r.service_customers,
            repeat_purchases: r.repeat_purchases,
            total_profit: r.total_profit,
        }))
    }
}
