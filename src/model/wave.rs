// src/model/wave.rs

/// One generation of customers who bought in the same year.
///
/// `count` is an expected value, so it may be fractional. It is never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohortWave {
    pub origin_year: i32,
    pub count: f64,
}

impl CohortWave {
    pub fn new(origin_year: i32, count: f64) -> Self {
        Self { origin_year, count }
    }

    /// Years elapsed since the wave's purchase year.
    pub fn age_in(&self, year: i32) -> i64 {
        i64::from(year) - i64::from(self.origin_year)
    }

    /// Inside the inclusive service window `1..=warranty_years`.
    pub fn in_warranty(&self, year: i32, warranty_years: u32) -> bool {
        (1..=i64::from(warranty_years)).contains(&self.age_in(year))
    }

    /// The repeat purchase fires on a single year, not a range.
    pub fn at_ownership_mark(&self, year: i32, ownership_years: u32) -> bool {
        self.age_in(year) == i64::from(ownership_years)
    }
}
