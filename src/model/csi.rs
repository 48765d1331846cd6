// src/model/csi.rs

/// Return rates implied by a CSI score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsiRates {
    /// Fraction of a wave that comes back for paid service in a warranty year.
    pub service_return_rate: f64,
    /// Fraction of a wave that buys again when it reaches the ownership duration.
    pub repeat_purchase_rate: f64,
}

impl CsiRates {
    const fn new(service_return_rate: f64, repeat_purchase_rate: f64) -> Self {
        Self {
            service_return_rate,
            repeat_purchase_rate,
        }
    }
}

/// Lower bound of each CSI bucket and its rates, highest bucket first.
///
/// A score falls into the first band whose threshold it reaches. Scores
/// below every threshold (including negatives) use `FALLBACK_RATES`.
pub const CSI_BANDS: [(i32, CsiRates); 3] = [
    (901, CsiRates::new(0.74, 0.35)),
    (801, CsiRates::new(0.51, 0.24)),
    (701, CsiRates::new(0.32, 0.19)),
];

pub const FALLBACK_RATES: CsiRates = CsiRates::new(0.14, 0.16);

/// Step-function lookup of the rates for a CSI score. No interpolation
/// between buckets, and no validation of the 0..=1000 convention.
pub fn csi_rates(score: i32) -> CsiRates {
    CSI_BANDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, rates)| *rates)
        .unwrap_or(FALLBACK_RATES)
}
