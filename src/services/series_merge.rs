//! Price Series Merge
//!
//! Reconciles a provider's historical series with at most one live rate:
//! - the live rate becomes an observation dated `as_of`, unless history
//!   already has one for that date (history wins, the live read is dropped)
//! - observations are sorted by `checkedDate` ascending
//! - highest / lowest / average are recomputed over the final set

use crate::models::price::{LiveRate, PriceObservation, PriceSeries};

/// Outcome of a merge: the series plus whether the live rate made it in
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub series: PriceSeries,
    pub live_rate_applied: bool,
}

/// Merge `live` into `history` as of `as_of` (a `YYYY-MM-DD` string).
///
/// Pure: the same inputs always give the same series.
pub fn merge(history: PriceSeries, live: Option<LiveRate>, as_of: &str) -> PriceSeries {
    merge_with_outcome(history, live, as_of).series
}

pub fn merge_with_outcome(history: PriceSeries, live: Option<LiveRate>, as_of: &str) -> MergeOutcome {
    // Date strings, not timestamps: no timezone drift between sources.
    let already_recorded = history.contains_date(as_of);
    let mut observations = history.price_history;

    let live_rate_applied = match live {
        Some(live) if !already_recorded => {
            observations.push(PriceObservation::from_live(&LiveRate {
                price: live.price,
                date: as_of.to_string(),
            }));
            true
        }
        _ => false,
    };

    // YYYY-MM-DD sorts lexicographically in calendar order. Stable, so
    // same-day duplicates from the provider keep their arrival order.
    observations.sort_by(|a, b| a.checked_date.cmp(&b.checked_date));

    MergeOutcome {
        series: PriceSeries::from_observations(observations),
        live_rate_applied,
    }
}
