//! Stand-in values for metrics that have no real data behind them yet.
//!
//! Everything here is illustrative. Call sites go through these names so a
//! real computation can replace them in one place.

use crate::models::TrendPoint;
use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Participation rate reported for every non-empty department.
pub const PLACEHOLDER_PARTICIPATION_RATE: f64 = 95.5;

/// Source of the leaderboard's decorative per-row values.
pub trait PlaceholderSource {
    /// Current streak length in days, 5 to 94.
    fn streak_days(&mut self) -> u32;

    /// Days since the last achievement, 1 to 14.
    fn days_since_achievement(&mut self) -> u32;
}

impl<R: Rng + ?Sized> PlaceholderSource for R {
    fn streak_days(&mut self) -> u32 {
        self.gen_range(5..95)
    }

    fn days_since_achievement(&mut self) -> u32 {
        self.gen_range(1..15)
    }
}

/// Deterministic placeholder source.
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Placeholder source seeded from the OS.
pub fn from_entropy() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}

/// Returns the `(year, month)` that lies `months_back` months before `date`.
pub fn months_before(date: NaiveDate, months_back: u32) -> (i32, u32) {
    let index = date.year() * 12 + date.month0() as i32 - months_back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Organisation-wide trend series.
///
/// Not derived from any record: the values climb linearly towards `as_of`.
/// Only `users_active` reflects the loaded data.
pub fn synthetic_trends(months: u32, as_of: NaiveDate, users_active: usize) -> Vec<TrendPoint> {
    (1..=months)
        .rev()
        .map(|i| {
            let (year, month) = months_before(as_of, i);
            trend_point(months - i, format!("{}-{:02}", year, month), users_active)
        })
        .collect()
}

/// The point `step` months after the start of a series. Saturates instead
/// of overflowing.
fn trend_point(step: u32, month: String, users_active: usize) -> TrendPoint {
    TrendPoint {
        month,
        avg_adoption_score: step.saturating_mul(2).saturating_add(60),
        total_hours_saved: step.saturating_mul(2_000).saturating_add(10_000),
        avg_tasks_automated: step.saturating_add(20),
        users_active,
    }
}
