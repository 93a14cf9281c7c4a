//! Scoring curves and aggregation.
//!
//! - `arcaea` - 8 rank buckets and the potential curve
//! - `chunithm` - 12 rank buckets and the rate curve
//! - `Rank` - a rank bucket of either game
//! - `best_rate` - truncated mean of the top 30 ratings

pub mod arcaea;
pub mod chunithm;

pub use arcaea::ArcaeaRank;
pub use chunithm::ChunithmRank;

use serde::Serialize;

/// Number of top ratings averaged into the best rate
pub const BEST_RATE_COUNT: usize = 30;

/// Decimal digits kept by the best rate
pub const BEST_RATE_DIGITS: u32 = 4;

/// Truncate `value` to `digits` decimal places (`floor(x * 10^d) / 10^d`).
pub fn truncate(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).floor() / scale
}

/// Mean of the highest `BEST_RATE_COUNT` ratings, truncated to
/// `BEST_RATE_DIGITS` digits.
///
/// Averages over the number of ratings actually taken. Returns `None` for
/// an empty input.
pub fn best_rate<I>(ratings: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut ratings: Vec<f64> = ratings.into_iter().collect();
    if ratings.is_empty() {
        return None;
    }
    ratings.sort_by(|l, r| r.total_cmp(l));
    let top = &ratings[..ratings.len().min(BEST_RATE_COUNT)];
    let mean = top.iter().sum::<f64>() / top.len() as f64;
    Some(truncate(mean, BEST_RATE_DIGITS))
}

/// Rank bucket of either game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Rank {
    Arcaea(ArcaeaRank),
    Chunithm(ChunithmRank),
}

impl Rank {
    /// Position of the bucket, 0 being the lowest
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Arcaea(r) => *r as u8,
            Self::Chunithm(r) => *r as u8,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Arcaea(r) => r.short_name(),
            Self::Chunithm(r) => r.short_name(),
        }
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            Self::Arcaea(r) => r.color_code(),
            Self::Chunithm(r) => r.color_code(),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
