use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

use super::truncate;

/// Lower bounds of ranks C through PM; D is everything below the first.
pub const RANK_THRESHOLDS: [u32; 7] = [
    8_600_000, 8_900_000, 9_200_000, 9_500_000, 9_800_000, 9_900_000, 10_000_000,
];

/// Decimal digits kept by a potential value
pub const POTENTIAL_DIGITS: u32 = 3;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum ArcaeaRank {
    #[default]
    D = 0,
    C = 1,
    B = 2,
    A = 3,
    #[strum(serialize = "AA")]
    #[serde(rename = "AA")]
    Aa = 4,
    #[strum(serialize = "EX")]
    #[serde(rename = "EX")]
    Ex = 5,
    #[strum(serialize = "EX+")]
    #[serde(rename = "EX+")]
    ExPlus = 6,
    #[strum(serialize = "PM")]
    #[serde(rename = "PM")]
    Pm = 7,
}

impl ArcaeaRank {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn from_score(score: u32) -> Self {
        let bucket = RANK_THRESHOLDS.partition_point(|&lower| lower <= score);
        Self::from_repr(bucket as u8).unwrap_or(Self::Pm)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            Self::D => "#7a0f0f",
            Self::C => "#827022",
            Self::B => "#6f8519",
            Self::A => "#4d0530",
            Self::Aa => "#ab116d",
            Self::Ex => "#eb2eef",
            Self::ExPlus => "#2e74ff",
            Self::Pm => "#ffe68c",
        }
    }
}

impl std::fmt::Display for ArcaeaRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Play potential of a chart, truncated to `POTENTIAL_DIGITS` digits.
///
/// Three segments: up to 9,800,000 the potential rises by 1 per 300,000
/// points from `constant` at 9,500,000 (never below 0); up to 10,000,000 it
/// rises by 1 per 200,000 points from `constant + 1`; above that it is
/// capped at `constant + 2`.
pub fn potential(score: u32, constant: f64) -> f64 {
    let score = f64::from(score);
    let raw = if score <= 9_800_000.0 {
        (constant + (score - 9_500_000.0) / 300_000.0).max(0.0)
    } else if score <= 10_000_000.0 {
        constant + 1.0 + (score - 9_800_000.0) / 200_000.0
    } else {
        constant + 2.0
    };
    truncate(raw, POTENTIAL_DIGITS)
}
