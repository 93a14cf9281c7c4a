use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

use super::truncate;

/// Lower bounds of ranks C through SSS; D is everything below the first.
pub const RANK_THRESHOLDS: [u32; 11] = [
    500_000, 600_000, 700_000, 800_000, 900_000, 925_000, 950_000, 975_000, 1_000_000, 1_005_000,
    1_007_500,
];

/// Decimal digits kept by a rate value
pub const RATE_DIGITS: u32 = 4;

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
pub enum ChunithmRank {
    #[default]
    D = 0,
    C = 1,
    B = 2,
    #[strum(serialize = "BB")]
    #[serde(rename = "BB")]
    Bb = 3,
    #[strum(serialize = "BBB")]
    #[serde(rename = "BBB")]
    Bbb = 4,
    A = 5,
    #[strum(serialize = "AA")]
    #[serde(rename = "AA")]
    Aa = 6,
    #[strum(serialize = "AAA")]
    #[serde(rename = "AAA")]
    Aaa = 7,
    S = 8,
    #[strum(serialize = "SS")]
    #[serde(rename = "SS")]
    Ss = 9,
    #[strum(serialize = "SS+")]
    #[serde(rename = "SS+")]
    SsPlus = 10,
    #[strum(serialize = "SSS")]
    #[serde(rename = "SSS")]
    Sss = 11,
}

impl ChunithmRank {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn from_score(score: u32) -> Self {
        let bucket = RANK_THRESHOLDS.partition_point(|&lower| lower <= score);
        Self::from_repr(bucket as u8).unwrap_or(Self::Sss)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            Self::D | Self::C | Self::B | Self::Bb => "#0068B7",
            Self::Bbb => "#00A0E9",
            Self::A => "#009E96",
            Self::Aa => "#009944",
            Self::Aaa | Self::S => "#8FC31F",
            Self::Ss => "#FFF100",
            Self::SsPlus => "#F39800",
            Self::Sss => "#E60012",
        }
    }
}

impl std::fmt::Display for ChunithmRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Play rate of a chart, truncated to `RATE_DIGITS` digits.
///
/// | score range           | rate                                   |
/// |-----------------------|----------------------------------------|
/// | >= 1,007,500          | constant + 2.0                         |
/// | 1,005,000 - 1,007,499 | constant + 1.5 + 0.01 per 50 points    |
/// | 1,000,000 - 1,004,999 | constant + 1.0 + 0.01 per 100 points   |
/// | 975,000 - 999,999     | constant + 0.0 + 0.01 per 250 points   |
/// | 950,000 - 974,999     | constant - 1.5 + 3.0 per 50,000 points |
/// | 925,000 - 949,999     | constant - 3.0 + 3.0 per 50,000 points |
/// | 900,000 - 924,999     | constant - 5.0 + 4.0 per 50,000 points |
/// | below 900,000         | 0                                      |
pub fn rate(score: u32, constant: f64) -> f64 {
    let s = f64::from(score);
    let raw = if score >= 1_007_500 {
        constant + 2.0
    } else if score >= 1_005_000 {
        constant + 1.5 + (s - 1_005_000.0) * 10.0 / 50_000.0
    } else if score >= 1_000_000 {
        constant + 1.0 + (s - 1_000_000.0) * 5.0 / 50_000.0
    } else if score >= 975_000 {
        constant + (s - 975_000.0) * 2.0 / 50_000.0
    } else if score >= 950_000 {
        constant - 1.5 + (s - 950_000.0) * 3.0 / 50_000.0
    } else if score >= 925_000 {
        constant - 3.0 + (s - 925_000.0) * 3.0 / 50_000.0
    } else if score >= 900_000 {
        constant - 5.0 + (s - 900_000.0) * 4.0 / 50_000.0
    } else {
        0.0
    };
    truncate(raw, RATE_DIGITS)
}
