use serde::{Deserialize, Serialize};
use strum::{EnumString, FromRepr, IntoStaticStr};

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
    FromRepr,
    EnumString,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum ArcaeaDifficulty {
    #[strum(serialize = "PAST")]
    Past = 0,
    #[strum(serialize = "PRESENT")]
    Present = 1,
    #[strum(serialize = "FUTURE")]
    Future = 2,
    #[strum(serialize = "BEYOND")]
    Beyond = 3,
}

impl ArcaeaDifficulty {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            Self::Past => "#24d4e0",
            Self::Present => "#3cd66f",
            Self::Future => "#994aa1",
            Self::Beyond => "#992f43",
        }
    }
}

impl std::fmt::Display for ArcaeaDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

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
    FromRepr,
    EnumString,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum ChunithmDifficulty {
    #[strum(serialize = "BASIC")]
    Basic = 0,
    #[strum(serialize = "ADVANCED")]
    Advanced = 1,
    #[strum(serialize = "EXPERT")]
    Expert = 2,
    #[strum(serialize = "MASTER")]
    Master = 3,
}

impl ChunithmDifficulty {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            Self::Basic => "#1ae851",
            Self::Advanced => "#edb118",
            Self::Expert => "#e35146",
            Self::Master => "#9b22f2",
        }
    }
}

impl std::fmt::Display for ChunithmDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_u8() {
        assert_eq!(ArcaeaDifficulty::from_u8(0), Some(ArcaeaDifficulty::Past));
        assert_eq!(ArcaeaDifficulty::from_u8(3), Some(ArcaeaDifficulty::Beyond));
        assert_eq!(ArcaeaDifficulty::from_u8(4), None);
        assert_eq!(ChunithmDifficulty::from_u8(1), Some(ChunithmDifficulty::Advanced));
        assert_eq!(ChunithmDifficulty::from_u8(3), Some(ChunithmDifficulty::Master));
        assert_eq!(ChunithmDifficulty::from_u8(9), None);
    }

    #[test]
    fn test_difficulty_names() {
        assert_eq!(ArcaeaDifficulty::Future.to_string(), "FUTURE");
        assert_eq!(ChunithmDifficulty::Expert.to_string(), "EXPERT");
        assert_eq!("PRESENT".parse::<ArcaeaDifficulty>().unwrap(), ArcaeaDifficulty::Present);
    }
}
