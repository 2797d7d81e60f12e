//! Coarse score buckets for color-coding ratings.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    /// 0..=20
    Low,
    /// 21..=40
    MediumLow,
    /// 41..=60
    Medium,
    /// 61..=80
    MediumHigh,
    /// 81..=100
    High,
}

impl RatingBand {
    /// Classifies a score. Values above 100 fall into `High`.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => Self::Low,
            21..=40 => Self::MediumLow,
            41..=60 => Self::Medium,
            61..=80 => Self::MediumHigh,
            _ => Self::High,
        }
    }

    pub fn range(self) -> RangeInclusive<u8> {
        match self {
            Self::Low => 0..=20,
            Self::MediumLow => 21..=40,
            Self::Medium => 41..=60,
            Self::MediumHigh => 61..=80,
            Self::High => 81..=100,
        }
    }
}
