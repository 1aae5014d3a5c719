//! Client rating model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Four-tier trust category derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingCategory {
    A,
    B,
    C,
    D,
}

impl RatingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingCategory::A => "A",
            RatingCategory::B => "B",
            RatingCategory::C => "C",
            RatingCategory::D => "D",
        }
    }

    /// Band table: A >= 90, B >= 70, C >= 50, D below. Boundaries are
    /// inclusive on the lower edge of each band.
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            RatingCategory::A
        } else if score >= 70 {
            RatingCategory::B
        } else if score >= 50 {
            RatingCategory::C
        } else {
            RatingCategory::D
        }
    }
}

/// Computed-and-cached rating for one client. Every calculation is a full
/// recompute from source history; this record is never maintained
/// incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRating {
    pub client_id: Uuid,
    pub rating: RatingCategory,
    pub score: u8,
    pub payment_punctuality: u8,
    pub purchase_frequency: u8,
    pub total_purchases: u32,
    pub client_tenure_days: i64,
    pub last_calculated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RatingCategory::from_score(100), RatingCategory::A);
        assert_eq!(RatingCategory::from_score(90), RatingCategory::A);
        assert_eq!(RatingCategory::from_score(89), RatingCategory::B);
        assert_eq!(RatingCategory::from_score(70), RatingCategory::B);
        assert_eq!(RatingCategory::from_score(69), RatingCategory::C);
        assert_eq!(RatingCategory::from_score(50), RatingCategory::C);
        assert_eq!(RatingCategory::from_score(49), RatingCategory::D);
        assert_eq!(RatingCategory::from_score(0), RatingCategory::D);
    }
}
