use serde::{Deserialize, Serialize};
use std::fmt;

/// A single score in `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    /// Ratings at or below this need a written reason
    pub const LOW_THRESHOLD: u8 = 3;
    /// Ratings at or above this need a written reason
    pub const HIGH_THRESHOLD: u8 = 9;

    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Rating)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_low(self) -> bool {
        self.0 <= Self::LOW_THRESHOLD
    }

    pub fn is_high(self) -> bool {
        self.0 >= Self::HIGH_THRESHOLD
    }

    pub fn needs_reason(self) -> bool {
        self.is_low() || self.is_high()
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
            .ok_or_else(|| format!("rating {value} outside {}..={}", Self::MIN, Self::MAX))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
