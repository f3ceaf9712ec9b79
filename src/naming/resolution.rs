//! Nominal pixel sizes the dataset is published at.

use std::{fmt, str::FromStr};

use crate::error::WorldclimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    TenMinutes,
    FiveMinutes,
    TwoPointFiveMinutes,
    ThirtySeconds,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::TenMinutes,
        Resolution::FiveMinutes,
        Resolution::TwoPointFiveMinutes,
        Resolution::ThirtySeconds,
    ];

    /// The token used in file names and download URLs.
    pub fn token(&self) -> &'static str {
        match self {
            Resolution::TenMinutes => "10m",
            Resolution::FiveMinutes => "5m",
            Resolution::TwoPointFiveMinutes => "2.5m",
            Resolution::ThirtySeconds => "30s",
        }
    }
}

impl FromStr for Resolution {
    type Err = WorldclimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.token() == s)
            .ok_or_else(|| WorldclimError::invalid("resolution", s))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
