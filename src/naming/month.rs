//! Calendar months and the validity window each monthly normal covers.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    constants::{END_YEAR, START_YEAR},
    error::WorldclimError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn number(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        NAMES[*self as usize - 1]
    }

    pub fn from_number(number: u32) -> Result<Self, WorldclimError> {
        match number {
            1..=12 => Ok(Month::ALL[number as usize - 1]),
            _ => Err(WorldclimError::invalid("month", number)),
        }
    }

    /// First instant of this month in `year`.
    pub fn start_in(&self, year: i32) -> DateTime<Utc> {
        first_instant(year, self.number())
    }

    /// Last second of this month in `year`. December rolls over into January
    /// of the following year before stepping back.
    pub fn end_in(&self, year: i32) -> DateTime<Utc> {
        let next = match self {
            Month::December => first_instant(year + 1, 1),
            _ => first_instant(year, self.number() + 1),
        };
        next - Duration::seconds(1)
    }

    /// Validity window of the monthly normal: this month of the first year
    /// through this month of the last year.
    pub fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start_in(START_YEAR), self.end_in(END_YEAR))
    }
}

/// `month` is always 1..=12 here, so only a year outside chrono's range can fail.
fn first_instant(year: i32, month: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .unwrap_or_else(|| panic!("{}-{:02}-01 is outside the supported calendar", year, month))
}

impl FromStr for Month {
    type Err = WorldclimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .parse::<u32>()
            .map_err(|_| WorldclimError::invalid("month", s))?;
        Month::from_number(number).map_err(|_| WorldclimError::invalid("month", s))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.number())
    }
}
