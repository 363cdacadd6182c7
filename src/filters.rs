//! Filter selection: the city/month/day triple chosen by the user.
//!
//! Month and day values are closed enumerations; a [`FilterSelection`] can
//! only be built from members of those sets, so downstream code never sees
//! an invalid value.

use std::fmt;

use chrono::Weekday;

use crate::registry::City;

/// Full month names, indexed by `month - 1`.
pub static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full weekday names, indexed by days from Monday.
pub static DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Accepted answers to the month prompt. Only the first half of the year is
/// published, so later months are rejected.
pub static MONTH_CHOICES: [&str; 7] = [
    "all", "january", "february", "march", "april", "may", "june",
];

/// Accepted answers to the day prompt.
pub static DAY_CHOICES: [&str; 8] = [
    "all",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Name of a calendar month given its 1-based number.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

pub fn day_name(day: Weekday) -> &'static str {
    DAY_NAMES[day.num_days_from_monday() as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// 1-based month number.
    Only(u32),
}

impl MonthFilter {
    /// Parses a lower-case month answer (`"all"`, `"january"` .. `"june"`).
    pub fn from_key(key: &str) -> Option<Self> {
        let pos = MONTH_CHOICES.iter().position(|c| *c == key)?;
        Some(match pos {
            0 => MonthFilter::All,
            n => MonthFilter::Only(n as u32),
        })
    }

    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => m == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("All"),
            MonthFilter::Only(m) => f.write_str(month_name(*m)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Parses a lower-case day answer (`"all"`, `"monday"` .. `"sunday"`).
    pub fn from_key(key: &str) -> Option<Self> {
        let pos = DAY_CHOICES.iter().position(|c| *c == key)?;
        Some(match pos {
            0 => DayFilter::All,
            n => DayFilter::Only(WEEKDAYS[n - 1]),
        })
    }

    pub fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => d == day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("All"),
            DayFilter::Only(d) => f.write_str(day_name(*d)),
        }
    }
}

/// Validated (city, month, day) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }
}

impl fmt::Display for FilterSelection {
    /// Renders as `"Chicago in March during Friday"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {} during {}", self.city, self.month, self.day)
    }
}
