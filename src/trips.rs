//! Trip records and the filtered collection the reporters work on.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use csv::StringRecord;
use serde::Deserialize;

use crate::filters::{DayFilter, FilterSelection, MonthFilter, day_name, month_name};

pub const GENDER_COLUMN: &str = "Gender";
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One CSV row as it appears on disk. Columns not named here are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Parses a start/end timestamp such as `2017-03-03 17:08:29`.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| anyhow!("unrecognised timestamp '{value}'"))
}

/// A trip with parsed times and the fields derived from its start time.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

impl Trip {
    fn from_raw(raw: RawTrip) -> Result<Self> {
        let start_time = parse_timestamp(&raw.start_time).context("invalid Start Time")?;
        let end_time = parse_timestamp(&raw.end_time).context("invalid End Time")?;

        Ok(Trip {
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            start_time,
            end_time,
            start_station: raw.start_station,
            end_station: raw.end_station,
            user_type: non_blank(raw.user_type),
            gender: non_blank(raw.gender),
            birth_year: raw
                .birth_year
                .filter(|y| y.is_finite())
                .map(|y| y.round() as i32),
        })
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.weekday)
    }

    /// `"<start> to <end>"`, the key used for the popular-trip statistic.
    pub fn route(&self) -> String {
        format!("{} to {}", self.start_station, self.end_station)
    }

    /// End minus start, in seconds.
    pub fn duration_secs(&self) -> f64 {
        let delta = self.end_time - self.start_time;
        match delta.num_microseconds() {
            Some(us) => us as f64 / 1_000_000.0,
            None => delta.num_seconds() as f64,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Trips for one city, narrowed to the active filter.
///
/// Which optional columns exist depends on the city file, so presence is
/// recorded from the header row rather than inferred from the values.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCollection {
    trips: Vec<Trip>,
    has_gender: bool,
    has_birth_year: bool,
}

impl TripCollection {
    /// Builds the collection from CSV records sharing `headers`.
    ///
    /// # Errors
    ///
    /// Fails on the first row with missing required columns or unparseable
    /// timestamps; the error names the 0-based row position.
    pub fn from_records(headers: &StringRecord, records: &[StringRecord]) -> Result<Self> {
        let trips = records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let raw: RawTrip = record
                    .deserialize(Some(headers))
                    .with_context(|| format!("malformed trip at row {row}"))?;
                Trip::from_raw(raw).with_context(|| format!("malformed trip at row {row}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            trips,
            has_gender: headers.iter().any(|h| h == GENDER_COLUMN),
            has_birth_year: headers.iter().any(|h| h == BIRTH_YEAR_COLUMN),
        })
    }

    pub fn new(trips: Vec<Trip>, has_gender: bool, has_birth_year: bool) -> Self {
        Self {
            trips,
            has_gender,
            has_birth_year,
        }
    }

    /// Keeps only trips whose derived month and weekday match.
    pub fn filter(&mut self, month: MonthFilter, day: DayFilter) {
        self.trips
            .retain(|t| month.matches(t.month) && day.matches(t.weekday));
    }

    pub fn apply(&mut self, selection: &FilterSelection) {
        self.filter(selection.month, selection.day);
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn has_gender(&self) -> bool {
        self.has_gender
    }

    pub fn has_birth_year(&self) -> bool {
        self.has_birth_year
    }
}
