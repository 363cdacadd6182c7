//! The four statistics reporters, run in a fixed order after loading.
//!
//! Each reporter computes a small summary struct from the
//! [`TripCollection`] and prints it, followed by the time the computation
//! took. An empty collection prints [`NO_DATA`] instead of statistics.

use std::io::Write;
use std::time::Instant;

use anyhow::Result;
use tracing::debug;

use crate::console::SEPARATOR_WIDTH;
use crate::stats::{mean, mode, sum, value_counts};
use crate::trips::TripCollection;

pub const NO_DATA: &str = "No trip data available for the selected filters.";
pub const NO_GENDER: &str = "No gender data available.";
pub const NO_BIRTH_YEAR: &str = "No birth year data available.";
pub const NO_GENDER_VALUES: &str = "No gender values for the selected filters.";
pub const NO_BIRTH_YEAR_VALUES: &str = "No birth year values for the selected filters.";

#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: &'static str,
    pub day: &'static str,
    pub hour: u32,
}

impl TimeStats {
    pub fn compute(trips: &TripCollection) -> Option<Self> {
        Some(TimeStats {
            month: mode(trips.iter().map(|t| t.month_name()))?,
            day: mode(trips.iter().map(|t| t.day_name()))?,
            hour: mode(trips.iter().map(|t| t.hour))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub route: String,
}

impl StationStats {
    pub fn compute(trips: &TripCollection) -> Option<Self> {
        Some(StationStats {
            start_station: mode(trips.iter().map(|t| t.start_station.as_str()))?.to_string(),
            end_station: mode(trips.iter().map(|t| t.end_station.as_str()))?.to_string(),
            route: mode(trips.iter().map(|t| t.route()))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total_secs: f64,
    pub mean_secs: f64,
}

impl DurationStats {
    pub fn compute(trips: &TripCollection) -> Option<Self> {
        let durations: Vec<f64> = trips.iter().map(|t| t.duration_secs()).collect();
        Some(DurationStats {
            mean_secs: mean(&durations)?,
            total_secs: sum(&durations),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Statistics over a column that only some city files carry.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionalColumn<T> {
    /// The file has no such column.
    Missing,
    /// The column exists but every filtered row left it blank.
    Blank,
    Values(T),
}

impl<T> OptionalColumn<T> {
    fn from_present(present: bool, values: Option<T>) -> Self {
        match (present, values) {
            (false, _) => OptionalColumn::Missing,
            (true, None) => OptionalColumn::Blank,
            (true, Some(values)) => OptionalColumn::Values(values),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: OptionalColumn<Vec<(String, usize)>>,
    pub birth_years: OptionalColumn<BirthYearStats>,
}

impl UserStats {
    pub fn compute(trips: &TripCollection) -> Option<Self> {
        if trips.is_empty() {
            return None;
        }

        let user_types = owned_counts(trips.iter().filter_map(|t| t.user_type.as_deref()));

        let gender_counts = owned_counts(trips.iter().filter_map(|t| t.gender.as_deref()));
        let genders = OptionalColumn::from_present(
            trips.has_gender(),
            Some(gender_counts).filter(|counts| !counts.is_empty()),
        );

        let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
        let year_stats = match (years.iter().min(), years.iter().max(), mode(years.iter().copied())) {
            (Some(&earliest), Some(&most_recent), Some(most_common)) => Some(BirthYearStats {
                earliest,
                most_recent,
                most_common,
            }),
            _ => None,
        };
        let birth_years = OptionalColumn::from_present(trips.has_birth_year(), year_stats);

        Some(UserStats {
            user_types,
            genders,
            birth_years,
        })
    }
}

fn owned_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    value_counts(values)
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

fn write_counts<W: Write>(out: &mut W, title: &str, counts: &[(String, usize)]) -> Result<()> {
    writeln!(out, "{title}")?;
    for (value, count) in counts {
        writeln!(out, "  {value}: {count}")?;
    }
    Ok(())
}

/// Prints the heading, runs `body`, then the elapsed time and a separator.
fn timed<W: Write>(
    out: &mut W,
    heading: &str,
    body: impl FnOnce(&mut W) -> Result<()>,
) -> Result<()> {
    writeln!(out, "\n{heading}\n")?;
    let started = Instant::now();

    body(&mut *out)?;

    let elapsed = started.elapsed();
    debug!(report = heading, elapsed_ms = elapsed.as_millis() as u64, "Report finished");
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    Ok(())
}

/// Most common month, weekday and start hour.
pub fn time_stats<W: Write>(out: &mut W, trips: &TripCollection) -> Result<()> {
    timed(out, "Calculating The Most Frequent Times of Travel...", |out| {
        match TimeStats::compute(trips) {
            Some(stats) => {
                writeln!(out, "Most common month: {}", stats.month)?;
                writeln!(out, "Most common day of week: {}", stats.day)?;
                writeln!(out, "Most common start hour: {}", stats.hour)?;
            }
            None => writeln!(out, "{NO_DATA}")?,
        }
        Ok(())
    })
}

/// Most popular start station, end station and start/end pair.
pub fn station_stats<W: Write>(out: &mut W, trips: &TripCollection) -> Result<()> {
    timed(out, "Calculating The Most Popular Stations and Trip...", |out| {
        match StationStats::compute(trips) {
            Some(stats) => {
                writeln!(out, "Most commonly used start station: {}", stats.start_station)?;
                writeln!(out, "Most commonly used end station: {}", stats.end_station)?;
                writeln!(
                    out,
                    "Most frequent combination of start station and end station trip: {}",
                    stats.route
                )?;
            }
            None => writeln!(out, "{NO_DATA}")?,
        }
        Ok(())
    })
}

/// Total and mean trip duration in seconds.
pub fn trip_duration_stats<W: Write>(out: &mut W, trips: &TripCollection) -> Result<()> {
    timed(out, "Calculating Trip Duration...", |out| {
        match DurationStats::compute(trips) {
            Some(stats) => {
                writeln!(out, "Total travel time: {} seconds", stats.total_secs)?;
                writeln!(out, "Mean travel time: {} seconds", stats.mean_secs)?;
            }
            None => writeln!(out, "{NO_DATA}")?,
        }
        Ok(())
    })
}

/// User-type counts, gender counts and birth-year extremes, where the
/// city's file carries those columns.
pub fn user_stats<W: Write>(out: &mut W, trips: &TripCollection) -> Result<()> {
    timed(out, "Calculating User Stats...", |out| {
        let Some(stats) = UserStats::compute(trips) else {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        };

        write_counts(out, "Counts of user types:", &stats.user_types)?;

        match &stats.genders {
            OptionalColumn::Values(genders) => write_counts(out, "Counts of gender:", genders)?,
            OptionalColumn::Blank => writeln!(out, "{NO_GENDER_VALUES}")?,
            OptionalColumn::Missing => writeln!(out, "{NO_GENDER}")?,
        }

        match stats.birth_years {
            OptionalColumn::Values(years) => {
                writeln!(out, "Earliest year of birth: {}", years.earliest)?;
                writeln!(out, "Most recent year of birth: {}", years.most_recent)?;
                writeln!(out, "Most common year of birth: {}", years.most_common)?;
            }
            OptionalColumn::Blank => writeln!(out, "{NO_BIRTH_YEAR_VALUES}")?,
            OptionalColumn::Missing => writeln!(out, "{NO_BIRTH_YEAR}")?,
        }
        Ok(())
    })
}

/// Runs every reporter in order: time, station, duration, user.
pub fn report_all<W: Write>(out: &mut W, trips: &TripCollection) -> Result<()> {
    time_stats(out, trips)?;
    station_stats(out, trips)?;
    trip_duration_stats(out, trips)?;
    user_stats(out, trips)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trips::{Trip, parse_timestamp};
    use chrono::{Datelike, Timelike};

    fn trip(start: &str, end: &str, from: &str, to: &str, user: &str) -> Trip {
        let start_time = parse_timestamp(start).unwrap();
        Trip {
            start_time,
            end_time: parse_timestamp(end).unwrap(),
            start_station: from.to_string(),
            end_station: to.to_string(),
            user_type: Some(user.to_string()),
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    fn sample(has_gender: bool, has_birth_year: bool) -> TripCollection {
        let mut trips = vec![
            trip("2017-03-03 08:00:00", "2017-03-03 08:10:00", "A", "B", "Subscriber"),
            trip("2017-03-10 08:30:00", "2017-03-10 08:31:00", "A", "C", "Customer"),
            trip("2017-02-04 17:00:00", "2017-02-04 17:00:30", "C", "B", "Subscriber"),
        ];
        if has_gender {
            trips[0].gender = Some("Female".to_string());
            trips[2].gender = Some("Male".to_string());
        }
        if has_birth_year {
            trips[0].birth_year = Some(1985);
            trips[1].birth_year = Some(1990);
            trips[2].birth_year = Some(1990);
        }
        TripCollection::new(trips, has_gender, has_birth_year)
    }

    fn render(f: impl Fn(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_time_stats_compute() {
        let stats = TimeStats::compute(&sample(false, false)).unwrap();
        assert_eq!(stats.month, "March");
        assert_eq!(stats.day, "Friday");
        assert_eq!(stats.hour, 8);
    }

    #[test]
    fn test_station_stats_compute() {
        let stats = StationStats::compute(&sample(false, false)).unwrap();
        assert_eq!(stats.start_station, "A");
        assert_eq!(stats.end_station, "B");
        // every route appears once, so the first one wins
        assert_eq!(stats.route, "A to B");
    }

    #[test]
    fn test_duration_stats_sum_and_mean() {
        let stats = DurationStats::compute(&sample(false, false)).unwrap();
        assert_eq!(stats.total_secs, 600.0 + 60.0 + 30.0);
        assert_eq!(stats.mean_secs, stats.total_secs / 3.0);
    }

    #[test]
    fn test_user_stats_with_optional_columns() {
        let stats = UserStats::compute(&sample(true, true)).unwrap();
        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
        );
        assert_eq!(
            stats.genders,
            OptionalColumn::Values(vec![("Female".to_string(), 1), ("Male".to_string(), 1)])
        );
        assert_eq!(
            stats.birth_years,
            OptionalColumn::Values(BirthYearStats {
                earliest: 1985,
                most_recent: 1990,
                most_common: 1990,
            })
        );
    }

    #[test]
    fn test_user_stats_without_optional_columns() {
        let text = render(|out| user_stats(out, &sample(false, false)));
        assert!(text.contains("Subscriber: 2"));
        assert!(text.contains(NO_GENDER));
        assert!(text.contains(NO_BIRTH_YEAR));
    }

    #[test]
    fn test_blank_optional_columns_differ_from_missing_ones() {
        // columns present in the header, but no row has a value
        let trips = TripCollection::new(sample(false, false).trips().to_vec(), true, true);
        let stats = UserStats::compute(&trips).unwrap();
        assert_eq!(stats.genders, OptionalColumn::Blank);
        assert_eq!(stats.birth_years, OptionalColumn::Blank);

        let text = render(|out| user_stats(out, &trips));
        assert!(text.contains(NO_GENDER_VALUES));
        assert!(text.contains(NO_BIRTH_YEAR_VALUES));
        assert!(!text.contains(NO_GENDER));
        assert!(!text.contains(NO_BIRTH_YEAR));
    }

    #[test]
    fn test_empty_collection_reports_no_data() {
        let empty = TripCollection::new(Vec::new(), true, true);
        assert_eq!(TimeStats::compute(&empty), None);
        assert_eq!(StationStats::compute(&empty), None);
        assert_eq!(DurationStats::compute(&empty), None);
        assert_eq!(UserStats::compute(&empty), None);

        let text = render(|out| report_all(out, &empty));
        assert_eq!(text.matches(NO_DATA).count(), 4);
    }

    #[test]
    fn test_report_all_order_and_timing() {
        let text = render(|out| report_all(out, &sample(true, true)));
        let time = text.find("Most Frequent Times").unwrap();
        let station = text.find("Popular Stations").unwrap();
        let duration = text.find("Trip Duration").unwrap();
        let user = text.find("User Stats").unwrap();
        assert!(time < station && station < duration && duration < user);
        assert_eq!(text.matches("This took").count(), 4);
        assert!(text.contains("Total travel time: 690 seconds"));
        assert!(text.contains("Most common year of birth: 1990"));
    }
}
