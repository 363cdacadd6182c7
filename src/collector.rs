//! Interactive collection and confirmation of the filter selection.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::console::Console;
use crate::filters::{DayFilter, FilterSelection, MonthFilter};
use crate::registry::City;

const CITY_PROMPT: &str =
    "Please enter the city you want to explore (chicago, new york city, washington): ";
const MONTH_PROMPT: &str =
    "Please enter the month you want to explore (all, january, february, ... , june): ";
const DAY_PROMPT: &str =
    "Please enter the day of week you want to explore (all, monday, tuesday, ... , sunday): ";
const INVALID_INPUT: &str = "Invalid input. Please try again.";

/// Re-prompts until `parse` accepts the lower-cased answer.
fn ask_until_valid<R, W, T>(
    console: &mut Console<R, W>,
    prompt: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    loop {
        let answer = console.ask_lower(prompt)?;
        if let Some(value) = parse(&answer) {
            return Ok(value);
        }
        debug!(answer = %answer, "Rejected filter answer");
        console.say(INVALID_INPUT)?;
    }
}

/// Asks for city, month and day, looping on each prompt until the answer is
/// one of the accepted values.
///
/// # Errors
///
/// Only fails when input runs out or output cannot be written.
pub fn get_filters<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<FilterSelection> {
    console.say("Hello! Let's explore some US bikeshare data!")?;

    let city = ask_until_valid(console, CITY_PROMPT, City::from_key)?;
    let month = ask_until_valid(console, MONTH_PROMPT, MonthFilter::from_key)?;
    let day = ask_until_valid(console, DAY_PROMPT, DayFilter::from_key)?;

    console.separator()?;
    Ok(FilterSelection::new(city, month, day))
}

/// Echoes the selection and reads one line. Returns `false` only when the
/// answer is `no` (ignoring case and surrounding whitespace).
pub fn confirm_filters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    selection: &FilterSelection,
) -> Result<bool> {
    console.say("")?;
    console.say(&format!(
        "You have chosen to explore data for {selection}."
    ))?;
    console.say("If this is correct, press Enter to continue or type 'no' to restart.")?;

    let answer = console.ask_lower("")?;
    console.separator()?;
    Ok(answer.trim() != "no")
}
