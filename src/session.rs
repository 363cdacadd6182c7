//! The interactive session loop.
//!
//! ```text
//! Collecting -> Confirming -> Reporting -> RestartPrompt -> Collecting | Terminated
//!                   |
//!                   +-- "no" --> Collecting
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, info_span};

use crate::collector::{confirm_filters, get_filters};
use crate::console::Console;
use crate::filters::FilterSelection;
use crate::loader::load_data;
use crate::report::report_all;

const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Collecting,
    Confirming(FilterSelection),
    Reporting(FilterSelection),
    RestartPrompt,
    Terminated,
}

pub struct Session<R, W> {
    console: Console<R, W>,
    data_dir: PathBuf,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            console,
            data_dir: data_dir.into(),
        }
    }

    /// Drives the session until the user declines to restart.
    ///
    /// Returns how many times the reports were produced.
    ///
    /// # Errors
    ///
    /// Missing or malformed data files and exhausted input end the session.
    pub fn run(&mut self) -> Result<usize> {
        let mut state = State::Collecting;
        let mut runs = 0;

        while state != State::Terminated {
            debug!(?state, "Session state");
            state = match state {
                State::Collecting => State::Confirming(get_filters(&mut self.console)?),
                State::Confirming(selection) => {
                    if confirm_filters(&mut self.console, &selection)? {
                        State::Reporting(selection)
                    } else {
                        info!("Filters rejected, collecting again");
                        State::Collecting
                    }
                }
                State::Reporting(selection) => {
                    runs += 1;
                    let _span = info_span!("run", run = runs, filters = %selection).entered();
                    let trips = load_data(&mut self.console, &self.data_dir, &selection)?;
                    report_all(self.console.out(), &trips)?;
                    State::RestartPrompt
                }
                State::RestartPrompt => {
                    if self.console.ask_lower(RESTART_PROMPT)? == "yes" {
                        State::Collecting
                    } else {
                        State::Terminated
                    }
                }
                State::Terminated => State::Terminated,
            };
        }

        info!(runs, "Session finished");
        Ok(runs)
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str, data_dir: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()),
            data_dir,
        )
    }

    #[test]
    fn test_rejected_confirmation_recollects_without_loading() {
        // The data directory does not exist, so any load attempt would fail;
        // input runs out on the second confirmation instead.
        let mut s = session("chicago\nall\nall\nno\nwashington\nmay\nmonday\n", "/no/such/dir");
        let err = s.run().unwrap_err();
        assert!(err.to_string().contains("end of input"));

        let out = String::from_utf8(s.into_console().into_output()).unwrap();
        assert_eq!(out.matches("Let's explore some US bikeshare data").count(), 2);
        assert!(out.contains("Washington in May during Monday"));
    }

    #[test]
    fn test_missing_data_file_is_fatal() {
        let mut s = session("chicago\nall\nall\n\n", "/no/such/dir");
        let err = s.run().unwrap_err();
        assert!(format!("{err:#}").contains("chicago.csv"));
    }
}
