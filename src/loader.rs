//! Reads a city's CSV file, offers raw-row paging, and produces the filtered
//! [`TripCollection`].

use std::io::{BufRead, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;
use tracing::{debug, info};

use crate::console::Console;
use crate::filters::FilterSelection;
use crate::trips::TripCollection;

/// Rows shown per raw-data page.
pub const PAGE_SIZE: usize = 5;

const FIRST_PAGE_PROMPT: &str =
    "\nWould you like to see the first 5 rows of raw data? Enter yes or no: ";
const NEXT_PAGE_PROMPT: &str = "Would you like to see the next 5 rows of raw data? Enter yes or no: ";

/// The unfiltered file contents, kept as raw CSV records.
#[derive(Debug, Clone)]
pub struct RawDataset {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl RawDataset {
    /// Reads the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error naming `path` if it cannot be opened or is not valid CSV.
    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open data file {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("failed to read {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();
        let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { headers, records })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows `[start, start + PAGE_SIZE)`, clipped to the end of the data.
    pub fn page(&self, start: usize) -> &[StringRecord] {
        let start = start.min(self.records.len());
        let end = (start + PAGE_SIZE).min(self.records.len());
        &self.records[start..end]
    }

    /// Renders the header line followed by the page starting at `start`,
    /// each row prefixed with its position.
    pub fn format_page(&self, start: usize) -> String {
        let mut text = format!("{:>8}  {}\n", "", join_fields(&self.headers));
        for (offset, record) in self.page(start).iter().enumerate() {
            text.push_str(&format!("{:>8}  {}\n", start + offset, join_fields(record)));
        }
        text
    }
}

fn join_fields(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(" | ")
}

/// Shows raw rows five at a time while the user keeps answering `yes`.
///
/// Every printed page is followed by another question; paging stops on any
/// answer other than `yes`, or after that answer once every row has been
/// shown. Returns the number of rows printed.
pub fn page_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    dataset: &RawDataset,
) -> Result<usize> {
    let mut shown = 0;
    let mut answer = console.ask_lower(FIRST_PAGE_PROMPT)?;

    while answer == "yes" && shown < dataset.len() {
        write!(console.out(), "{}", dataset.format_page(shown))?;
        shown += dataset.page(shown).len();
        answer = console.ask_lower(NEXT_PAGE_PROMPT)?;
    }

    console.separator()?;
    debug!(shown, total = dataset.len(), "Raw data paging finished");
    Ok(shown)
}

/// Loads the selected city's trips, offering raw-row paging first, then
/// derives time fields and applies the month/day filter.
///
/// # Errors
///
/// Fails if the file is missing or malformed, or if input runs out.
#[tracing::instrument(skip(console, data_dir), fields(city = %selection.city, data_dir = %data_dir.display()))]
pub fn load_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data_dir: &Path,
    selection: &FilterSelection,
) -> Result<TripCollection> {
    let path = selection.city.data_path(data_dir);
    let dataset = RawDataset::read(&path)?;
    info!(path = %path.display(), rows = dataset.len(), "Dataset loaded");

    page_raw_data(console, &dataset)?;

    let mut trips = TripCollection::from_records(dataset.headers(), dataset.records())
        .with_context(|| format!("failed to parse trips in {}", path.display()))?;
    trips.apply(selection);
    info!(
        month = %selection.month,
        day = %selection.day,
        matching = trips.len(),
        "Filters applied"
    );

    Ok(trips)
}
