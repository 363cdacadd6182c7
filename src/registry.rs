//! Static mapping from city to the CSV file holding its trip records.

use std::fmt;
use std::path::{Path, PathBuf};

/// One of the cities with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

/// Lookup table: (city, lower-case key, title-cased name, file name).
static CITY_DATA: &[(City, &str, &str, &str)] = &[
    (City::Chicago, "chicago", "Chicago", "chicago.csv"),
    (
        City::NewYorkCity,
        "new york city",
        "New York City",
        "new_york_city.csv",
    ),
    (City::Washington, "washington", "Washington", "washington.csv"),
];

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    fn index(self) -> usize {
        match self {
            City::Chicago => 0,
            City::NewYorkCity => 1,
            City::Washington => 2,
        }
    }

    /// Resolves a lower-case key such as `"new york city"`.
    pub fn from_key(key: &str) -> Option<City> {
        CITY_DATA
            .iter()
            .find(|(_, k, ..)| *k == key)
            .map(|(city, ..)| *city)
    }

    pub fn key(self) -> &'static str {
        CITY_DATA[self.index()].1
    }

    pub fn display_name(self) -> &'static str {
        CITY_DATA[self.index()].2
    }

    pub fn file_name(self) -> &'static str {
        CITY_DATA[self.index()].3
    }

    /// Path of the city's source file inside `data_dir`.
    pub fn data_path(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_known_cities() {
        assert_eq!(City::from_key("chicago"), Some(City::Chicago));
        assert_eq!(City::from_key("new york city"), Some(City::NewYorkCity));
        assert_eq!(City::from_key("washington"), Some(City::Washington));
    }

    #[test]
    fn test_from_key_rejects_unknown_and_mixed_case() {
        assert_eq!(City::from_key("boston"), None);
        assert_eq!(City::from_key("Chicago"), None);
        assert_eq!(City::from_key(""), None);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(City::Chicago.file_name(), "chicago.csv");
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
        assert_eq!(City::Washington.file_name(), "washington.csv");
    }

    #[test]
    fn test_data_path_joins_dir() {
        let path = City::Washington.data_path(Path::new("data"));
        assert_eq!(path, Path::new("data").join("washington.csv"));
    }

    #[test]
    fn test_table_order_matches_variants() {
        for (city, ..) in CITY_DATA {
            assert_eq!(CITY_DATA[city.index()].0, *city);
        }
    }

    #[test]
    fn test_every_city_round_trips_through_key() {
        for city in City::ALL {
            assert_eq!(City::from_key(city.key()), Some(city));
        }
        assert_eq!(City::NewYorkCity.to_string(), "New York City");
    }
}
