//! Country selector
//!
//! Single-choice control over the sorted, de-duplicated country names.
//! The first option is selected until the user picks another one.

use serde::Serialize;

use super::error::{DashboardError, DashboardResult};
use crate::data::HappinessTable;

pub const SIDEBAR_TITLE: &str = "🌍 Country Selector";
pub const SELECT_LABEL: &str = "Select a Country";

/// Closed set of country options plus the current choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySelector {
    options: Vec<String>,
    selected: usize,
}

impl CountrySelector {
    pub fn from_table(table: &HappinessTable) -> Self {
        // A loaded table always has at least one record, hence one country
        Self {
            options: table.countries(),
            selected: 0,
        }
    }

    /// Selector over `table` with a previously persisted choice applied
    pub fn restore(table: &HappinessTable, persisted: Option<&str>) -> DashboardResult<Self> {
        let mut selector = Self::from_table(table);
        if let Some(country) = persisted {
            selector.select(country)?;
        }
        Ok(selector)
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Change the selection. Names outside the option set are rejected.
    pub fn select(&mut self, country: &str) -> DashboardResult<()> {
        let idx = self
            .options
            .binary_search_by(|o| o.as_str().cmp(country))
            .map_err(|_| DashboardError::UnknownCountry(country.to_string()))?;
        self.selected = idx;
        Ok(())
    }

    pub fn selected(&self) -> &str {
        &self.options[self.selected]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HappinessRecord;

    fn table() -> HappinessTable {
        HappinessTable::new(
            "t.csv",
            Vec::new(),
            vec![
                HappinessRecord::new("Finland", 2023, Some(7.8)),
                HappinessRecord::new("Denmark", 2023, Some(7.5)),
                HappinessRecord::new("Finland", 2022, Some(7.7)),
                HappinessRecord::new("Afghanistan", 2021, Some(2.4)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_options_sorted_and_deduplicated() {
        let selector = CountrySelector::from_table(&table());
        assert_eq!(selector.options(), ["Afghanistan", "Denmark", "Finland"]);
        assert_eq!(selector.selected(), "Afghanistan");
    }

    #[test]
    fn test_select_known_country() {
        let mut selector = CountrySelector::from_table(&table());
        selector.select("Finland").unwrap();
        assert_eq!(selector.selected(), "Finland");
    }

    #[test]
    fn test_select_unknown_country_keeps_selection() {
        let mut selector = CountrySelector::from_table(&table());
        selector.select("Denmark").unwrap();

        let err = selector.select("Atlantis").unwrap_err();
        assert!(matches!(err, DashboardError::UnknownCountry(ref c) if c == "Atlantis"));
        assert_eq!(selector.selected(), "Denmark");
    }

    #[test]
    fn test_restore_persisted_selection() {
        let table = table();
        let selector = CountrySelector::restore(&table, Some("Denmark")).unwrap();
        assert_eq!(selector.selected(), "Denmark");

        let selector = CountrySelector::restore(&table, None).unwrap();
        assert_eq!(selector.selected(), "Afghanistan");

        assert!(CountrySelector::restore(&table, Some("Atlantis")).is_err());
    }
}
