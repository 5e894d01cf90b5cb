//! Core data types for the happiness dataset
//!
//! - `HappinessRecord`: one (country, year) row
//! - `HappinessTable`: the immutable loaded table and its derived views

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::columns::Indicator;
use super::error::{DataError, DataResult};

/// One row of the survey: a country's results for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HappinessRecord {
    pub country: String,
    pub year: i32,
    /// Overall happiness metric. `None` when the cell was blank.
    pub ladder_score: Option<f64>,
    pub explained_by_log_gdp_per_capita: Option<f64>,
    pub explained_by_social_support: Option<f64>,
    pub explained_by_healthy_life_expectancy: Option<f64>,
    pub explained_by_freedom_to_make_life_choices: Option<f64>,
    pub explained_by_generosity: Option<f64>,
    pub explained_by_perceptions_of_corruption: Option<f64>,
}

impl HappinessRecord {
    /// Create a record with no indicator values
    pub fn new(country: impl Into<String>, year: i32, ladder_score: Option<f64>) -> Self {
        Self {
            country: country.into(),
            year,
            ladder_score,
            explained_by_log_gdp_per_capita: None,
            explained_by_social_support: None,
            explained_by_healthy_life_expectancy: None,
            explained_by_freedom_to_make_life_choices: None,
            explained_by_generosity: None,
            explained_by_perceptions_of_corruption: None,
        }
    }

    /// Builder method: set one indicator value
    pub fn indicator_value(mut self, indicator: Indicator, value: Option<f64>) -> Self {
        *self.indicator_slot(indicator) = value;
        self
    }

    /// Builder method: set all six indicators in [`Indicator::ALL`] order
    pub fn indicators(mut self, values: [Option<f64>; 6]) -> Self {
        for (indicator, value) in Indicator::ALL.iter().zip(values) {
            *self.indicator_slot(*indicator) = value;
        }
        self
    }

    pub fn indicator(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::LogGdpPerCapita => self.explained_by_log_gdp_per_capita,
            Indicator::SocialSupport => self.explained_by_social_support,
            Indicator::HealthyLifeExpectancy => self.explained_by_healthy_life_expectancy,
            Indicator::FreedomToMakeLifeChoices => self.explained_by_freedom_to_make_life_choices,
            Indicator::Generosity => self.explained_by_generosity,
            Indicator::PerceptionsOfCorruption => self.explained_by_perceptions_of_corruption,
        }
    }

    fn indicator_slot(&mut self, indicator: Indicator) -> &mut Option<f64> {
        match indicator {
            Indicator::LogGdpPerCapita => &mut self.explained_by_log_gdp_per_capita,
            Indicator::SocialSupport => &mut self.explained_by_social_support,
            Indicator::HealthyLifeExpectancy => &mut self.explained_by_healthy_life_expectancy,
            Indicator::FreedomToMakeLifeChoices => {
                &mut self.explained_by_freedom_to_make_life_choices
            }
            Indicator::Generosity => &mut self.explained_by_generosity,
            Indicator::PerceptionsOfCorruption => &mut self.explained_by_perceptions_of_corruption,
        }
    }
}

/// The loaded survey table.
///
/// Immutable once built. All views borrow from it and are recomputed per render.
#[derive(Debug, Clone)]
pub struct HappinessTable {
    source: PathBuf,
    columns: Vec<String>,
    records: Vec<HappinessRecord>,
    latest_year: i32,
    loaded_at: DateTime<Utc>,
}

impl HappinessTable {
    /// Build a table from parsed records.
    ///
    /// Fails with [`DataError::EmptyDataset`] when there are no records, since
    /// the latest year would be undefined.
    pub fn new(
        source: impl Into<PathBuf>,
        columns: Vec<String>,
        records: Vec<HappinessRecord>,
    ) -> DataResult<Self> {
        let source = source.into();
        let latest_year = records
            .iter()
            .map(|r| r.year)
            .max()
            .ok_or_else(|| DataError::EmptyDataset(source.clone()))?;

        Ok(Self {
            source,
            columns,
            records,
            latest_year,
            loaded_at: Utc::now(),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Normalized column names, in sheet order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[HappinessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Maximum year across the whole dataset
    pub fn latest_year(&self) -> i32 {
        self.latest_year
    }

    /// Earliest and latest year present
    pub fn year_span(&self) -> (i32, i32) {
        let first = self
            .records
            .iter()
            .map(|r| r.year)
            .min()
            .unwrap_or(self.latest_year);
        (first, self.latest_year)
    }

    /// Sorted, de-duplicated country names
    pub fn countries(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// All rows for a country, ordered by year ascending
    pub fn country_series(&self, country: &str) -> Vec<&HappinessRecord> {
        let mut rows: Vec<&HappinessRecord> = self
            .records
            .iter()
            .filter(|r| r.country == country)
            .collect();
        rows.sort_by_key(|r| r.year);
        rows
    }

    /// All rows for one year, in sheet order
    pub fn year_slice(&self, year: i32) -> Vec<&HappinessRecord> {
        self.records.iter().filter(|r| r.year == year).collect()
    }

    /// First row matching (country, year)
    pub fn record_for(&self, country: &str, year: i32) -> Option<&HappinessRecord> {
        self.records
            .iter()
            .find(|r| r.country == country && r.year == year)
    }

    /// Most recent year with data for a country
    pub fn country_latest_year(&self, country: &str) -> Option<i32> {
        self.records
            .iter()
            .filter(|r| r.country == country)
            .map(|r| r.year)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> HappinessTable {
        let records = vec![
            HappinessRecord::new("Finland", 2023, Some(7.8)),
            HappinessRecord::new("Denmark", 2022, Some(7.6)),
            HappinessRecord::new("Finland", 2022, Some(7.7)),
            HappinessRecord::new("Afghanistan", 2021, Some(2.4)),
            HappinessRecord::new("Denmark", 2023, Some(7.5)),
        ];
        HappinessTable::new("test.csv", Vec::new(), records).unwrap()
    }

    #[test]
    fn test_latest_year_is_global_maximum() {
        let table = sample_table();
        assert_eq!(table.latest_year(), 2023);
        assert_eq!(table.country_latest_year("Afghanistan"), Some(2021));
        assert_eq!(table.year_span(), (2021, 2023));
    }

    #[test]
    fn test_countries_sorted_and_unique() {
        let table = sample_table();
        assert_eq!(table.countries(), vec!["Afghanistan", "Denmark", "Finland"]);
    }

    #[test]
    fn test_country_series_sorted_by_year() {
        let table = sample_table();
        let series = table.country_series("Finland");
        let years: Vec<i32> = series.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2022, 2023]);
        assert!(table.country_series("Narnia").is_empty());
    }

    #[test]
    fn test_year_slice_and_lookup() {
        let table = sample_table();
        let slice = table.year_slice(2023);
        assert_eq!(slice.len(), 2);
        assert!(table.record_for("Afghanistan", 2023).is_none());
        assert_eq!(
            table.record_for("Denmark", 2023).and_then(|r| r.ladder_score),
            Some(7.5)
        );
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let result = HappinessTable::new("empty.csv", Vec::new(), Vec::new());
        assert!(matches!(result, Err(DataError::EmptyDataset(_))));
    }

    #[test]
    fn test_indicator_builder() {
        let record = HappinessRecord::new("Finland", 2023, Some(7.8))
            .indicators([Some(1.9), Some(1.5), Some(0.8), Some(0.7), Some(0.1), Some(0.5)])
            .indicator_value(Indicator::Generosity, Some(0.2));

        assert_eq!(record.indicator(Indicator::LogGdpPerCapita), Some(1.9));
        assert_eq!(record.indicator(Indicator::Generosity), Some(0.2));
        assert_eq!(record.indicator(Indicator::PerceptionsOfCorruption), Some(0.5));
    }
}
