//! Column naming
//!
//! Header normalization and the fixed set of explained-by indicators.
//!
//! Raw headers such as `"Explained by: Log GDP per capita"` become
//! `"explained_by_log_gdp_per_capita"`: lowercase, spaces to underscores,
//! colons removed, `+` replaced with [`PLUS_TOKEN`].

use serde::Serialize;
use std::collections::HashMap;

/// Replacement for `+` in normalized column names
pub const PLUS_TOKEN: &str = "_plus_";

/// Prefix shared by all indicator columns after normalization
pub const INDICATOR_PREFIX: &str = "explained_by_";

pub const COUNTRY_COLUMN: &str = "country_name";
pub const YEAR_COLUMN: &str = "year";
pub const LADDER_COLUMN: &str = "ladder_score";

/// Normalize a single header label
pub fn normalize_column_name(raw: &str) -> String {
    raw.to_lowercase()
        .replace(' ', "_")
        .replace(':', "")
        .replace('+', PLUS_TOKEN)
}

/// Normalize every header label, preserving column order
pub fn normalize_headers<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter().map(|h| normalize_column_name(h.as_ref())).collect()
}

/// Lookup from normalized column name to column position.
///
/// When two source columns normalize to the same name the rightmost one wins.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn new(headers: &[String]) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            if let Some(previous) = positions.insert(name.clone(), idx) {
                tracing::warn!(
                    column = %name,
                    previous,
                    current = idx,
                    "Normalized column name collision, using rightmost column"
                );
            }
        }
        Self { positions }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn require(&self, name: &str) -> super::DataResult<usize> {
        self.get(name)
            .ok_or_else(|| super::DataError::MissingColumn(name.to_string()))
    }
}

/// One of the six explained-by contributions to the ladder score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    LogGdpPerCapita,
    SocialSupport,
    HealthyLifeExpectancy,
    FreedomToMakeLifeChoices,
    Generosity,
    PerceptionsOfCorruption,
}

impl Indicator {
    /// All indicators in radar-chart order
    pub const ALL: [Indicator; 6] = [
        Indicator::LogGdpPerCapita,
        Indicator::SocialSupport,
        Indicator::HealthyLifeExpectancy,
        Indicator::FreedomToMakeLifeChoices,
        Indicator::Generosity,
        Indicator::PerceptionsOfCorruption,
    ];

    /// Normalized column name holding this indicator
    pub fn column(&self) -> &'static str {
        match self {
            Indicator::LogGdpPerCapita => "explained_by_log_gdp_per_capita",
            Indicator::SocialSupport => "explained_by_social_support",
            Indicator::HealthyLifeExpectancy => "explained_by_healthy_life_expectancy",
            Indicator::FreedomToMakeLifeChoices => "explained_by_freedom_to_make_life_choices",
            Indicator::Generosity => "explained_by_generosity",
            Indicator::PerceptionsOfCorruption => "explained_by_perceptions_of_corruption",
        }
    }

    /// Axis label, e.g. `"Log Gdp Per Capita"`
    pub fn label(&self) -> String {
        indicator_label(self.column())
    }
}

/// Turn an indicator column name into a display label.
///
/// Strips [`INDICATOR_PREFIX`], turns underscores into spaces and title-cases
/// every word. Only the first letter of a word keeps upper case, so `gdp`
/// becomes `Gdp`.
pub fn indicator_label(column: &str) -> String {
    let stripped = column.replacen(INDICATOR_PREFIX, "", 1).replace('_', " ");
    title_case(&stripped)
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(ch);
            prev_is_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Country Name"), "country_name");
        assert_eq!(normalize_column_name("Ladder Score"), "ladder_score");
        assert_eq!(
            normalize_column_name("Explained by: Log GDP per capita"),
            "explained_by_log_gdp_per_capita"
        );
        assert_eq!(
            normalize_column_name("Dystopia + residual"),
            "dystopia__plus__residual"
        );
    }

    #[test]
    fn test_normalized_headers_have_no_reserved_characters() {
        let raw = [
            "Country Name",
            "Year",
            "Ladder Score",
            "upperwhisker: high",
            "Dystopia + residual",
            "Explained by: Freedom to make life choices",
            "A:B+C D",
        ];

        for name in normalize_headers(&raw) {
            assert!(!name.contains(' '), "{name} contains a space");
            assert!(!name.contains(':'), "{name} contains a colon");
            assert!(!name.contains('+'), "{name} contains a plus");
        }
    }

    #[test]
    fn test_column_index_collision_is_last_write_wins() {
        let headers = normalize_headers(&["Year", "year", "Country Name"]);
        let index = ColumnIndex::new(&headers);

        assert_eq!(index.get("year"), Some(1));
        assert_eq!(index.get("country_name"), Some(2));
        assert!(matches!(
            index.require("ladder_score"),
            Err(crate::data::DataError::MissingColumn(name)) if name == "ladder_score"
        ));
    }

    #[test]
    fn test_indicator_labels() {
        let labels: Vec<String> = Indicator::ALL.iter().map(|i| i.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Log Gdp Per Capita",
                "Social Support",
                "Healthy Life Expectancy",
                "Freedom To Make Life Choices",
                "Generosity",
                "Perceptions Of Corruption",
            ]
        );
    }

    #[test]
    fn test_indicator_columns_match_normalized_headers() {
        assert_eq!(
            normalize_column_name("Explained by: Healthy life expectancy"),
            Indicator::HealthyLifeExpectancy.column()
        );
        assert_eq!(
            normalize_column_name("Explained by: Perceptions of corruption"),
            Indicator::PerceptionsOfCorruption.column()
        );
    }
}
