//! Chart builders
//!
//! Each builder takes the loaded table, derives the slice it needs and returns
//! a [`Panel`]: a subheader plus a Plotly figure.

use serde::Serialize;

use super::error::{DashboardError, DashboardResult};
use super::figure::{
    Axis, ChoroplethTrace, ColorBar, Figure, Geo, Layout, Polar, RadialAxis, ScatterPolarTrace,
    ScatterTrace, Title, Trace,
};
use super::render::LatestYearPolicy;
use crate::data::columns::{LADDER_COLUMN, YEAR_COLUMN};
use crate::data::{HappinessTable, Indicator};

/// One titled chart on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub subheader: String,
    pub figure: Figure,
}

/// Ladder score over time for one country.
///
/// Rows are ordered by year, so the x values never decrease. A country with
/// no rows yields an empty line.
pub fn time_series(table: &HappinessTable, country: &str) -> Panel {
    let rows = table.country_series(country);
    tracing::debug!(country, points = rows.len(), "Building time series");

    let trace = ScatterTrace {
        x: rows.iter().map(|r| r.year).collect(),
        y: rows.iter().map(|r| r.ladder_score).collect(),
        mode: "lines+markers".to_string(),
        name: None,
    };

    let layout = Layout {
        xaxis: Some(Axis {
            title: Title::new(YEAR_COLUMN),
        }),
        yaxis: Some(Axis {
            title: Title::new(LADDER_COLUMN),
        }),
        ..Default::default()
    };

    Panel {
        subheader: format!("{country} - Happiness Score Over Time"),
        figure: Figure::new(Trace::Scatter(trace), layout),
    }
}

/// Six explained-by contributions for one country as a closed radar chart.
///
/// The snapshot year is the dataset's latest year. Under
/// [`LatestYearPolicy::Global`] a country without a row in that year is an
/// error; under [`LatestYearPolicy::CountryLatest`] the country's own most
/// recent year is used instead.
pub fn indicator_breakdown(
    table: &HappinessTable,
    country: &str,
    policy: LatestYearPolicy,
) -> DashboardResult<Panel> {
    let latest_year = table.latest_year();

    let record = match (table.record_for(country, latest_year), policy) {
        (Some(record), _) => record,
        (None, LatestYearPolicy::CountryLatest) => {
            let own_year = table.country_latest_year(country).ok_or_else(|| {
                DashboardError::NoRecordForYear {
                    country: country.to_string(),
                    year: latest_year,
                }
            })?;
            tracing::debug!(
                country,
                latest_year,
                own_year,
                "No record in latest year, using country's most recent year"
            );
            table
                .record_for(country, own_year)
                .ok_or_else(|| DashboardError::NoRecordForYear {
                    country: country.to_string(),
                    year: own_year,
                })?
        }
        (None, LatestYearPolicy::Global) => {
            return Err(DashboardError::NoRecordForYear {
                country: country.to_string(),
                year: latest_year,
            })
        }
    };

    let trace = ScatterPolarTrace {
        r: Indicator::ALL.iter().map(|i| record.indicator(*i)).collect(),
        theta: Indicator::ALL.iter().map(Indicator::label).collect(),
        fill: "toself".to_string(),
        name: country.to_string(),
    };

    let layout = Layout {
        polar: Some(Polar {
            radialaxis: RadialAxis { visible: true },
        }),
        showlegend: Some(false),
        ..Default::default()
    };

    Ok(Panel {
        subheader: format!("{country} - Indicator Breakdown ({})", record.year),
        figure: Figure::new(Trace::Scatterpolar(trace), layout),
    })
}

/// World choropleth of ladder scores for the latest year.
///
/// Regions are matched by country name; names plotly does not know are
/// dropped by the renderer.
pub fn world_map(table: &HappinessTable, color_scale: &str) -> Panel {
    let latest_year = table.latest_year();
    let rows = table.year_slice(latest_year);

    let trace = ChoroplethTrace {
        locations: rows.iter().map(|r| r.country.clone()).collect(),
        locationmode: "country names".to_string(),
        z: rows.iter().map(|r| r.ladder_score).collect(),
        hovertext: rows.iter().map(|r| r.country.clone()).collect(),
        colorscale: color_scale.to_string(),
        colorbar: ColorBar {
            title: Title::new(LADDER_COLUMN),
        },
    };

    let layout = Layout {
        geo: Some(Geo {
            showframe: false,
            showcoastlines: true,
        }),
        ..Default::default()
    };

    Panel {
        subheader: format!("World Happiness Map ({latest_year})"),
        figure: Figure::new(Trace::Choropleth(trace), layout),
    }
}
