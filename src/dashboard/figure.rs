//! Plotly figure model
//!
//! Serializes to the `{ "data": [...], "layout": {...} }` shape that
//! `Plotly.newPlot` accepts, covering only the trace and layout attributes
//! the dashboard uses.

use serde::Serialize;

/// A complete chart: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(trace: Trace, layout: Layout) -> Self {
        Self {
            data: vec![trace],
            layout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Scatterpolar(ScatterPolarTrace),
    Choropleth(ChoroplethTrace),
}

/// Cartesian line/marker trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<i32>,
    pub y: Vec<Option<f64>>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Radial (spider) trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPolarTrace {
    pub r: Vec<Option<f64>>,
    pub theta: Vec<String>,
    pub fill: String,
    pub name: String,
}

/// Filled-region map trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    pub locations: Vec<String>,
    pub locationmode: String,
    pub z: Vec<Option<f64>>,
    /// Hover label per region
    pub hovertext: Vec<String>,
    pub colorscale: String,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialAxis {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polar {
    pub radialaxis: RadialAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geo {
    pub showframe: bool,
    pub showcoastlines: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<Polar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}
