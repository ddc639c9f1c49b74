//! Plotly.js figure model
//!
//! Only the subset of the Plotly schema the dashboard emits. Empty vectors
//! and `None` fields are left out of the JSON so Plotly applies its defaults.

use serde::Serialize;
use serde_json::Value;

use super::theme::Template;

/// A complete figure: `Plotly.react(div, fig.data, fig.layout)` plus frames
#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
}

/// Plotly trace type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Bar,
    Scatter,
    Scattergeo,
    Choropleth,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub z: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hovertext: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coloraxis: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl Trace {
    pub fn new(kind: TraceKind) -> Self {
        Self {
            kind,
            name: None,
            x: Vec::new(),
            y: Vec::new(),
            locations: Vec::new(),
            z: Vec::new(),
            hovertext: Vec::new(),
            mode: None,
            marker: None,
            coloraxis: None,
            showlegend: None,
        }
    }

    /// Bar trace over dates
    pub fn bar(name: &str, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            name: Some(name.to_string()),
            x,
            y,
            ..Self::new(TraceKind::Bar)
        }
    }

    /// Line trace over dates
    pub fn line(name: &str, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            name: Some(name.to_string()),
            x,
            y,
            mode: Some("lines"),
            ..Self::new(TraceKind::Scatter)
        }
    }

    /// Marker-only scatter trace
    pub fn markers(name: &str, x: Vec<String>, y: Vec<f64>, marker: Marker) -> Self {
        Self {
            name: Some(name.to_string()),
            x,
            y,
            mode: Some("markers"),
            marker: Some(marker),
            ..Self::new(TraceKind::Scatter)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Fixed(&'static str),
    Scale(Vec<f64>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MarkerSize {
    Fixed(f64),
    Scale(Vec<f64>),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<MarkerSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coloraxis: Option<&'static str>,
}

/// `[[0.0, "#0d0887"], ..., [1.0, "#f0f921"]]`
pub type ColorScale = Vec<(f64, &'static str)>;

/// Evenly spread a list of colours over [0, 1]
pub fn color_scale(colors: &[&'static str]) -> ColorScale {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| (i as f64 / last, *c))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
}

impl Axis {
    pub fn titled(text: &str) -> Self {
        Self {
            title: Title::new(text),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorAxis {
    pub colorscale: ColorScale,
    pub colorbar: ColorBar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmax: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coloraxis: Option<ColorAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sliders: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updatemenus: Vec<Value>,
}

/// One animation frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub name: String,
    pub data: Vec<Trace>,
}
