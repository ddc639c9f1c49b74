//! Chart themes
//!
//! The five graph styles offered in the sidebar. A theme only changes how a
//! figure looks: each one maps to a Plotly layout template.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Graph style selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "plotly_dark")]
    PlotlyDark,
    #[serde(rename = "ggplot2")]
    Ggplot2,
    #[serde(rename = "seaborn")]
    Seaborn,
    #[serde(rename = "plotly_white")]
    PlotlyWhite,
    /// No template, Plotly's built-in defaults
    #[serde(rename = "none")]
    Bare,
}

impl Theme {
    /// All themes, in sidebar order
    pub fn all() -> &'static [Theme] {
        &[
            Theme::PlotlyDark,
            Theme::Ggplot2,
            Theme::Seaborn,
            Theme::PlotlyWhite,
            Theme::Bare,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::PlotlyDark => "plotly_dark",
            Theme::Ggplot2 => "ggplot2",
            Theme::Seaborn => "seaborn",
            Theme::PlotlyWhite => "plotly_white",
            Theme::Bare => "none",
        }
    }

    /// Layout template, `None` for the bare theme
    pub fn template(&self) -> Option<Template> {
        let template = match self {
            Theme::PlotlyDark => Template {
                layout: TemplateLayout {
                    paper_bgcolor: "rgb(17,17,17)",
                    plot_bgcolor: "rgb(17,17,17)",
                    font: Font { color: "#f2f5fa" },
                    colorway: PLOTLY_COLORWAY.to_vec(),
                    xaxis: AxisStyle::grid("#283442"),
                    yaxis: AxisStyle::grid("#283442"),
                    geo: GeoStyle {
                        bgcolor: "rgb(17,17,17)",
                        landcolor: "rgb(17,17,17)",
                        lakecolor: "rgb(17,17,17)",
                        subunitcolor: "#506784",
                        showland: true,
                        showlakes: true,
                    },
                },
            },
            Theme::Ggplot2 => Template {
                layout: TemplateLayout {
                    paper_bgcolor: "white",
                    plot_bgcolor: "rgb(237,237,237)",
                    font: Font { color: "rgb(51,51,51)" },
                    colorway: vec!["#F8766D", "#A3A500", "#00BF7D", "#00B0F6", "#E76BF3"],
                    xaxis: AxisStyle::grid("white"),
                    yaxis: AxisStyle::grid("white"),
                    geo: GeoStyle {
                        bgcolor: "white",
                        landcolor: "rgb(237,237,237)",
                        lakecolor: "white",
                        subunitcolor: "white",
                        showland: true,
                        showlakes: true,
                    },
                },
            },
            Theme::Seaborn => Template {
                layout: TemplateLayout {
                    paper_bgcolor: "white",
                    plot_bgcolor: "rgb(234,234,242)",
                    font: Font { color: "rgb(36,36,36)" },
                    colorway: vec![
                        "rgb(76,114,176)",
                        "rgb(221,132,82)",
                        "rgb(85,168,104)",
                        "rgb(196,78,82)",
                        "rgb(129,114,179)",
                        "rgb(147,120,96)",
                        "rgb(218,139,195)",
                        "rgb(140,140,140)",
                        "rgb(204,185,116)",
                        "rgb(100,181,205)",
                    ],
                    xaxis: AxisStyle::grid("white"),
                    yaxis: AxisStyle::grid("white"),
                    geo: GeoStyle {
                        bgcolor: "white",
                        landcolor: "rgb(234,234,242)",
                        lakecolor: "white",
                        subunitcolor: "white",
                        showland: true,
                        showlakes: true,
                    },
                },
            },
            Theme::PlotlyWhite => Template {
                layout: TemplateLayout {
                    paper_bgcolor: "white",
                    plot_bgcolor: "white",
                    font: Font { color: "#2a3f5f" },
                    colorway: PLOTLY_COLORWAY.to_vec(),
                    xaxis: AxisStyle::grid("#EBF0F8"),
                    yaxis: AxisStyle::grid("#EBF0F8"),
                    geo: GeoStyle {
                        bgcolor: "white",
                        landcolor: "white",
                        lakecolor: "white",
                        subunitcolor: "#C8D4E3",
                        showland: true,
                        showlakes: true,
                    },
                },
            },
            Theme::Bare => return None,
        };
        Some(template)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Invalid theme: {}. Use plotly_dark, ggplot2, seaborn, plotly_white, or none",
                    s
                )
            })
    }
}

const PLOTLY_COLORWAY: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// A Plotly layout template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub layout: TemplateLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLayout {
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
    pub font: Font,
    pub colorway: Vec<&'static str>,
    pub xaxis: AxisStyle,
    pub yaxis: AxisStyle,
    pub geo: GeoStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisStyle {
    pub gridcolor: &'static str,
    pub zerolinecolor: &'static str,
    pub linecolor: &'static str,
}

impl AxisStyle {
    fn grid(color: &'static str) -> Self {
        Self {
            gridcolor: color,
            zerolinecolor: color,
            linecolor: color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoStyle {
    pub bgcolor: &'static str,
    pub landcolor: &'static str,
    pub lakecolor: &'static str,
    pub subunitcolor: &'static str,
    pub showland: bool,
    pub showlakes: bool,
}
