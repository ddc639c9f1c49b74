//! World charts built from the full table
//!
//! - `spread_chart`: animated scatter-geo, one frame per date
//! - `world_map`: choropleth of the most recent date

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::json;

use crate::dataset::{Observation, ObservationTable};

use super::figure::{
    color_scale, ColorAxis, ColorBar, Figure, Frame, Layout, Marker, MarkerColor, MarkerSize,
    Title, Trace, TraceKind,
};
use super::theme::Theme;

pub const SPREAD_TITLE: &str = "Top 10 Worst-hit Countries Over Time";
pub const WORLD_MAP_TITLE: &str = "COVID-19 Cases Worldwide";

/// Largest marker diameter in pixels
const SIZE_MAX: f64 = 20.0;

/// Plotly's sequential "Plasma" scale
const PLASMA: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

fn total_cases_axis(cmin: Option<f64>, cmax: Option<f64>) -> ColorAxis {
    ColorAxis {
        colorscale: color_scale(&PLASMA),
        colorbar: ColorBar {
            title: Title::new("total_cases"),
        },
        cmin,
        cmax,
    }
}

/// Rows grouped by known date, ascending
fn rows_by_date(table: &ObservationTable) -> BTreeMap<NaiveDate, Vec<&Observation>> {
    let mut frames: BTreeMap<NaiveDate, Vec<&Observation>> = BTreeMap::new();
    for row in table.rows() {
        if let Some(date) = row.date {
            frames.entry(date).or_default().push(row);
        }
    }
    frames
}

fn scatter_geo(rows: &[&Observation], sizeref: f64) -> Trace {
    let cases: Vec<f64> = rows.iter().map(|r| r.total_cases).collect();
    Trace {
        locations: rows.iter().map(|r| r.iso_code.clone()).collect(),
        hovertext: rows.iter().map(|r| r.location.clone()).collect(),
        mode: Some("markers"),
        marker: Some(Marker {
            color: Some(MarkerColor::Scale(cases.clone())),
            size: Some(MarkerSize::Scale(cases)),
            sizemode: Some("area"),
            sizeref: Some(sizeref),
            coloraxis: Some("coloraxis"),
        }),
        showlegend: Some(false),
        ..Trace::new(TraceKind::Scattergeo)
    }
}

/// Animated scatter-geo over every distinct date of the full table
///
/// Marker area and colour follow `total_cases`. The colour range and marker
/// scale are fixed across frames so frames stay comparable.
pub fn spread_chart(table: &ObservationTable, theme: Theme) -> Figure {
    let by_date = rows_by_date(table);

    let (cmin, cmax) = table
        .rows()
        .iter()
        .filter(|r| r.date.is_some())
        .map(|r| r.total_cases)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let sizeref = if cmax > 0.0 {
        2.0 * cmax / (SIZE_MAX * SIZE_MAX)
    } else {
        1.0
    };

    let frames: Vec<Frame> = by_date
        .iter()
        .map(|(date, rows)| Frame {
            name: date.format("%Y-%m-%d").to_string(),
            data: vec![scatter_geo(rows, sizeref)],
        })
        .collect();

    let data = frames
        .first()
        .map(|f| f.data.clone())
        .unwrap_or_else(|| vec![scatter_geo(&[], sizeref)]);

    let (sliders, updatemenus) = if frames.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        animation_controls(&frames)
    };

    let color_range = cmax.is_finite().then_some((cmin, cmax));
    Figure {
        data,
        layout: Layout {
            title: Some(Title::new(SPREAD_TITLE)),
            coloraxis: Some(total_cases_axis(
                color_range.map(|r| r.0),
                color_range.map(|r| r.1),
            )),
            template: theme.template(),
            sliders,
            updatemenus,
            ..Default::default()
        },
        frames,
    }
}

/// Date slider plus play/pause buttons
fn animation_controls(frames: &[Frame]) -> (Vec<serde_json::Value>, Vec<serde_json::Value>) {
    let steps: Vec<_> = frames
        .iter()
        .map(|f| {
            json!({
                "args": [[f.name], {
                    "frame": { "duration": 0, "redraw": true },
                    "mode": "immediate",
                    "fromcurrent": true,
                    "transition": { "duration": 0, "easing": "linear" }
                }],
                "label": f.name,
                "method": "animate"
            })
        })
        .collect();

    let slider = json!({
        "active": 0,
        "currentvalue": { "prefix": "animation_frame=" },
        "len": 0.9,
        "pad": { "b": 10, "t": 60 },
        "x": 0.1,
        "xanchor": "left",
        "y": 0,
        "yanchor": "top",
        "steps": steps
    });

    let buttons = json!({
        "type": "buttons",
        "direction": "left",
        "showactive": false,
        "pad": { "r": 10, "t": 70 },
        "x": 0.1,
        "xanchor": "right",
        "y": 0,
        "yanchor": "top",
        "buttons": [
            {
                "label": "&#9654;",
                "method": "animate",
                "args": [null, {
                    "frame": { "duration": 500, "redraw": true },
                    "mode": "immediate",
                    "fromcurrent": true,
                    "transition": { "duration": 500, "easing": "linear" }
                }]
            },
            {
                "label": "&#9724;",
                "method": "animate",
                "args": [[null], {
                    "frame": { "duration": 0, "redraw": true },
                    "mode": "immediate",
                    "fromcurrent": true,
                    "transition": { "duration": 0, "easing": "linear" }
                }]
            }
        ]
    });

    (vec![slider], vec![buttons])
}

/// Choropleth of `total_cases` on the most recent date in the table
pub fn world_map(table: &ObservationTable, theme: Theme) -> Figure {
    let rows: Vec<&Observation> = match table.latest_date() {
        Some(latest) => table
            .rows()
            .iter()
            .filter(|r| r.date == Some(latest))
            .collect(),
        None => Vec::new(),
    };

    let trace = Trace {
        locations: rows.iter().map(|r| r.iso_code.clone()).collect(),
        z: rows.iter().map(|r| r.total_cases).collect(),
        hovertext: rows.iter().map(|r| r.location.clone()).collect(),
        coloraxis: Some("coloraxis"),
        ..Trace::new(TraceKind::Choropleth)
    };

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some(Title::new(WORLD_MAP_TITLE)),
            coloraxis: Some(total_cases_axis(None, None)),
            template: theme.template(),
            ..Default::default()
        },
        frames: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample_table;

    #[test]
    fn test_one_frame_per_distinct_date() {
        let table = sample_table();
        let fig = spread_chart(&table, Theme::PlotlyDark);

        assert_eq!(fig.frames.len(), table.dates().len());
        assert_eq!(fig.frames[0].name, "2021-03-01");
        assert_eq!(fig.frames.last().unwrap().name, "2021-03-07");

        // 03-06: Chile and the dated Kosovo row
        let frame = fig.frames.iter().find(|f| f.name == "2021-03-06").unwrap();
        assert_eq!(frame.data[0].locations, vec!["CHL", "OWID_KOS"]);

        let steps = fig.layout.sliders[0]["steps"].as_array().unwrap();
        assert_eq!(steps.len(), fig.frames.len());
    }

    #[test]
    fn test_spread_color_range_covers_full_table() {
        let fig = spread_chart(&sample_table(), Theme::Ggplot2);
        let axis = fig.layout.coloraxis.unwrap();

        assert_eq!(axis.cmin, Some(0.0));
        assert_eq!(axis.cmax, Some(150000.0));
    }

    #[test]
    fn test_world_map_uses_latest_date_only() {
        let fig = world_map(&sample_table(), Theme::Seaborn);
        let trace = &fig.data[0];

        assert_eq!(trace.kind, TraceKind::Choropleth);
        assert_eq!(trace.locations, vec!["CHL", "NRU", "OWID_WRL"]);
        assert_eq!(trace.z, vec![8700.0, 0.0, 150000.0]);
        assert!(fig.frames.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let table = ObservationTable::default();

        let fig = spread_chart(&table, Theme::Bare);
        assert!(fig.frames.is_empty());
        assert_eq!(fig.data.len(), 1);
        assert!(fig.layout.sliders.is_empty());

        let fig = world_map(&table, Theme::Bare);
        assert!(fig.data[0].z.is_empty());
    }
}
