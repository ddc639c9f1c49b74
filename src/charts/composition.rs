//! Stacked composition chart: new cases, "recovered" and deaths per day

use crate::dataset::Observation;

use super::figure::{Axis, Figure, Layout, Legend, Title, Trace};
use super::theme::Theme;

pub const COMPOSITION_TITLE: &str = "Active Cases vs. Recovered vs. Deaths";

/// Series stacked on each date, bottom to top
const SERIES: [(&str, fn(&Observation) -> f64); 3] = [
    ("new_cases", |o| o.new_cases),
    ("recovered", Observation::recovered),
    ("total_deaths", |o| o.total_deaths),
];

/// Build the stacked bar chart for a country's date-ordered rows
pub fn composition_chart(rows: &[Observation], theme: Theme) -> Figure {
    let dates: Vec<String> = rows.iter().map(Observation::date_label).collect();

    let data = SERIES
        .iter()
        .map(|(name, value)| Trace::bar(name, dates.clone(), rows.iter().map(value).collect()))
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Some(Title::new(COMPOSITION_TITLE)),
            xaxis: Some(Axis::titled("Date")),
            yaxis: Some(Axis::titled("Cases")),
            barmode: Some("stack"),
            legend: Some(Legend {
                title: Title::new("variable"),
            }),
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
    use crate::selection::country_rows;

    #[test]
    fn test_three_stacked_series() {
        let rows = country_rows(&sample_table(), "Chile");
        let fig = composition_chart(&rows, Theme::Seaborn);

        assert_eq!(fig.data.len(), 3);
        assert_eq!(fig.layout.barmode, Some("stack"));
        let names: Vec<_> = fig.data.iter().filter_map(|t| t.name.as_deref()).collect();
        assert_eq!(names, ["new_cases", "recovered", "total_deaths"]);

        for trace in &fig.data {
            assert_eq!(trace.x.len(), 7);
            assert_eq!(trace.y.len(), 7);
        }
        assert_eq!(fig.data[0].x[0], "2021-03-01");
    }

    #[test]
    fn test_recovered_series_uses_approximation() {
        let rows = country_rows(&sample_table(), "Chile");
        let fig = composition_chart(&rows, Theme::Bare);

        // 2021-03-01: 1000 total - 20 deaths - 100 new
        assert_eq!(fig.data[1].y[0], 880.0);
        assert!(fig.layout.template.is_none());
    }
}
