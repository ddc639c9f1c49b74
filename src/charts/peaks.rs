//! Wave detection chart: daily new cases with detected peaks highlighted

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::Observation;
use crate::signal::{find_peaks, PEAK_HEIGHT};

use super::figure::{Axis, Figure, Layout, Marker, MarkerColor, MarkerSize, Title, Trace};
use super::theme::Theme;

pub const PEAKS_TITLE: &str = "Peaks in New Cases";

/// A detected wave peak
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakPoint {
    /// Position in the date-ordered country rows
    pub index: usize,
    pub date: Option<NaiveDate>,
    pub new_cases: f64,
}

/// Peaks of the new-cases series at or above `PEAK_HEIGHT`
pub fn detect_waves(rows: &[Observation]) -> Vec<PeakPoint> {
    let series: Vec<f64> = rows.iter().map(|r| r.new_cases).collect();

    find_peaks(&series, PEAK_HEIGHT)
        .into_iter()
        .map(|index| PeakPoint {
            index,
            date: rows[index].date,
            new_cases: rows[index].new_cases,
        })
        .collect()
}

/// Line of new cases plus a red marker overlay on each peak
pub fn peaks_chart(rows: &[Observation], theme: Theme) -> Figure {
    let dates: Vec<String> = rows.iter().map(Observation::date_label).collect();
    let new_cases: Vec<f64> = rows.iter().map(|r| r.new_cases).collect();

    let peaks = detect_waves(rows);
    let overlay = Trace::markers(
        "Peaks",
        peaks.iter().map(|p| dates[p.index].clone()).collect(),
        peaks.iter().map(|p| p.new_cases).collect(),
        Marker {
            color: Some(MarkerColor::Fixed("red")),
            size: Some(MarkerSize::Fixed(8.0)),
            ..Default::default()
        },
    );

    Figure {
        data: vec![Trace::line("new_cases", dates, new_cases), overlay],
        layout: Layout {
            title: Some(Title::new(PEAKS_TITLE)),
            xaxis: Some(Axis::titled("date")),
            yaxis: Some(Axis::titled("new_cases")),
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
    fn test_detect_waves_chile() {
        let rows = country_rows(&sample_table(), "Chile");
        let peaks = detect_waves(&rows);

        // 1500 on 03-02, and the 2000/2000 plateau reported at its left middle
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].date, NaiveDate::from_ymd_opt(2021, 3, 2));
        assert_eq!(peaks[0].new_cases, 1500.0);
        assert_eq!(peaks[1].date, NaiveDate::from_ymd_opt(2021, 3, 4));
    }

    #[test]
    fn test_peak_overlay() {
        let rows = country_rows(&sample_table(), "Chile");
        let fig = peaks_chart(&rows, Theme::PlotlyDark);

        assert_eq!(fig.data.len(), 2);
        assert_eq!(fig.data[0].y.len(), 7);
        assert_eq!(fig.data[1].x, vec!["2021-03-02", "2021-03-04"]);
        assert_eq!(fig.data[1].mode, Some("markers"));
    }

    #[test]
    fn test_single_row_has_no_peaks() {
        let rows = country_rows(&sample_table(), "Nauru");
        let fig = peaks_chart(&rows, Theme::PlotlyWhite);

        assert_eq!(fig.data[0].x.len(), 1);
        assert!(fig.data[1].x.is_empty());
        assert!(detect_waves(&rows).is_empty());
    }
}
