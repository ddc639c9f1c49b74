//! Chart Builders
//!
//! Stateless functions from table slices and a theme to Plotly figures:
//!
//! - **composition**: stacked new cases / recovered / deaths by date
//! - **peaks**: new cases line with detected waves
//! - **geo**: animated spread map and the latest-date choropleth
//! - **theme**: the five graph styles
//! - **figure**: the serializable figure model

pub mod composition;
pub mod figure;
pub mod geo;
pub mod peaks;
pub mod theme;

pub use composition::composition_chart;
pub use figure::{Figure, Trace, TraceKind};
pub use geo::{spread_chart, world_map};
pub use peaks::{detect_waves, peaks_chart, PeakPoint};
pub use theme::Theme;

use std::str::FromStr;

/// The four chart panels of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Composition,
    Peaks,
    Spread,
    WorldMap,
}

impl ChartKind {
    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::Composition,
            ChartKind::Peaks,
            ChartKind::Spread,
            ChartKind::WorldMap,
        ]
    }

    /// URL segment used by the API
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::Composition => "composition",
            ChartKind::Peaks => "peaks",
            ChartKind::Spread => "spread",
            ChartKind::WorldMap => "world-map",
        }
    }

    /// Whether the chart depends on the selected country
    pub fn needs_country(&self) -> bool {
        matches!(self, ChartKind::Composition | ChartKind::Peaks)
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::all()
            .iter()
            .copied()
            .find(|k| k.slug() == s)
            .ok_or_else(|| format!("Unknown chart: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_slugs() {
        assert_eq!("world-map".parse::<ChartKind>(), Ok(ChartKind::WorldMap));
        assert_eq!("peaks".parse::<ChartKind>(), Ok(ChartKind::Peaks));
        assert!("pie".parse::<ChartKind>().is_err());
        assert!(ChartKind::Composition.needs_country());
        assert!(!ChartKind::Spread.needs_country());
    }
}
