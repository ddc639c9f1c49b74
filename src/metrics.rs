//! Metric Presenters
//!
//! Headline numbers for the summary blocks: world totals, country totals and
//! the case-fatality ratio.

use serde::Serialize;

use crate::dataset::Observation;

/// Shown next to the CFR when there are no cases to divide by
pub const CFR_UNDEFINED_NOTE: &str = "No confirmed cases yet; the ratio is not meaningful";

/// Case-fatality ratio of one observation
///
/// Defined as 0 when there are no cases, with `meaningful` cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaseFatality {
    /// Percentage, deaths / cases × 100
    pub ratio: f64,
    pub meaningful: bool,
}

impl CaseFatality {
    pub fn from_observation(row: &Observation) -> Self {
        Self::from_counts(row.total_cases, row.total_deaths)
    }

    pub fn from_counts(total_cases: f64, total_deaths: f64) -> Self {
        if total_cases > 0.0 {
            Self {
                ratio: total_deaths / total_cases * 100.0,
                meaningful: true,
            }
        } else {
            Self {
                ratio: 0.0,
                meaningful: false,
            }
        }
    }

    pub fn display(&self) -> String {
        format_ratio(self.ratio)
    }

    pub fn note(&self) -> Option<&'static str> {
        (!self.meaningful).then_some(CFR_UNDEFINED_NOTE)
    }
}

/// A labelled headline number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValue {
    pub label: String,
    pub value: f64,
    /// Formatted for display
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MetricValue {
    pub fn count(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
            display: format_count(value),
            note: None,
        }
    }

    pub fn case_fatality(cfr: CaseFatality) -> Self {
        Self {
            label: "Case Fatality Rate (CFR)".to_string(),
            value: cfr.ratio,
            display: cfr.display(),
            note: cfr.note().map(String::from),
        }
    }
}

/// World block: total cases and deaths
pub fn world_metrics(world_latest: &Observation) -> Vec<MetricValue> {
    vec![
        MetricValue::count("Total Cases", world_latest.total_cases),
        MetricValue::count("Total Deaths", world_latest.total_deaths),
    ]
}

/// Country block: total cases, deaths and CFR
pub fn country_metrics(latest: &Observation) -> Vec<MetricValue> {
    vec![
        MetricValue::count("Total Cases", latest.total_cases),
        MetricValue::count("Total Deaths", latest.total_deaths),
        MetricValue::case_fatality(CaseFatality::from_observation(latest)),
    ]
}

/// Truncate to an integer and group thousands with commas
pub fn format_count(value: f64) -> String {
    let n = value.trunc() as i64;
    let digits = n.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Two decimals with a percent sign
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}%", value)
}
