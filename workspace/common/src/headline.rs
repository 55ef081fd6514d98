//! Plain-text headline and data note for a trend summary.
//!
//! The frontend adds its own emphasis around these strings; the CLI and the
//! HTTP API return them as-is.

use crate::trend::{TrendKind, TrendSummary};

/// Shown below the headline when the series is sparse.
pub const SPARSE_DATA_NOTE: &str = "Note: Limited data for this industry in this county.";

/// Formats a count with comma thousands separators (`12345` -> `12,345`).
pub fn format_count(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Headline describing the peak and the current state of the series.
pub fn headline(industry_name: &str, county_name: &str, summary: &TrendSummary) -> String {
    match summary.trend {
        TrendKind::Growing => format!(
            "{} in {} are still growing — up {}% since {}. Currently: {} establishments.",
            industry_name,
            county_name,
            summary.percent_change.unwrap_or_default(),
            summary.first_year,
            format_count(summary.current_value),
        ),
        TrendKind::NewEstablishments => format!(
            "{} in {} are still growing — up from none in {}. Currently: {} establishments.",
            industry_name,
            county_name,
            summary.first_year,
            format_count(summary.current_value),
        ),
        TrendKind::AtPeakFlat => format!(
            "{} in {} peaked in {} with {} establishments.",
            industry_name,
            county_name,
            summary.peak_year,
            format_count(summary.peak_value),
        ),
        TrendKind::Declined => format!(
            "{} in {} peaked in {} with {} establishments. Today: {} ({}%)",
            industry_name,
            county_name,
            summary.peak_year,
            format_count(summary.peak_value),
            format_count(summary.current_value),
            summary.percent_change.unwrap_or_default(),
        ),
    }
}

pub fn data_note(summary: &TrendSummary) -> Option<&'static str> {
    summary.sparse.then_some(SPARSE_DATA_NOTE)
}
