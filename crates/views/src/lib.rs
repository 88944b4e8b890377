//! Presentation shared by the console and web front-ends.
//!
//! Both render the same [`PredictionView`], so formatting and wording cannot drift apart.

use rp_core::{PredictionSummary, PredictorKind};
use serde::Serialize;

pub mod console;
pub mod html;

/// Display-ready prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub kind: PredictorKind,
    pub raw: f64,
    /// Formatted scalar without units, as shown on the web pages.
    pub prediction: String,
    pub tier: &'static str,
    pub segment: &'static str,
    pub recommendation: &'static str,
}

impl From<&PredictionSummary> for PredictionView {
    fn from(summary: &PredictionSummary) -> Self {
        Self {
            kind: summary.kind,
            raw: summary.scalar,
            prediction: format_scalar(summary.kind, summary.scalar),
            tier: summary.tier,
            segment: summary.tier_title,
            recommendation: summary.recommendation,
        }
    }
}

/// Footfall in whole visitors, delivery to a tenth of a minute, CLV as money.
pub fn format_scalar(kind: PredictorKind, scalar: f64) -> String {
    match kind {
        PredictorKind::Footfall => format!("{scalar:.0}"),
        PredictorKind::Delivery => format!("{scalar:.1}"),
        PredictorKind::Clv => group_thousands(scalar, 2),
    }
}

/// `1234567.891` → `1,234,567.89`
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
