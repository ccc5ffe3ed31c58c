//! Letter-grade lookup against a configurable scale.

use serde_json::Value;

use crate::grading::types::ScaleTier;

/// Placeholder grade for missing, non-numeric or out-of-scale scores.
pub const NOT_AVAILABLE: &str = "N/A";

/// Converts a raw score into a letter grade.
///
/// `score` may be a JSON number, a numeric string, `null`, or absent. Tiers
/// are consulted from the highest `min_percent` down; the first tier whose
/// minimum is at or below the score wins. The caller's scale is left as is.
///
/// | Input             | Result                     |
/// |-------------------|----------------------------|
/// | `95`, `"95"`      | matching tier              |
/// | `null`, absent    | `N/A`                      |
/// | `"abc"`, `""`     | `N/A`                      |
/// | below every tier  | `N/A`                      |
pub fn resolve_letter_grade(score: Option<&Value>, scale: &[ScaleTier]) -> String {
    match score.and_then(numeric_score) {
        Some(s) => letter_for(s, scale),
        None => NOT_AVAILABLE.into(),
    }
}

/// Typed variant of [`resolve_letter_grade`] for an already-numeric score.
pub fn letter_for(score: f64, scale: &[ScaleTier]) -> String {
    if !score.is_finite() {
        return NOT_AVAILABLE.into();
    }

    let mut tiers: Vec<&ScaleTier> = scale.iter().collect();
    // Stable, so equal thresholds keep their configured order.
    tiers.sort_by(|a, b| b.min_percent.total_cmp(&a.min_percent));

    tiers
        .into_iter()
        .find(|tier| score >= tier.min_percent)
        .map(|tier| tier.letter_grade.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.into())
}

fn numeric_score(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
