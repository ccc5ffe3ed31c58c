//! Grade-scale and grading-term configuration.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::grading::types::ScaleTier;

/// Term used when the config does not name one.
pub const DEFAULT_GRADING_TERM: &str = "Term 2";

/// Loaded once at startup and passed by reference into the pipeline.
///
/// Stored as JSON on disk:
/// ```json
/// {
///   "scale": [
///     { "minpercent": 90, "lettergrade": "A" },
///     { "minpercent": 80, "lettergrade": "B" }
///   ],
///   "grading_term": "Term 2"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradesConfig {
    #[serde(default)]
    pub scale: Vec<ScaleTier>,
    #[serde(default = "default_grading_term")]
    pub grading_term: String,
}

fn default_grading_term() -> String {
    DEFAULT_GRADING_TERM.to_string()
}

impl Default for GradesConfig {
    fn default() -> Self {
        Self {
            scale: Vec::new(),
            grading_term: default_grading_term(),
        }
    }
}

impl GradesConfig {
    /// Loads and validates the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid config '{}'", path.display()))
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: GradesConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grading_term.is_empty() {
            bail!("grading_term must not be empty");
        }
        for (i, tier) in self.scale.iter().enumerate() {
            if !tier.min_percent.is_finite() {
                bail!("scale[{i}].minpercent must be a finite number");
            }
            if tier.letter_grade.is_empty() {
                bail!("scale[{i}].lettergrade must not be empty");
            }
        }
        if self.scale.is_empty() {
            warn!("Grade scale is empty, every letter grade will be N/A");
        }
        Ok(())
    }
}
