#![forbid(unsafe_code)]

//! Tunable dismissal and animation policy.
//!
//! [`SheetPolicy`] bundles the commit/cancel thresholds and the transition
//! timing shared by every presentation a delegate makes. With the
//! `policy-config` feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! [thresholds]
//! progress_threshold = 0.4
//! velocity_for_scroll = true
//!
//! [timing]
//! duration_secs = 0.5
//! ```
//!
//! Missing keys keep their defaults.
//!
//! # Failure Modes
//!
//! | Condition | Error |
//! |-----------|-------|
//! | File unreadable | [`PolicyError::Io`] |
//! | Malformed TOML/JSON | [`PolicyError::Parse`] |
//! | Value out of range or non-finite | [`PolicyError::Invalid`] |

use std::fmt;

use crate::tracker::DismissThresholds;
use crate::transition::TransitionTiming;

/// Errors from loading or validating a [`SheetPolicy`].
#[derive(Debug)]
pub enum PolicyError {
    /// The policy file could not be read.
    Io(std::io::Error),
    /// The policy text could not be parsed.
    Parse(String),
    /// A value is outside its allowed range.
    Invalid { field: &'static str, value: f64 },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "policy io error: {err}"),
            Self::Parse(msg) => write!(f, "policy parse error: {msg}"),
            Self::Invalid { field, value } => write!(f, "invalid policy value {field} = {value}"),
        }
    }
}

impl std::error::Error for PolicyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(_) | Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for PolicyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Dismiss thresholds and transition timing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SheetPolicy {
    pub thresholds: DismissThresholds,
    pub timing: TransitionTiming,
}

impl SheetPolicy {
    #[must_use]
    pub fn thresholds(mut self, thresholds: DismissThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn timing(mut self, timing: TransitionTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Check every value is finite and in range.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let t = &self.thresholds;
        unit("thresholds.progress_threshold", t.progress_threshold)?;
        non_negative("thresholds.velocity_multiplier", t.velocity_multiplier)?;
        unit(
            "thresholds.remaining_height_fraction",
            t.remaining_height_fraction,
        )?;
        non_negative("timing.duration_secs", self.timing.duration_secs)?;
        let ratio = self.timing.damping_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(PolicyError::Invalid {
                field: "timing.damping_ratio",
                value: ratio,
            });
        }
        Ok(())
    }
}

fn unit(field: &'static str, value: f64) -> Result<(), PolicyError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::Invalid { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), PolicyError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PolicyError::Invalid { field, value })
    }
}

#[cfg(feature = "policy-config")]
impl SheetPolicy {
    pub fn from_toml_str(text: &str) -> Result<Self, PolicyError> {
        let policy: Self = toml::from_str(text).map_err(|e| PolicyError::Parse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_json_str(text: &str) -> Result<Self, PolicyError> {
        let policy: Self =
            serde_json::from_str(text).map_err(|e| PolicyError::Parse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as
    /// TOML.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let policy = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_toml_str(&text)?,
        };
        tracing::debug!(path = %path.display(), "sheet policy loaded");
        Ok(policy)
    }
}
