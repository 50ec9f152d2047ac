use std::{fmt, str::FromStr};

use crate::foundation::error::{DlIconError, DlIconResult};

/// Closed set of renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Download,
    Error,
    Complete,
    ProgressArc,
    ProgressFill,
}

impl AnimationKind {
    pub fn is_progress(self) -> bool {
        matches!(self, Self::ProgressArc | Self::ProgressFill)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Error => "error",
            Self::Complete => "complete",
            Self::ProgressArc => "progress-arc",
            Self::ProgressFill => "progress-fill",
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which renderer a `progress` activation maps to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStyle {
    Arc,
    #[default]
    Fill,
}

impl FromStr for ProgressStyle {
    type Err = DlIconError;

    fn from_str(s: &str) -> DlIconResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arc" | "ring" => Ok(Self::Arc),
            "fill" | "water" | "liquid" => Ok(Self::Fill),
            other => Err(DlIconError::validation(format!(
                "unknown progress style '{other}'"
            ))),
        }
    }
}

/// A progress fraction known to lie in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ProgressValue(f64);

impl ProgressValue {
    pub const ZERO: Self = Self(0.0);

    pub fn new(v: f64) -> DlIconResult<Self> {
        if !v.is_finite() || !(0.0..=1.0).contains(&v) {
            return Err(DlIconError::ProgressOutOfRange(v));
        }
        Ok(Self(v))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// One request from the event source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActivationKind {
    Download,
    Error,
    Complete,
    Progress(ProgressValue),
}

impl ActivationKind {
    /// Parse the public `(kind, value?)` pair.
    ///
    /// Kinds match exactly (lowercase, no padding); anything else yields
    /// [`DlIconError::InvalidKind`]. A `progress` value outside `[0, 1]`
    /// yields [`DlIconError::ProgressOutOfRange`]. A missing progress value
    /// means zero.
    pub fn parse(kind: &str, value: Option<f64>) -> DlIconResult<Self> {
        match kind {
            "download" => Ok(Self::Download),
            "error" => Ok(Self::Error),
            "complete" => Ok(Self::Complete),
            "progress" => {
                let v = match value {
                    None => ProgressValue::ZERO,
                    Some(v) => ProgressValue::new(v)?,
                };
                Ok(Self::Progress(v))
            }
            _ => Err(DlIconError::invalid_kind(kind)),
        }
    }

    pub fn animation_kind(self, style: ProgressStyle) -> AnimationKind {
        match self {
            Self::Download => AnimationKind::Download,
            Self::Error => AnimationKind::Error,
            Self::Complete => AnimationKind::Complete,
            Self::Progress(_) => match style {
                ProgressStyle::Arc => AnimationKind::ProgressArc,
                ProgressStyle::Fill => AnimationKind::ProgressFill,
            },
        }
    }

    pub fn progress(self) -> Option<f64> {
        match self {
            Self::Progress(v) => Some(v.get()),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Error => "error",
            Self::Complete => "complete",
            Self::Progress(_) => "progress",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/kind.rs"]
mod tests;
