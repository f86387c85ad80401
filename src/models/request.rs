use crate::error::{LogoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of concepts produced per submission.
pub const CONCEPT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogoStyle {
    Minimalist,
    Geometric,
    Abstract,
    Vintage,
    Playful,
    Corporate,
}

impl LogoStyle {
    pub const ALL: [LogoStyle; 6] = [
        LogoStyle::Minimalist,
        LogoStyle::Geometric,
        LogoStyle::Abstract,
        LogoStyle::Vintage,
        LogoStyle::Playful,
        LogoStyle::Corporate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LogoStyle::Minimalist => "Minimalist",
            LogoStyle::Geometric => "Geometric",
            LogoStyle::Abstract => "Abstract",
            LogoStyle::Vintage => "Vintage",
            LogoStyle::Playful => "Playful",
            LogoStyle::Corporate => "Corporate",
        }
    }
}

impl Default for LogoStyle {
    fn default() -> Self {
        LogoStyle::Minimalist
    }
}

impl fmt::Display for LogoStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogoStyle {
    type Err = LogoError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        LogoStyle::ALL
            .iter()
            .copied()
            .find(|style| style.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                LogoError::ValidationError(format!(
                    "Unknown logo style '{}'. Choose one of: {}",
                    wanted,
                    LogoStyle::ALL
                        .iter()
                        .map(LogoStyle::label)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// One validated user submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    description: String,
    style: LogoStyle,
    palette: String,
    count: usize,
}

impl GenerationRequest {
    /// Rejects the submission when the description or palette is blank.
    pub fn new(
        description: impl Into<String>,
        style: LogoStyle,
        palette: impl Into<String>,
    ) -> Result<Self> {
        let description = description.into();
        let palette = palette.into();

        if description.trim().is_empty() || palette.trim().is_empty() {
            return Err(LogoError::ValidationError(
                "Please fill out all the fields to generate your logos.".into(),
            ));
        }

        Ok(Self {
            description,
            style,
            palette,
            count: CONCEPT_COUNT,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn style(&self) -> LogoStyle {
        self.style
    }

    pub fn palette(&self) -> &str {
        &self.palette
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
