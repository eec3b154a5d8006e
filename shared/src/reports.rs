use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ReportError {
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
    #[error("score {0} is outside [0, 100]")]
    ScoreOutOfRange(f64),
}

pub const NO_FINDINGS: &str = "No specific findings reported.";
pub const NO_MEDICATIONS: &str = "No medications found.";
pub const NO_RISK_FACTORS: &str = "No risk factors identified.";

/// A report list as it is drawn: its entries, or the line shown in their
/// place when there are none.
#[derive(Debug, PartialEq)]
pub enum Listing<'a, T> {
    Entries(&'a [T]),
    Empty(&'static str),
}

impl<'a, T> Listing<'a, T> {
    fn of(entries: &'a [T], placeholder: &'static str) -> Self {
        if entries.is_empty() {
            Listing::Empty(placeholder)
        } else {
            Listing::Entries(entries)
        }
    }
}

/// Anything the inference service hands back that we can sanity check
/// before showing it.
pub trait Validate {
    fn validate(&self) -> Result<(), ReportError>;
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum Diagnosis {
    Normal,
    #[serde(rename = "Tuberculosis Suspected")]
    #[strum(serialize = "Tuberculosis Suspected")]
    TuberculosisSuspected,
    #[serde(rename = "Pneumonia Suspected")]
    #[strum(serialize = "Pneumonia Suspected")]
    PneumoniaSuspected,
    Indeterminate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagingFinding {
    pub diagnosis: Diagnosis,
    pub confidence: f64,
    #[serde(default)]
    pub findings: Vec<String>,
}

impl ImagingFinding {
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }

    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence_percent())
    }

    pub fn findings_listing(&self) -> Listing<'_, String> {
        Listing::of(&self.findings, NO_FINDINGS)
    }
}

impl Validate for ImagingFinding {
    fn validate(&self) -> Result<(), ReportError> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(ReportError::ConfidenceOutOfRange(self.confidence));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PrescriptionItem {
    #[serde(default)]
    pub medicine: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub items: Vec<PrescriptionItem>,
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}

impl Prescription {
    pub fn patient_name_or_na(&self) -> &str {
        or_na(&self.patient_name)
    }

    pub fn date_or_na(&self) -> &str {
        or_na(&self.date)
    }

    pub fn items_listing(&self) -> Listing<'_, PrescriptionItem> {
        Listing::of(&self.items, NO_MEDICATIONS)
    }
}

// Free text only, nothing to range check.
impl Validate for Prescription {
    fn validate(&self) -> Result<(), ReportError> {
        Ok(())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    #[strum(serialize = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    pub fn badge_label(&self) -> String {
        format!("{} Risk", self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub score: f64,
    pub level: RiskLevel,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

impl RiskReport {
    /// `72.0` renders as `72%`, `72.5` as `72.5%`.
    pub fn score_label(&self) -> String {
        format!("{}%", self.score)
    }

    pub fn risk_factors_listing(&self) -> Listing<'_, String> {
        Listing::of(&self.risk_factors, NO_RISK_FACTORS)
    }
}

impl Validate for RiskReport {
    fn validate(&self) -> Result<(), ReportError> {
        if !self.score.is_finite() || !(0.0..=100.0).contains(&self.score) {
            return Err(ReportError::ScoreOutOfRange(self.score));
        }
        Ok(())
    }
}
