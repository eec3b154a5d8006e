pub mod encoding;
pub mod page;
pub mod panel;
pub mod reports;
pub mod risk;

use serde::{Deserialize, Serialize};

pub use encoding::{ACCEPTED_MIME_TYPES, EncodedImage, EncodingError};
pub use page::Page;
pub use panel::PanelState;
pub use reports::{
    Diagnosis, ImagingFinding, Listing, Prescription, PrescriptionItem, ReportError, RiskLevel,
    RiskReport, Validate,
};
pub use risk::{Gender, RiskInput, YesNo};

pub const XRAY_ENDPOINT: &str = "/api/analyze/xray";
pub const PRESCRIPTION_ENDPOINT: &str = "/api/analyze/prescription";
pub const RISK_ENDPOINT: &str = "/api/analyze/risk";

pub const XRAY_FAILURE: &str =
    "Failed to get analysis from AI. The image might be unsupported or the API key may be invalid.";
pub const PRESCRIPTION_FAILURE: &str =
    "Failed to digitize prescription. The image might be unclear or the AI service is unavailable.";
pub const RISK_FAILURE: &str =
    "Failed to calculate risk score. Please check the input data and try again.";

pub const XRAY_MISSING_INPUT: &str = "Please upload an X-ray image first.";
pub const PRESCRIPTION_MISSING_INPUT: &str = "Please upload a prescription image first.";

/// Body of every non-2xx response from the backend API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
