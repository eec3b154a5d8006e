use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Panels reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum Page {
    #[default]
    #[strum(serialize = "X-Ray Analysis")]
    XRay,
    #[strum(serialize = "Prescription OCR")]
    Ocr,
    #[strum(serialize = "Risk Scoring")]
    Risk,
}
