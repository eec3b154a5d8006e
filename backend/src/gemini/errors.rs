use sehat_shared::ReportError;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Inference base URL cannot take a path: {0}")]
    InvalidBaseUrl(String),
    #[error("Inference service returned {status}: {body}")]
    Service { status: u16, body: String },
    #[error("Inference service returned no content")]
    EmptyResponse,
    #[error("Failed to parse inference response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Inference response rejected: {0}")]
    Rejected(#[from] ReportError),
}

pub type InferenceResult<T> = Result<T, InferenceError>;
