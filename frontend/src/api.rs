use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use sehat_shared::{EncodedImage, EncodingError, ErrorResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Failure of a backend call. `message` is set only when the server said why.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub message: Option<String>,
}

impl ApiError {
    fn opaque() -> Self {
        Self { message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

pub async fn post_json<I, O>(endpoint: &str, body: &I) -> Result<O, ApiError>
where
    I: Serialize,
    O: DeserializeOwned,
{
    let request = Request::post(endpoint).json(body).map_err(|e| {
        gloo_console::error!(format!("Failed to build request: {}", e));
        ApiError::opaque()
    })?;

    let response = request.send().await.map_err(|e| {
        gloo_console::error!(format!("Network error: {}", e));
        ApiError::opaque()
    })?;

    if response.ok() {
        response.json::<O>().await.map_err(|e| {
            gloo_console::error!(format!("Failed to parse response: {}", e));
            ApiError::opaque()
        })
    } else {
        let status = response.status();
        let message = response.json::<ErrorResponse>().await.ok().map(|r| r.error);
        log::warn!("Server error {} from {}: {:?}", status, endpoint, message);
        Err(ApiError { message })
    }
}

/// Reads the file as a data URL and splits it into MIME type and payload.
pub async fn encode_file(file: &GlooFile) -> Result<EncodedImage, EncodingError> {
    let data_url = gloo_file::futures::read_as_data_url(file)
        .await
        .map_err(|e| EncodingError::Read(e.to_string()))?;
    EncodedImage::from_data_url(&data_url)
}

pub async fn analyze_image<O: DeserializeOwned>(
    endpoint: &str,
    file: GlooFile,
) -> Result<O, ApiError> {
    let image = encode_file(&file).await.map_err(|e| {
        log::error!("Could not encode {}: {}", file.name(), e);
        ApiError::with_message(e.to_string())
    })?;
    log::info!(
        "Uploading {} ({}, {} bytes)",
        file.name(),
        image.mime_type,
        file.size()
    );
    post_json(endpoint, &image).await
}
