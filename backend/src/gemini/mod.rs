pub mod errors;
pub mod models;

use crate::config::InferenceSettings;
use errors::{InferenceError, InferenceResult};
use models::{GenerateContentRequest, GenerateContentResponse, strip_code_fences};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use url::Url;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Thin client for the `generateContent` endpoint.
///
/// One call per request; no retries and no client-side timeout.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, settings: &InferenceSettings) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Segments are appended after any path already on the base URL.
    pub fn endpoint(&self) -> Result<Url, InferenceError> {
        let mut url = Url::parse(&self.base_url)?;
        let call = format!("{}:generateContent", self.model);
        url.path_segments_mut()
            .map_err(|_| InferenceError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["v1beta", "models", call.as_str()]);
        Ok(url)
    }

    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> InferenceResult<GenerateContentResponse> {
        let url = self.endpoint()?;
        log::debug!("POST {} ({} parts)", url, request.parts().count());

        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Service {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// Sends the request and parses the model's JSON answer as `T`.
    pub async fn generate<T: DeserializeOwned>(
        &self,
        request: &GenerateContentRequest,
    ) -> InferenceResult<T> {
        let response = self.generate_content(request).await?;
        let text = response.text().ok_or_else(|| {
            let reason = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            log::warn!("Inference service returned no text (finish reason: {})", reason);
            InferenceError::EmptyResponse
        })?;
        Ok(serde_json::from_str(strip_code_fences(&text))?)
    }
}
