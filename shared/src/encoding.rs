use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// MIME types the upload surface accepts.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Not a data URL")]
    NotDataUrl,
    #[error("Data URL has no MIME type")]
    MissingMimeType,
    #[error("Data URL is not base64 encoded")]
    NotBase64,
    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(String),
    #[error("Failed to read file: {0}")]
    Read(String),
}

/// An uploaded image ready to travel as inline data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: BASE64.encode(bytes),
        }
    }

    /// Splits a `data:<mime>;base64,<payload>` URL as produced by a browser
    /// `FileReader`. The MIME type comes from the prefix only.
    pub fn from_data_url(url: &str) -> Result<Self, EncodingError> {
        let rest = url.strip_prefix("data:").ok_or(EncodingError::NotDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(EncodingError::NotDataUrl)?;

        let mut params = header.split(';');
        let mime_type = params.next().unwrap_or_default().trim();
        if mime_type.is_empty() {
            return Err(EncodingError::MissingMimeType);
        }
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(EncodingError::NotBase64);
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }

    pub fn decode(&self) -> Result<Vec<u8>, EncodingError> {
        BASE64
            .decode(self.data.as_bytes())
            .map_err(|e| EncodingError::InvalidPayload(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.data.trim().is_empty()
    }

    pub fn is_supported(&self) -> bool {
        is_accepted(&self.mime_type)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

pub fn is_accepted(mime_type: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime_type)
}

/// Shown when a picked, dropped or uploaded file is not an accepted image.
pub fn unsupported_type_message(mime_type: &str) -> String {
    let shown = if mime_type.trim().is_empty() {
        "unknown"
    } else {
        mime_type
    };
    format!(
        "Unsupported image type: {}. Please upload a PNG, JPEG or WEBP image.",
        shown
    )
}

/// Value for an `<input type="file" accept=...>` attribute.
pub fn accept_attribute() -> String {
    ACCEPTED_MIME_TYPES.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PNG_HEADER: [u8; 16] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    #[test]
    fn decoded_payload_matches_original_bytes() {
        let original: Vec<u8> = (0..=255u8).chain(PNG_HEADER).collect();
        let url = format!("data:image/png;base64,{}", BASE64.encode(&original));

        let encoded = EncodedImage::from_data_url(&url).unwrap();
        let decoded = encoded.decode().unwrap();

        assert_eq!(encoded.mime_type, "image/png");
        assert_eq!(decoded.len(), original.len());
        assert_eq!(decoded, original);
    }

    #[test]
    fn mime_type_comes_from_prefix() {
        let encoded = EncodedImage::from_data_url("data:image/webp;base64,AAAA").unwrap();
        assert_eq!(encoded.mime_type, "image/webp");
        assert_eq!(encoded.data, "AAAA");
        assert!(encoded.is_supported());
    }

    #[test]
    fn extra_parameters_before_base64_are_tolerated() {
        let encoded =
            EncodedImage::from_data_url("data:image/jpeg;name=scan.jpg;base64,/9j/").unwrap();
        assert_eq!(encoded.mime_type, "image/jpeg");
        assert_eq!(encoded.data, "/9j/");
    }

    #[test]
    fn rejects_malformed_urls() {
        assert_eq!(
            EncodedImage::from_data_url("image/png;base64,AAAA"),
            Err(EncodingError::NotDataUrl)
        );
        assert_eq!(
            EncodedImage::from_data_url("data:image/png;base64"),
            Err(EncodingError::NotDataUrl)
        );
        assert_eq!(
            EncodedImage::from_data_url("data:;base64,AAAA"),
            Err(EncodingError::MissingMimeType)
        );
        assert_eq!(
            EncodedImage::from_data_url("data:text/plain,hello"),
            Err(EncodingError::NotBase64)
        );
    }

    #[test]
    fn from_bytes_and_data_url_agree() {
        let encoded = EncodedImage::from_bytes("image/png", &PNG_HEADER);
        let reparsed = EncodedImage::from_data_url(&encoded.to_data_url()).unwrap();
        assert_eq!(reparsed, encoded);
    }

    #[test]
    fn invalid_payload_fails_to_decode() {
        let encoded = EncodedImage {
            mime_type: "image/png".into(),
            data: "not base64!".into(),
        };
        assert!(matches!(
            encoded.decode(),
            Err(EncodingError::InvalidPayload(_))
        ));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let encoded = EncodedImage::from_bytes("image/png", b"x");
        let json = serde_json::to_value(&encoded).unwrap();
        assert_eq!(json, serde_json::json!({"mimeType": "image/png", "data": "eA=="}));
    }

    #[test]
    fn unsupported_types_are_flagged() {
        let gif = EncodedImage::from_bytes("image/gif", b"GIF89a");
        assert!(!gif.is_supported());
        assert_eq!(accept_attribute(), "image/png, image/jpeg, image/webp");
    }

    #[test]
    fn rejection_message_names_the_type() {
        assert!(is_accepted("image/jpeg"));
        assert!(!is_accepted("application/pdf"));
        assert_eq!(
            unsupported_type_message("application/pdf"),
            "Unsupported image type: application/pdf. Please upload a PNG, JPEG or WEBP image."
        );
        // Files without an extension arrive with an empty type.
        assert_eq!(
            unsupported_type_message(""),
            "Unsupported image type: unknown. Please upload a PNG, JPEG or WEBP image."
        );
    }
}
