use crate::gemini::models::{GenerateContentRequest, InlineData, Part, Schema};
use sehat_shared::encoding::{is_accepted, unsupported_type_message};
use sehat_shared::{
    Diagnosis, EncodedImage, ImagingFinding, PRESCRIPTION_FAILURE, PRESCRIPTION_MISSING_INPUT,
    Prescription, RISK_FAILURE, RiskInput, RiskLevel, RiskReport, Validate, XRAY_FAILURE,
    XRAY_MISSING_INPUT,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::IntoEnumIterator;

const XRAY_PROMPT: &str = "You are a specialized AI radiology assistant. Analyze this chest X-ray for signs of Tuberculosis or Pneumonia. Provide your analysis in a structured JSON format. The JSON object should contain: 'diagnosis' (string: 'Normal', 'Tuberculosis Suspected', 'Pneumonia Suspected', or 'Indeterminate'), 'confidence' (number from 0 to 1), and 'findings' (an array of strings describing key observations).";

const PRESCRIPTION_PROMPT: &str = "You are an expert OCR system for medical prescriptions, fluent in both English and Urdu. Analyze the provided image of a handwritten prescription. Extract the information into a structured JSON format. The JSON object should contain: 'patientName' (string), 'date' (string, formatted as YYYY-MM-DD), and 'items' (an array of objects, where each object has 'medicine', 'dosage', and 'frequency' as strings).";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("{0}")]
    Missing(&'static str),
    #[error("{}", unsupported_type_message(.0))]
    UnsupportedType(String),
    #[error("The uploaded image could not be decoded.")]
    Undecodable,
    #[error("Failed to encode request: {0}")]
    Encoding(String),
}

/// One kind of analysis the dashboard can ask the inference service for.
pub trait AnalysisTask: 'static {
    type Input: DeserializeOwned + Send + 'static;
    type Output: DeserializeOwned + Serialize + Validate + Send + 'static;

    const NAME: &'static str;
    const FAILURE_MESSAGE: &'static str;

    /// Rejects unusable input, possibly correcting it on the way through.
    fn check_input(input: Self::Input) -> Result<Self::Input, InputError> {
        Ok(input)
    }

    fn build_request(input: &Self::Input) -> Result<GenerateContentRequest, InputError>;
}

/// Checks that an upload is present and its content is an accepted image.
///
/// The declared type usually comes from the file extension, so when it
/// disagrees with the content the sniffed type is forwarded instead.
fn check_image(mut image: EncodedImage, missing: &'static str) -> Result<EncodedImage, InputError> {
    if image.is_empty() {
        return Err(InputError::Missing(missing));
    }
    let bytes = image.decode().map_err(|_| InputError::Undecodable)?;
    let format = image::guess_format(&bytes).map_err(|_| InputError::Undecodable)?;
    let actual = format.to_mime_type();
    if !is_accepted(actual) {
        return Err(InputError::UnsupportedType(actual.to_string()));
    }
    if actual != image.mime_type {
        log::warn!(
            "Upload declared as {} but contains {}; forwarding as {}",
            image.mime_type,
            actual,
            actual
        );
        image.mime_type = actual.to_string();
    }
    Ok(image)
}

fn image_request(image: &EncodedImage, prompt: &str, schema: Schema) -> GenerateContentRequest {
    GenerateContentRequest::new(
        vec![
            Part::Inline {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            },
            Part::text(prompt),
        ],
        schema,
    )
}

pub struct XrayTriage;

impl XrayTriage {
    pub fn schema() -> Schema {
        Schema::object([
            (
                "diagnosis",
                Schema::one_of(Diagnosis::iter().map(|d| d.to_string())),
            ),
            ("confidence", Schema::number()),
            ("findings", Schema::array_of(Schema::string())),
        ])
    }
}

impl AnalysisTask for XrayTriage {
    type Input = EncodedImage;
    type Output = ImagingFinding;

    const NAME: &'static str = "xray";
    const FAILURE_MESSAGE: &'static str = XRAY_FAILURE;

    fn check_input(input: EncodedImage) -> Result<EncodedImage, InputError> {
        check_image(input, XRAY_MISSING_INPUT)
    }

    fn build_request(input: &EncodedImage) -> Result<GenerateContentRequest, InputError> {
        Ok(image_request(input, XRAY_PROMPT, Self::schema()))
    }
}

pub struct PrescriptionTranscription;

impl PrescriptionTranscription {
    pub fn schema() -> Schema {
        Schema::object([
            ("patientName", Schema::string()),
            ("date", Schema::string()),
            (
                "items",
                Schema::array_of(Schema::object([
                    ("medicine", Schema::string()),
                    ("dosage", Schema::string()),
                    ("frequency", Schema::string()),
                ])),
            ),
        ])
    }
}

impl AnalysisTask for PrescriptionTranscription {
    type Input = EncodedImage;
    type Output = Prescription;

    const NAME: &'static str = "prescription";
    const FAILURE_MESSAGE: &'static str = PRESCRIPTION_FAILURE;

    fn check_input(input: EncodedImage) -> Result<EncodedImage, InputError> {
        check_image(input, PRESCRIPTION_MISSING_INPUT)
    }

    fn build_request(input: &EncodedImage) -> Result<GenerateContentRequest, InputError> {
        Ok(image_request(input, PRESCRIPTION_PROMPT, Self::schema()))
    }
}

pub struct RiskScoring;

impl RiskScoring {
    pub fn schema() -> Schema {
        Schema::object([
            ("score", Schema::number()),
            (
                "level",
                Schema::one_of(RiskLevel::iter().map(|l| l.to_string())),
            ),
            ("explanation", Schema::string()),
            ("riskFactors", Schema::array_of(Schema::string())),
        ])
    }

    pub fn prompt(input: &RiskInput) -> Result<String, InputError> {
        let data = input
            .to_prompt_json()
            .map_err(|e| InputError::Encoding(e.to_string()))?;
        Ok(format!(
            "Based on the following patient data, act as a predictive health model to calculate a risk score for developing diabetes or heart disease in the next 10 years. Data: {}. Return a JSON object with: 'score' (a number between 0 and 100), 'level' (a string: 'Low', 'Medium', 'High', or 'Very High'), 'explanation' (a brief summary of the primary factors), and 'riskFactors' (an array of strings listing the main contributing factors from the input data).",
            data
        ))
    }
}

impl AnalysisTask for RiskScoring {
    type Input = RiskInput;
    type Output = RiskReport;

    const NAME: &'static str = "risk";
    const FAILURE_MESSAGE: &'static str = RISK_FAILURE;

    fn build_request(input: &RiskInput) -> Result<GenerateContentRequest, InputError> {
        Ok(GenerateContentRequest::new(
            vec![Part::text(Self::prompt(input)?)],
            Self::schema(),
        ))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Smallest valid PNG signature plus an IHDR tag, enough for format sniffing.
    pub(crate) const PNG_BYTES: [u8; 16] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    pub(crate) fn png_upload() -> EncodedImage {
        EncodedImage::from_bytes("image/png", &PNG_BYTES)
    }

    #[test]
    fn xray_request_carries_image_prompt_and_enum_schema() {
        let image = png_upload();
        let request = XrayTriage::build_request(&image).unwrap();

        let inline = request.inline_data().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, image.data);
        assert!(request.prompt().contains("chest X-ray"));

        let schema = serde_json::to_value(&request.generation_config.response_schema).unwrap();
        assert_eq!(
            schema["properties"]["diagnosis"]["enum"],
            json!(["Normal", "Tuberculosis Suspected", "Pneumonia Suspected", "Indeterminate"])
        );
        assert_eq!(schema["properties"]["confidence"]["type"], "NUMBER");
        assert_eq!(
            request.generation_config.response_mime_type,
            "application/json"
        );
    }

    #[test]
    fn prescription_request_uses_bilingual_ocr_prompt() {
        let request = PrescriptionTranscription::build_request(&png_upload()).unwrap();
        assert!(request.prompt().contains("English and Urdu"));

        let schema = serde_json::to_value(&request.generation_config.response_schema).unwrap();
        assert_eq!(
            schema["properties"]["items"]["items"]["properties"],
            json!({
                "dosage": {"type": "STRING"},
                "frequency": {"type": "STRING"},
                "medicine": {"type": "STRING"}
            })
        );
    }

    #[test]
    fn risk_prompt_embeds_the_exact_serialized_record() {
        let request = RiskScoring::build_request(&RiskInput::default()).unwrap();

        assert!(request.inline_data().is_none());
        assert!(request.prompt().contains(
            r#"Data: {"age":55,"gender":"Male","systolicBP":135,"cholesterol":220,"hdl":45,"smoker":"Yes","diabetes":"No"}."#
        ));

        let schema = serde_json::to_value(&request.generation_config.response_schema).unwrap();
        assert_eq!(
            schema["properties"]["level"]["enum"],
            json!(["Low", "Medium", "High", "Very High"])
        );
        assert_eq!(schema["properties"]["riskFactors"]["items"]["type"], "STRING");
    }

    #[test]
    fn empty_upload_reports_the_panel_message() {
        let empty = EncodedImage {
            mime_type: "image/png".into(),
            data: String::new(),
        };
        assert_eq!(
            XrayTriage::check_input(empty.clone()),
            Err(InputError::Missing(XRAY_MISSING_INPUT))
        );
        assert_eq!(
            PrescriptionTranscription::check_input(empty),
            Err(InputError::Missing(PRESCRIPTION_MISSING_INPUT))
        );
    }

    #[test]
    fn mislabeled_upload_is_forwarded_with_sniffed_type() {
        // A PNG saved as scan.jpg arrives declared as image/jpeg.
        let mislabeled = EncodedImage::from_bytes("image/jpeg", &PNG_BYTES);
        let checked = XrayTriage::check_input(mislabeled.clone()).unwrap();
        assert_eq!(checked.mime_type, "image/png");
        assert_eq!(checked.data, mislabeled.data);

        assert_eq!(XrayTriage::check_input(png_upload()), Ok(png_upload()));
    }

    #[test]
    fn unsupported_and_garbage_uploads_are_rejected() {
        let gif = EncodedImage::from_bytes("image/gif", b"GIF89a....");
        assert_eq!(
            XrayTriage::check_input(gif),
            Err(InputError::UnsupportedType("image/gif".into()))
        );

        // Declared as PNG, but the content is still GIF.
        let disguised = EncodedImage::from_bytes("image/png", b"GIF89a....");
        assert_eq!(
            PrescriptionTranscription::check_input(disguised),
            Err(InputError::UnsupportedType("image/gif".into()))
        );

        let garbage = EncodedImage::from_bytes("image/png", b"definitely not an image");
        assert_eq!(XrayTriage::check_input(garbage), Err(InputError::Undecodable));
    }
}
