use super::file_upload::{SelectedImage, render_image_input};
use super::panel::{PanelTask, PanelText};
use super::utils::render_field_label;
use crate::api::{ApiError, analyze_image};
use sehat_shared::{
    Diagnosis, ImagingFinding, Listing, XRAY_ENDPOINT, XRAY_FAILURE, XRAY_MISSING_INPUT,
};
use std::future::Future;
use yew::prelude::*;

pub struct XrayTask;

fn diagnosis_class(diagnosis: Diagnosis) -> &'static str {
    match diagnosis {
        Diagnosis::Normal => "badge-green",
        Diagnosis::PneumoniaSuspected => "badge-yellow",
        Diagnosis::TuberculosisSuspected => "badge-red",
        Diagnosis::Indeterminate => "badge-gray",
    }
}

impl PanelTask for XrayTask {
    type Input = Option<SelectedImage>;
    type Output = ImagingFinding;

    const TEXT: PanelText = PanelText {
        title: "AI Chest X-Ray Analysis",
        description: "Upload a chest X-ray image to detect signs of Tuberculosis and Pneumonia.",
        input_heading: "1. Upload Image",
        report_heading: "2. AI Analysis Report",
        submit_label: "Analyze X-Ray",
        placeholder: "Analysis results will be displayed here.",
        disclaimer: "Disclaimer: This AI analysis is for informational purposes only and is not a substitute for professional medical advice.",
    };
    const FALLBACK_ERROR: &'static str = XRAY_FAILURE;
    const MISSING_INPUT: &'static str = XRAY_MISSING_INPUT;
    const RESET_ON_INPUT: bool = true;

    fn has_input(input: &Self::Input) -> bool {
        input.is_some()
    }

    fn render_input(input: &Self::Input, on_change: Callback<Self::Input>) -> Html {
        render_image_input(input, on_change, "X-ray preview")
    }

    fn request(input: Self::Input) -> impl Future<Output = Result<ImagingFinding, ApiError>> + 'static {
        async move {
            let image = input.ok_or_else(|| ApiError::with_message(XRAY_MISSING_INPUT))?;
            analyze_image(XRAY_ENDPOINT, image.file).await
        }
    }

    fn render_report(output: &ImagingFinding) -> Html {
        let meter_width = format!("width: {}%;", output.confidence_percent());

        html! {
            <>
                <div class="report-field">
                    { render_field_label("Diagnosis") }
                    <p class={classes!("badge", diagnosis_class(output.diagnosis))}>
                        { output.diagnosis.to_string() }
                    </p>
                </div>
                <div class="report-field">
                    { render_field_label("Confidence Score") }
                    <div class="meter">
                        <div class="meter-fill" style={meter_width}></div>
                    </div>
                    <p class="report-value">{ output.confidence_label() }</p>
                </div>
                <div class="report-field">
                    { render_field_label("Key Findings") }
                    <ul class="findings-list">
                        {
                            match output.findings_listing() {
                                Listing::Empty(placeholder) => html! { <li>{ placeholder }</li> },
                                Listing::Entries(findings) => html! {
                                    <>{ for findings.iter().map(|finding| html! { <li>{ finding }</li> }) }</>
                                },
                            }
                        }
                    </ul>
                </div>
            </>
        }
    }
}
