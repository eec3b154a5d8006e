use super::file_upload::{SelectedImage, render_image_input};
use super::panel::{PanelTask, PanelText};
use super::utils::render_field_label;
use crate::api::{ApiError, analyze_image};
use sehat_shared::{
    Listing, PRESCRIPTION_ENDPOINT, PRESCRIPTION_FAILURE, PRESCRIPTION_MISSING_INPUT,
    Prescription, PrescriptionItem,
};
use std::future::Future;
use yew::prelude::*;

pub struct PrescriptionTask;

fn render_item(item: &PrescriptionItem) -> Html {
    html! {
        <tr>
            <td class="cell-strong">{ &item.medicine }</td>
            <td>{ &item.dosage }</td>
            <td>{ &item.frequency }</td>
        </tr>
    }
}

impl PanelTask for PrescriptionTask {
    type Input = Option<SelectedImage>;
    type Output = Prescription;

    const TEXT: PanelText = PanelText {
        title: "Prescription Digitization (OCR)",
        description: "Upload a handwritten prescription (Urdu or English) to convert it into a digital record.",
        input_heading: "1. Upload Prescription",
        report_heading: "2. Digital Medical Record",
        submit_label: "Digitize Prescription",
        placeholder: "Digital record will be displayed here.",
        disclaimer: "Disclaimer: Always verify the digitized prescription with the original document. This tool is for assistance only.",
    };
    const FALLBACK_ERROR: &'static str = PRESCRIPTION_FAILURE;
    const MISSING_INPUT: &'static str = PRESCRIPTION_MISSING_INPUT;
    const RESET_ON_INPUT: bool = true;

    fn has_input(input: &Self::Input) -> bool {
        input.is_some()
    }

    fn render_input(input: &Self::Input, on_change: Callback<Self::Input>) -> Html {
        render_image_input(input, on_change, "Prescription preview")
    }

    fn request(input: Self::Input) -> impl Future<Output = Result<Prescription, ApiError>> + 'static {
        async move {
            let image = input.ok_or_else(|| ApiError::with_message(PRESCRIPTION_MISSING_INPUT))?;
            analyze_image(PRESCRIPTION_ENDPOINT, image.file).await
        }
    }

    fn render_report(output: &Prescription) -> Html {
        html! {
            <>
                <div class="report-row">
                    <div class="report-field">
                        { render_field_label("Patient Name") }
                        <p class="report-value">{ output.patient_name_or_na() }</p>
                    </div>
                    <div class="report-field">
                        { render_field_label("Date") }
                        <p class="report-value">{ output.date_or_na() }</p>
                    </div>
                </div>
                <div class="report-field">
                    { render_field_label("Medications") }
                    <table class="medication-table">
                        <thead>
                            <tr>
                                <th scope="col">{"Medicine"}</th>
                                <th scope="col">{"Dosage"}</th>
                                <th scope="col">{"Frequency"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {
                                match output.items_listing() {
                                    Listing::Empty(placeholder) => html! {
                                        <tr>
                                            <td colspan="3" class="cell-empty">{ placeholder }</td>
                                        </tr>
                                    },
                                    Listing::Entries(items) => html! {
                                        <>{ for items.iter().map(render_item) }</>
                                    },
                                }
                            }
                        </tbody>
                    </table>
                </div>
            </>
        }
    }
}
