use super::panel::{PanelTask, PanelText};
use super::utils::render_field_label;
use crate::api::{ApiError, post_json};
use sehat_shared::{Listing, RISK_ENDPOINT, RISK_FAILURE, RiskInput, RiskLevel, RiskReport};
use std::fmt::Display;
use std::future::Future;
use std::str::FromStr;
use strum::IntoEnumIterator;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub struct RiskTask;

fn level_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "risk-low",
        RiskLevel::Medium => "risk-medium",
        RiskLevel::High => "risk-high",
        RiskLevel::VeryHigh => "risk-very-high",
    }
}

/// Blank or non-numeric entries count as zero.
fn number_field(label: &str, id: &'static str, value: u32, on_set: Callback<u32>) -> Html {
    let oninput = on_set.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value().trim().parse().unwrap_or(0)
    });

    html! {
        <div class="form-field">
            { render_field_label(label) }
            <input type="number" {id} value={value.to_string()} {oninput} />
        </div>
    }
}

fn select_field<E>(label: &str, id: &'static str, value: E, on_set: Callback<E>) -> Html
where
    E: IntoEnumIterator + Display + FromStr + PartialEq + Copy + 'static,
{
    let onchange = on_set.filter_reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        E::from_str(&select.value()).ok()
    });
    let onchange = Callback::from(move |e: Event| {
        onchange.emit(e);
    });

    html! {
        <div class="form-field">
            { render_field_label(label) }
            <select {id} {onchange}>
                { for E::iter().map(|option| html! {
                    <option value={option.to_string()} selected={option == value}>
                        { option.to_string() }
                    </option>
                }) }
            </select>
        </div>
    }
}

impl PanelTask for RiskTask {
    type Input = RiskInput;
    type Output = RiskReport;

    const TEXT: PanelText = PanelText {
        title: "Predictive Risk Scoring",
        description: "Enter patient data to calculate the risk score for Diabetes and Heart Disease.",
        input_heading: "1. Patient Health Data",
        report_heading: "2. Health Risk Report",
        submit_label: "Calculate Risk Score",
        placeholder: "Risk report will be displayed here.",
        disclaimer: "Disclaimer: This risk score is an estimate based on provided data and not a definitive diagnosis. Consult a healthcare professional.",
    };
    const FALLBACK_ERROR: &'static str = RISK_FAILURE;

    fn render_input(input: &RiskInput, on_change: Callback<RiskInput>) -> Html {
        let update = |apply: fn(&mut RiskInput, u32)| {
            let current = input.clone();
            on_change.reform(move |value: u32| {
                let mut next = current.clone();
                apply(&mut next, value);
                next
            })
        };
        let on_gender = {
            let current = input.clone();
            on_change.reform(move |gender| RiskInput {
                gender,
                ..current.clone()
            })
        };
        let on_smoker = {
            let current = input.clone();
            on_change.reform(move |smoker| RiskInput {
                smoker,
                ..current.clone()
            })
        };
        let on_diabetes = {
            let current = input.clone();
            on_change.reform(move |diabetes| RiskInput {
                diabetes,
                ..current.clone()
            })
        };

        html! {
            <div class="risk-form">
                <div class="form-row">
                    { number_field("Age", "age", input.age, update(|r, v| r.age = v)) }
                    { select_field("Gender", "gender", input.gender, on_gender) }
                </div>
                <div class="form-row">
                    { number_field("Systolic BP (mmHg)", "systolicBP", input.systolic_bp, update(|r, v| r.systolic_bp = v)) }
                    { number_field("Total Cholesterol (mg/dL)", "cholesterol", input.cholesterol, update(|r, v| r.cholesterol = v)) }
                </div>
                { number_field("HDL Cholesterol (mg/dL)", "hdl", input.hdl, update(|r, v| r.hdl = v)) }
                <div class="form-row">
                    { select_field("Smoker", "smoker", input.smoker, on_smoker) }
                    { select_field("Has Diabetes", "diabetes", input.diabetes, on_diabetes) }
                </div>
            </div>
        }
    }

    fn request(input: RiskInput) -> impl Future<Output = Result<RiskReport, ApiError>> + 'static {
        async move { post_json(RISK_ENDPOINT, &input).await }
    }

    fn render_report(output: &RiskReport) -> Html {
        let class = level_class(output.level);
        let meter_width = format!("width: {}%;", output.score);

        html! {
            <div class="risk-report">
                <div class="risk-summary">
                    { render_field_label("10-Year Risk Score") }
                    <p class={classes!("risk-score", class)}>{ output.score_label() }</p>
                    <p class={classes!("risk-badge", class)}>{ output.level.badge_label() }</p>
                </div>
                <div class="meter meter-lg">
                    <div class={classes!("meter-fill", class)} style={meter_width}></div>
                </div>
                <div class="report-field">
                    { render_field_label("Explanation") }
                    <p class="explanation">{ &output.explanation }</p>
                </div>
                <div class="report-field">
                    { render_field_label("Primary Risk Factors") }
                    <div class="tag-list">
                        {
                            match output.risk_factors_listing() {
                                Listing::Empty(placeholder) => html! {
                                    <span class="tag-empty">{ placeholder }</span>
                                },
                                Listing::Entries(factors) => html! {
                                    <>
                                        { for factors.iter().map(|factor| html! {
                                            <span class="tag">{ factor }</span>
                                        }) }
                                    </>
                                },
                            }
                        }
                    </div>
                </div>
            </div>
        }
    }
}
