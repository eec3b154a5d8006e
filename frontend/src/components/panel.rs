use super::utils::{render_error_message, render_spinner};
use crate::api::ApiError;
use sehat_shared::PanelState;
use serde::de::DeserializeOwned;
use std::future::Future;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Static copy shown around a panel.
pub struct PanelText {
    pub title: &'static str,
    pub description: &'static str,
    pub input_heading: &'static str,
    pub report_heading: &'static str,
    pub submit_label: &'static str,
    pub placeholder: &'static str,
    pub disclaimer: &'static str,
}

/// One submit-and-report flow: what it collects, where it sends it, and how
/// the answer is drawn.
pub trait PanelTask: 'static {
    type Input: Default + Clone + 'static;
    type Output: DeserializeOwned + Clone + 'static;

    const TEXT: PanelText;
    const FALLBACK_ERROR: &'static str;
    const MISSING_INPUT: &'static str = "";
    /// Whether picking a new input discards the last report.
    const RESET_ON_INPUT: bool = false;

    fn has_input(_input: &Self::Input) -> bool {
        true
    }

    fn render_input(input: &Self::Input, on_change: Callback<Self::Input>) -> Html;

    fn request(
        input: Self::Input,
    ) -> impl Future<Output = Result<Self::Output, ApiError>> + 'static;

    fn render_report(output: &Self::Output) -> Html;
}

pub enum PanelMsg<T: PanelTask> {
    InputChanged(T::Input),
    Submit,
    Completed(Result<T::Output, ApiError>),
}

pub struct Panel<T: PanelTask> {
    input: T::Input,
    state: PanelState<T::Output>,
}

impl<T: PanelTask> Component for Panel<T> {
    type Message = PanelMsg<T>;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            input: T::Input::default(),
            state: PanelState::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PanelMsg::InputChanged(input) => {
                self.input = input;
                if T::RESET_ON_INPUT {
                    self.state.input_changed();
                }
                true
            }
            PanelMsg::Submit => {
                if !self.state.submit(T::has_input(&self.input), T::MISSING_INPUT) {
                    return true;
                }
                let input = self.input.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let outcome = T::request(input).await;
                    // Dropped silently if the panel was unmounted meanwhile.
                    link.send_message(PanelMsg::Completed(outcome));
                });
                true
            }
            PanelMsg::Completed(Ok(output)) => {
                self.state.succeed(output);
                true
            }
            PanelMsg::Completed(Err(err)) => {
                log::error!("{} failed: {:?}", T::TEXT.title, err.message);
                self.state.fail(err.message, T::FALLBACK_ERROR);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_change = link.callback(PanelMsg::InputChanged);
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            PanelMsg::Submit
        });
        let submitting = self.state.is_submitting();
        let text = &T::TEXT;

        html! {
            <section class="panel">
                <h2 class="panel-title">{ text.title }</h2>
                <p class="panel-description">{ text.description }</p>

                <div class="panel-grid">
                    <div class="card">
                        <h3>{ text.input_heading }</h3>
                        <form {onsubmit}>
                            { T::render_input(&self.input, on_change) }
                            <button type="submit" class="submit-btn" disabled={submitting}>
                                {
                                    if submitting {
                                        render_spinner()
                                    } else {
                                        html! { <span>{ text.submit_label }</span> }
                                    }
                                }
                            </button>
                        </form>
                    </div>

                    <div class="card">
                        <h3>{ text.report_heading }</h3>
                        { self.render_report() }
                    </div>
                </div>
            </section>
        }
    }
}

impl<T: PanelTask> Panel<T> {
    fn render_report(&self) -> Html {
        match &self.state {
            PanelState::Submitting => html! {
                <div class="report-loading">{ render_spinner() }</div>
            },
            PanelState::Success(output) => html! {
                <div class="report fade-in">
                    { T::render_report(output) }
                    <p class="disclaimer">{ T::TEXT.disclaimer }</p>
                </div>
            },
            PanelState::Failed(message)
            | PanelState::Idle {
                notice: Some(message),
            } => render_error_message(message),
            PanelState::Idle { notice: None } => html! {
                <div class="report-placeholder">{ T::TEXT.placeholder }</div>
            },
        }
    }
}
