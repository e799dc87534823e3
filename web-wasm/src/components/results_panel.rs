//! 結果パネルコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use qoffea_common::messages::{ANNOTATED_IMAGE_ALT, ANNOTATED_IMAGE_FAILED};
use qoffea_common::ResultView;

use crate::app::WorkflowSlot;
use crate::components::export_buttons::ExportButtons;
use crate::presenter::notify_error;

#[component]
pub fn ResultsPanel(workflow: WorkflowSlot, result: RwSignal<Option<ResultView>>) -> impl IntoView {
    move || {
        result
            .get()
            .map(|result| view! { <ResultBody workflow=workflow result=result /> })
    }
}

#[component]
fn ResultBody(workflow: WorkflowSlot, result: ResultView) -> impl IntoView {
    let on_download_pdf = move |_| {
        let wf = workflow.get_value();
        spawn_local(async move {
            let _ = wf.download_report().await;
        });
    };

    let on_analyze_again = move |_| {
        workflow.with_value(|wf| wf.reset());
    };

    view! {
        <section class="results-section">
            <div class="results-section__body">
                <div class="statistics-container mt-3">
                    <div class="statistics-grid">
                        <div class="stat-item">
                            <span class="stat-label">"Total Biji:"</span>
                            <span class="stat-value">{result.total_beans}</span>
                        </div>
                        <div class="stat-item stat-good">
                            <span class="stat-label">"Biji Baik:"</span>
                            <span class="stat-value">{result.good_beans}</span>
                        </div>
                        <div class="stat-item stat-defect">
                            <span class="stat-label">"Biji Cacat:"</span>
                            <span class="stat-value">{result.defect_beans}</span>
                        </div>
                    </div>
                </div>

                <div class="grade-bar">
                    <div
                        class="segment-good"
                        style:height=result.good_bar_height.clone()
                        title=result.good_title.clone()
                    ></div>
                    <div
                        class="segment-defect"
                        style:height=result.defect_bar_height.clone()
                        title=result.defect_title.clone()
                    ></div>
                </div>

                <div class="grade-text">
                    <div class="grade-text__item grade-text--good">
                        "Baik "<span>{result.good_text.clone()}</span>
                    </div>
                    <div class="grade-text__item grade-text--defect">
                        "Cacat "<span>{result.defect_text.clone()}</span>
                    </div>
                </div>

                {result.grade.clone().map(|grade| view! { <p class="grade-label">"Grade: "{grade}</p> })}
            </div>
        </section>

        {result.annotated_image_url.clone().map(|url| view! { <AnnotatedImage url=url /> })}

        <ExportButtons on_download_pdf=on_download_pdf on_analyze_again=on_analyze_again />
    }
}

#[component]
fn AnnotatedImage(url: String) -> impl IntoView {
    let on_error = {
        let url = url.clone();
        move |_| {
            gloo::console::error!("Failed to load image from:", url.clone());
            notify_error(ANNOTATED_IMAGE_FAILED);
        }
    };

    view! {
        <section class="analysis-image-section">
            <img src=url alt=ANNOTATED_IMAGE_ALT on:error=on_error />
        </section>
    }
}
