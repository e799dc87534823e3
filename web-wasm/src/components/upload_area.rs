//! アップロードエリアコンポーネント
//!
//! ギャラリー選択、ドラッグ&ドロップ領域、プレビュー画像。
//! 選択もドロップもアップロード前に同じ検証を通る。

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use qoffea_common::selection::ACCEPT_ATTRIBUTE;
use qoffea_common::{select_from_drop, select_from_picker, ImageMime, SourceTag};
use web_sys::{DragEvent, File};

use crate::app::WorkflowSlot;
use crate::media::{files_from, read_artifact};

#[component]
pub fn UploadArea<F>(
    workflow: WorkflowSlot,
    preview: RwSignal<String>,
    on_open_camera: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    let file_input = NodeRef::<Input>::new();
    let (is_dragover, set_is_dragover) = signal(false);

    let on_gallery = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_file_change = move |_| {
        let Some(input) = file_input.get() else {
            return;
        };
        let picked = input.files().map(files_from).unwrap_or_default();
        // リセット後に同じファイルを再選択できるようにする
        input.set_value("");

        let Some(file) = picked.into_iter().next() else {
            return;
        };
        match select_from_picker(&file) {
            Ok(mime) => upload_file(workflow, file.0, mime),
            Err(error) => workflow.with_value(|wf| wf.report_error(&error)),
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        let dropped = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .map(files_from)
            .unwrap_or_default();
        match select_from_drop(&dropped) {
            Ok(Some((file, mime))) => upload_file(workflow, file.0.clone(), mime),
            Ok(None) => {}
            Err(error) => workflow.with_value(|wf| wf.report_error(&error)),
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    view! {
        <section
            class="upload-section"
            class:dragover=move || is_dragover.get()
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <img
                class="upload-section__preview-image"
                src=move || preview.get()
                alt="Pratinjau biji kopi"
            />

            <div class="upload-section__actions">
                <button
                    class="btn btn-qoffea-primary"
                    id="openCameraBtn"
                    on:click={
                        let on_open_camera = on_open_camera.clone();
                        move |_| on_open_camera(())
                    }
                >
                    "Kamera"
                </button>
                <button class="btn btn-qoffea-secondary" id="openGalleryBtn" on:click=on_gallery>
                    "Galeri"
                </button>
            </div>

            <input
                type="file"
                id="imageInput"
                accept=ACCEPT_ATTRIBUTE
                style="display: none;"
                node_ref=file_input
                on:change=on_file_change
            />
            <p class="text-muted">"Format: JPG, JPEG, PNG (maks. 10MB)"</p>
        </section>
    }
}

fn upload_file(workflow: WorkflowSlot, file: File, mime: ImageMime) {
    let wf = workflow.get_value();
    spawn_local(async move {
        match read_artifact(&file, mime).await {
            Ok(image) => {
                let _ = wf.submit(image, SourceTag::Gallery).await;
            }
            Err(error) => wf.report_error(&error),
        }
    });
}

