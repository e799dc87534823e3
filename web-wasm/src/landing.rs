//! ランディングページのアップロードダイアログ
//!
//! ドロップゾーンは選ばれたファイルを記録するだけ。
//! ここでは検証もアップロードもしない。

use leptos::html::Input;
use leptos::prelude::*;
use qoffea_common::DropZone;
use web_sys::{DragEvent, FileList};

const DROP_ZONE_LABEL: &str = "Tekan atau tarik file ke sini untuk mengunggah";

fn first_name(files: &FileList) -> Option<String> {
    files.get(0).map(|f| f.name())
}

#[component]
pub fn LandingUpload() -> impl IntoView {
    let zone = RwSignal::new(DropZone::new(DROP_ZONE_LABEL));
    let (dialog_open, set_dialog_open) = signal(false);
    let file_input = NodeRef::<Input>::new();

    let on_change = move |_| {
        let name = file_input
            .get()
            .and_then(|input| input.files())
            .and_then(|files| first_name(&files));
        zone.update(|z| z.pick(name.as_deref()));
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        zone.update(|z| z.drag_over());
    };

    let on_dragleave = move |_: DragEvent| {
        zone.update(|z| z.drag_leave());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        let files = ev.data_transfer().and_then(|dt| dt.files());
        let name = files.as_ref().and_then(first_name);
        if let (Some(files), Some(input), true) = (&files, file_input.get(), name.is_some()) {
            input.set_files(Some(files));
        }
        zone.update(|z| z.drop_files(name.as_deref()));
    };

    let on_close = move |_| {
        if let Some(input) = file_input.get() {
            input.set_value("");
        }
        zone.update(|z| z.dialog_closed());
        set_dialog_open.set(false);
    };

    view! {
        <button
            type="button"
            class="btn btn-qoffea-primary"
            on:click=move |_| set_dialog_open.set(true)
        >
            "Unggah Gambar"
        </button>

        <div
            class="modal"
            id="uploadModal"
            style:display=move || if dialog_open.get() { "block" } else { "none" }
        >
            <div class="modal-dialog modal-dialog-centered">
                <div class="modal-content">
                    <div class="modal-header">
                        <h5 class="modal-title">"Unggah Gambar Biji Kopi"</h5>
                        <button
                            type="button"
                            class="btn-close"
                            aria-label="Close"
                            on:click=on_close
                        ></button>
                    </div>
                    <div class="modal-body">
                        <label
                            for="fileUploadInput"
                            class="drag-drop-zone"
                            class:drag-over=move || zone.with(|z| z.is_drag_active())
                            class:file-selected=move || zone.with(|z| z.is_file_selected())
                            on:dragover=on_dragover
                            on:dragleave=on_dragleave
                            on:drop=on_drop
                        >
                            <span class="fw-bold">{move || zone.with(|z| z.label().to_string())}</span>
                        </label>
                        <input
                            type="file"
                            id="fileUploadInput"
                            class="d-none"
                            node_ref=file_input
                            on:change=on_change
                        />
                    </div>
                </div>
            </div>
        </div>
    }
}
