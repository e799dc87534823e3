//! カメラモーダルコンポーネント
//!
//! 開いている間だけマウントされる。video 要素がDOMに入った時点でカメラを起動し、
//! モーダルが消える理由にかかわらずクリーンアップで閉じる。

use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use qoffea_common::{CameraSession, SourceTag, VideoConstraints};
use web_sys::HtmlVideoElement;

use crate::app::{CameraSlot, WorkflowSlot};
use crate::media::{encode_frame, request_stream, WebStream};

#[component]
pub fn CameraModal(
    workflow: WorkflowSlot,
    camera: CameraSlot,
    session: CameraSession,
    set_session: WriteSignal<Option<CameraSession>>,
) -> impl IntoView {
    let close_modal = move || set_session.set(None);
    let video_ref = NodeRef::<Video>::new();
    let (error_message, set_error_message) = signal(None::<String>);
    let (can_capture, set_can_capture) = signal(false);

    Effect::new(move |_| {
        if let Some(video) = video_ref.get() {
            spawn_local(start_camera(camera, session, video, set_error_message, set_can_capture));
        }
    });

    on_cleanup(move || {
        camera.with_value(|c| c.borrow_mut().close());
    });

    let on_capture = move |_| {
        let video = camera.with_value(|c| c.borrow().begin_capture().map(|s| s.video().clone()));
        let video = match video {
            Ok(video) => video,
            Err(error) => {
                workflow.with_value(|wf| wf.report_error(&error));
                return;
            }
        };
        set_can_capture.set(false);

        spawn_local(async move {
            let captured = match encode_frame(&video).await {
                Ok(encoded) => camera.with_value(|c| c.borrow_mut().finish_capture(encoded)),
                Err(error) => Err(error),
            };

            let wf = workflow.get_value();
            match captured {
                Ok(image) => {
                    close_modal();
                    let _ = wf.submit(image, SourceTag::Camera).await;
                }
                Err(error) => {
                    set_can_capture.set(camera.with_value(|c| c.borrow().can_capture()));
                    wf.report_error(&error);
                }
            }
        });
    };

    view! {
        <div class="camera-modal-backdrop">
            <div class="modal-dialog modal-lg modal-dialog-centered">
                <div class="modal-content">
                    <div class="modal-header">
                        <h5 class="modal-title">"Ambil Foto Biji Kopi"</h5>
                        <button
                            type="button"
                            class="btn-close"
                            aria-label="Close"
                            on:click=move |_| close_modal()
                        ></button>
                    </div>

                    <div class="modal-body text-center">
                        <video
                            node_ref=video_ref
                            class="camera-video"
                            style:display=move || {
                                if error_message.get().is_some() { "none" } else { "block" }
                            }
                        ></video>
                        <Show when=move || error_message.get().is_some()>
                            <div class="alert alert-danger mt-3">
                                {move || error_message.get().unwrap_or_default()}
                            </div>
                        </Show>
                    </div>

                    <div class="modal-footer">
                        <button
                            type="button"
                            class="btn btn-secondary"
                            on:click=move |_| close_modal()
                        >
                            "Batal"
                        </button>
                        <button
                            type="button"
                            class="btn btn-qoffea-primary"
                            id="capturePhotoBtn"
                            disabled=move || !can_capture.get()
                            on:click=on_capture
                        >
                            "Ambil Foto"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

async fn start_camera(
    camera: CameraSlot,
    session: CameraSession,
    video: HtmlVideoElement,
    set_error_message: WriteSignal<Option<String>>,
    set_can_capture: WriteSignal<bool>,
) {
    video.set_autoplay(true);
    let _ = video.set_attribute("playsinline", "");

    match request_stream(&VideoConstraints::default()).await {
        Ok(stream) => {
            video.set_src_object(Some(&stream));
            let bound = camera.with_value(|c| {
                c.borrow_mut()
                    .stream_acquired(session, WebStream::new(stream, video.clone()))
            });
            if bound.is_ok() {
                set_error_message.set(None);
                set_can_capture.set(true);
            }
        }
        Err(failure) => {
            gloo::console::error!("Camera error:", failure.detail.clone());
            let message = camera.with_value(|c| c.borrow_mut().stream_failed(session, failure));
            if let Some(message) = message {
                set_error_message.set(Some(message));
                set_can_capture.set(false);
            }
        }
    }
}
