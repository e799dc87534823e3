//! メインアプリケーションコンポーネント

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use qoffea_common::{AnalysisClient, ApiConfig, CameraSession, CaptureController, Workflow};

use crate::api::FetchTransport;
use crate::components::{
    camera_modal::CameraModal,
    header::Header,
    loading_overlay::LoadingOverlay,
    results_panel::ResultsPanel,
    upload_area::UploadArea,
};
use crate::media::WebStream;
use crate::presenter::DomPresenter;

pub type AppWorkflow = Workflow<FetchTransport, DomPresenter>;

/// コンポーネント間で共有するワークフロー。非同期処理ではcloneして持ち出す
pub type WorkflowSlot = StoredValue<Rc<AppWorkflow>, LocalStorage>;

/// ページに1つだけのカメラコントローラ
pub type CameraSlot = StoredValue<RefCell<CaptureController<WebStream>>, LocalStorage>;

#[component]
pub fn App() -> impl IntoView {
    let presenter = DomPresenter::new();
    let client = AnalysisClient::new(ApiConfig::default(), FetchTransport);
    let workflow: WorkflowSlot = StoredValue::new_local(Rc::new(Workflow::new(client, presenter)));
    let camera: CameraSlot = StoredValue::new_local(RefCell::new(CaptureController::new()));

    // モーダル表示中は Some。開くたびに新しいセッション
    let (camera_session, set_camera_session) = signal(None::<CameraSession>);

    let on_open_camera = move |_| {
        let opened = camera.with_value(|c| c.borrow_mut().open());
        match opened {
            Ok(session) => set_camera_session.set(Some(session)),
            Err(error) => workflow.with_value(|wf| wf.report_error(&error)),
        }
    };

    view! {
        <div class="container">
            <Header />

            <UploadArea
                workflow=workflow
                preview=presenter.preview
                on_open_camera=on_open_camera
            />

            {move || {
                camera_session.get().map(|session| {
                    view! {
                        <CameraModal
                            workflow=workflow
                            camera=camera
                            session=session
                            set_session=set_camera_session
                        />
                    }
                })
            }}

            <ResultsPanel workflow=workflow result=presenter.result />

            <LoadingOverlay message=presenter.loading />
        </div>
    }
}
