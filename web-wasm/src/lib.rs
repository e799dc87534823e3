//! Qoffea Webアプリ (Leptos + WASM)

mod app;
mod browser;
mod components;
mod landing;
mod presenter;

pub mod api;
pub mod media;

use wasm_bindgen::prelude::*;

/// `<body data-page="landing">` のページではランディング用ダイアログをマウント
fn is_landing_page() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .and_then(|b| b.get_attribute("data-page"))
        .is_some_and(|page| page == "landing")
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if is_landing_page() {
        leptos::mount::mount_to_body(landing::LandingUpload);
    } else {
        leptos::mount::mount_to_body(app::App);
    }
}
