//! ローディングオーバーレイコンポーネント

use leptos::prelude::*;

#[component]
pub fn LoadingOverlay(message: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="loading-overlay" id="loadingOverlay">
                <div class="loading-content">
                    <div class="spinner-border text-primary" role="status">
                        <span class="visually-hidden">"Loading..."</span>
                    </div>
                    <p class="loading-text mt-3">
                        {move || message.get().unwrap_or_default()}
                    </p>
                </div>
            </div>
        </Show>
    }
}
