//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Qoffea"</h1>
            <p class="text-muted">"Analisis kualitas biji kopi dari foto"</p>
        </header>
    }
}
