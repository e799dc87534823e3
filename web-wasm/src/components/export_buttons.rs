//! レポートダウンロード / 再解析ボタン

use leptos::prelude::*;

#[component]
pub fn ExportButtons<FD, FR>(
    on_download_pdf: FD,
    on_analyze_again: FR,
) -> impl IntoView
where
    FD: Fn(()) + 'static + Clone,
    FR: Fn(()) + 'static + Clone,
{
    view! {
        <div class="text-center mb-4 export-buttons">
            <button
                class="btn btn-qoffea-primary"
                id="downloadPdfBtn"
                on:click={
                    let on_download_pdf = on_download_pdf.clone();
                    move |_| on_download_pdf(())
                }
            >
                "Unduh Laporan PDF"
            </button>

            <button
                class="btn btn-outline-secondary"
                id="analyzeAgainBtn"
                on:click={
                    let on_analyze_again = on_analyze_again.clone();
                    move |_| on_analyze_again(())
                }
            >
                "Analisis Lagi"
            </button>
        </div>
    }
}
