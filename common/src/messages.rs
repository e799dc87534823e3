//! ユーザー向け文字列
//!
//! 製品はインドネシア語。ユーザーに見せる文字列はすべてここに置き、
//! ブラウザ版とターミナル版で同じ文言を使う。

pub const CAMERA_FAILED_PREFIX: &str = "Gagal mengakses kamera. ";
pub const CAMERA_PERMISSION_DENIED: &str =
    "Izin kamera ditolak. Silakan izinkan akses kamera di pengaturan browser.";
pub const CAMERA_NOT_FOUND: &str = "Kamera tidak ditemukan pada perangkat ini.";
pub const CAMERA_BUSY: &str = "Kamera sedang digunakan oleh aplikasi lain.";
pub const CAMERA_UNSUPPORTED: &str = "Browser Anda tidak mendukung akses kamera";
pub const CAMERA_NOT_READY: &str = "Kamera belum siap";
pub const CAPTURE_FAILED: &str = "Gagal mengambil foto";

pub const INVALID_FILE_TYPE: &str = "Format file tidak valid. Gunakan JPG, JPEG, atau PNG.";
pub const FILE_TOO_LARGE: &str = "Ukuran file terlalu besar. Maksimal 10MB.";

pub const ANALYZING: &str = "Menganalisis gambar...";
pub const ANALYSIS_FAILED: &str = "Analisis gagal";
pub const ANALYSIS_FAILED_PREFIX: &str = "Gagal menganalisis gambar: ";

pub const NO_ANALYSIS: &str = "Tidak ada analisis untuk diunduh";
pub const GENERATING_PDF: &str = "Membuat PDF...";
pub const PDF_UNAVAILABLE: &str = "Gagal membuat PDF";
pub const PDF_DOWNLOAD_FAILED_PREFIX: &str = "Gagal mengunduh PDF: ";
pub const PDF_DOWNLOADED: &str = "PDF berhasil diunduh!";

pub const ANNOTATED_IMAGE_FAILED: &str =
    "Gambar hasil analisis gagal dimuat. File mungkin sudah dihapus dari server (ephemeral storage).";
pub const ANNOTATED_IMAGE_ALT: &str = "Analisis Biji Kopi dengan Deteksi";

pub const FILE_SELECTED_PREFIX: &str = "✅ File terpilih: ";

/// 画像未選択時のプレビュー
pub const PREVIEW_PLACEHOLDER: &str = "Assets/coffe_beans.jpg";
