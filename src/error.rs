use thiserror::Error;

#[derive(Error, Debug)]
pub enum QoffeaError {
    #[error("Kesalahan konfigurasi: {0}")]
    Config(String),

    #[error("File tidak ditemukan: {0}")]
    FileNotFound(String),

    #[error("Kesalahan JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Kesalahan IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Kesalahan dialog: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("Klien HTTP tidak dapat dibuat: {0}")]
    HttpClient(String),

    #[error("{0}")]
    Common(#[from] qoffea_common::Error),

    /// プレゼンターでユーザーに表示済み
    #[error("{0}")]
    Reported(qoffea_common::Error),
}

pub type Result<T> = std::result::Result<T, QoffeaError>;
