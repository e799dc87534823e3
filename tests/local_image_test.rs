//! ローカル画像ファイルテスト
//!
//! MIMEタイプはファイルの中身から判定し、
//! ブラウザと同じ選択ルールを適用する

use qoffea::error::QoffeaError;
use qoffea::local_image::LocalImage;
use qoffea_common::{select_from_picker, CandidateFile, Error, ImageMime, MAX_FILE_SIZE};
use std::path::Path;
use tempfile::tempdir;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

#[test]
fn test_missing_file() {
    let err = LocalImage::open(Path::new("/nonexistent/beans.jpg")).unwrap_err();
    assert!(matches!(err, QoffeaError::FileNotFound(_)));
}

/// 拡張子ではなく中身で判定
#[test]
fn test_png_sniffed_from_content() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("beans.jpg");
    std::fs::write(&path, PNG_MAGIC).unwrap();

    let image = LocalImage::open(&path).unwrap();
    assert_eq!(image.mime(), "image/png");
    assert_eq!(image.name(), "beans.jpg");
    assert_eq!(image.size(), PNG_MAGIC.len() as u64);
    assert_eq!(select_from_picker(&image).unwrap(), ImageMime::Png);
}

#[test]
fn test_jpeg_read_into_artifact() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("kopi.jpeg");
    std::fs::write(&path, JPEG_MAGIC).unwrap();

    let image = LocalImage::open(&path).unwrap();
    let mime = select_from_picker(&image).unwrap();
    assert_eq!(mime, ImageMime::Jpeg);

    let artifact = image.read(mime).unwrap();
    assert_eq!(artifact.file_name, "kopi.jpeg");
    assert_eq!(artifact.bytes, JPEG_MAGIC);
}

#[test]
fn test_text_file_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.png");
    std::fs::write(&path, "hello").unwrap();

    let image = LocalImage::open(&path).unwrap();
    assert!(matches!(
        select_from_picker(&image),
        Err(Error::UnsupportedType(_))
    ));
}

/// サイズはメタデータから取得（中身は読まない）
#[test]
fn test_oversize_file_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("big.png");
    std::fs::write(&path, PNG_MAGIC).unwrap();
    std::fs::OpenOptions::new()
        .write(true)
        .open(&path)
        .unwrap()
        .set_len(MAX_FILE_SIZE + 1)
        .unwrap();

    let image = LocalImage::open(&path).unwrap();
    assert!(matches!(
        select_from_picker(&image),
        Err(Error::FileTooLarge(_))
    ));
}
