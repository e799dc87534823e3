//! アップロード用のファイル選択と検証
//!
//! ファイル選択もドラッグ&ドロップも同じ検証を通る:
//! MIMEタイプ、次にサイズ。

use crate::error::{Error, Result};
use crate::types::ImageMime;

/// 解析サービスが受け付ける最大サイズ（10 MiB）
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// file input の `accept` 属性値
pub const ACCEPT_ATTRIBUTE: &str = "image/jpeg,image/png,image/jpg";

/// 中身を読む前の、ユーザーが選んだファイルのメタデータ
pub trait CandidateFile {
    fn name(&self) -> String;
    fn mime(&self) -> String;
    fn size(&self) -> u64;
}

/// MIMEタイプとサイズをアップロード条件と照合
pub fn validate(mime: &str, size: u64) -> Result<ImageMime> {
    let mime = ImageMime::parse(mime).ok_or_else(|| Error::UnsupportedType(mime.to_string()))?;
    if size > MAX_FILE_SIZE {
        return Err(Error::FileTooLarge(size));
    }
    Ok(mime)
}

/// ファイル選択ダイアログで選ばれたファイルを検証
pub fn select_from_picker<F: CandidateFile>(file: &F) -> Result<ImageMime> {
    let mime = validate(&file.mime(), file.size())?;
    tracing::debug!(name = %file.name(), mime = mime.as_str(), "file accepted");
    Ok(mime)
}

/// ドロップされた先頭のファイルを検証。空なら何も選択しない
pub fn select_from_drop<F: CandidateFile>(files: &[F]) -> Result<Option<(&F, ImageMime)>> {
    match files.first() {
        Some(file) => select_from_picker(file).map(|mime| Some((file, mime))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFile {
        name: &'static str,
        mime: &'static str,
        size: u64,
    }

    impl CandidateFile for TestFile {
        fn name(&self) -> String {
            self.name.to_string()
        }
        fn mime(&self) -> String {
            self.mime.to_string()
        }
        fn size(&self) -> u64 {
            self.size
        }
    }

    fn file(mime: &'static str, size: u64) -> TestFile {
        TestFile { name: "beans.jpg", mime, size }
    }

    #[test]
    fn test_accepts_jpeg_and_png() {
        assert_eq!(select_from_picker(&file("image/jpeg", 2_000_000)).unwrap(), ImageMime::Jpeg);
        assert_eq!(select_from_picker(&file("image/png", 1)).unwrap(), ImageMime::Png);
        assert_eq!(select_from_picker(&file("image/jpg", 1)).unwrap(), ImageMime::Jpeg);
    }

    #[test]
    fn test_rejects_other_types() {
        for mime in ["image/gif", "image/webp", "application/pdf", "text/plain", ""] {
            let err = select_from_picker(&file(mime, 10)).unwrap_err();
            assert!(matches!(err, Error::UnsupportedType(_)), "{mime} should be rejected");
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(select_from_picker(&file("image/jpeg", MAX_FILE_SIZE)).is_ok());
        let err = select_from_picker(&file("image/jpeg", MAX_FILE_SIZE + 1)).unwrap_err();
        assert!(matches!(err, Error::FileTooLarge(size) if size == MAX_FILE_SIZE + 1));
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = select_from_picker(&file("image/gif", MAX_FILE_SIZE * 2)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }

    #[test]
    fn test_drop_uses_first_entry() {
        let files = [file("image/png", 10), file("image/gif", 10)];
        let (chosen, mime) = select_from_drop(&files).unwrap().unwrap();
        assert_eq!(chosen.mime, "image/png");
        assert_eq!(mime, ImageMime::Png);

        let files = [file("image/gif", 10), file("image/png", 10)];
        assert!(select_from_drop(&files).is_err());
    }

    #[test]
    fn test_drop_empty_payload() {
        let files: [TestFile; 0] = [];
        assert!(select_from_drop(&files).unwrap().is_none());
    }
}
