/*!
 * Tests for error types and conversions
 */

use subshift::errors::{AppError, SubtitleError};

#[test]
fn test_subtitleError_format_shouldDisplayLineAndMessage() {
    let error = SubtitleError::format(12, "malformed subtitle number");
    let display = format!("{}", error);
    assert!(display.contains("line 12"));
    assert!(display.contains("malformed subtitle number"));
}

#[test]
fn test_subtitleError_notFound_shouldDisplayNumber() {
    let display = SubtitleError::NotFound(42).to_string();
    assert!(display.contains("42"));
}

#[test]
fn test_subtitleError_isIo_shouldClassifyFileAndEncodingErrors() {
    assert!(SubtitleError::io("a.srt", "permission denied").is_io());
    assert!(SubtitleError::UnsupportedEncoding("x".to_string()).is_io());
    assert!(!SubtitleError::NotFound(1).is_io());
    assert!(!SubtitleError::format(1, "x").is_io());
}

#[test]
fn test_appError_fromSubtitleError_shouldWrap() {
    let error: AppError = SubtitleError::AnchorIsFirst(1).into();
    assert!(matches!(error, AppError::Subtitle(SubtitleError::AnchorIsFirst(1))));
    assert!(error.to_string().starts_with("Subtitle error"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
}
