/*!
 * Tests for error types and conversions
 */

use stalign::errors::{AlignmentError, AppError, ExtractionError, OperationError};

#[test]
fn test_extractionError_markerCountMismatch_shouldDisplayCounts() {
    let error = ExtractionError::MarkerCountMismatch { markers: 3, identities: 2 };
    let display = format!("{}", error);
    assert!(display.contains("3 subtitle markers"));
    assert!(display.contains("2 persistent ids"));
}

#[test]
fn test_alignmentError_bandTooNarrow_shouldDisplayBand() {
    let error = AlignmentError::BandTooNarrow { band: 2, rows: 10, cols: 4 };
    let display = format!("{}", error);
    assert!(display.contains("band of 2"));
    assert!(display.contains("(10, 4)"));
}

#[test]
fn test_operationError_unhandledPattern_shouldKeepHandleThisMarker() {
    let error = OperationError::UnhandledPattern { pattern: "DA".to_string(), from_index: Some(7) };
    let display = format!("{}", error);
    assert!(display.starts_with("Handle this!"));
    assert!(display.contains("[DA]"));
    assert!(display.contains("Some(7)"));
}

#[test]
fn test_appError_fromOperationError_shouldWrapCorrectly() {
    let app_error: AppError = OperationError::InvalidStartingId(0).into();
    let display = format!("{}", app_error);
    assert!(display.contains("Operation error"));
    assert!(display.contains("starting operation id: 0"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhow_shouldWrapAsUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(ref message) if message == "something odd"));
}
