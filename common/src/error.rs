//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported file type: {0}")]
    UnsupportedMime(String),

    #[error("Invalid filter expression: {0}")]
    FilterParse(String),

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Invalid data URL: {0}")]
    DataUrl(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_filter_parse() {
        let error = Error::FilterParse("sharpen(2)".to_string());
        assert_eq!(format!("{}", error), "Invalid filter expression: sharpen(2)");
    }

    #[test]
    fn test_error_display_unknown_filter() {
        let error = Error::UnknownFilter("sharpen".to_string());
        assert_eq!(format!("{}", error), "Unknown filter: sharpen");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_from_image() {
        let image_error = image::load_from_memory(b"not an image").unwrap_err();
        let error: Error = image_error.into();
        assert!(matches!(error, Error::Image(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnsupportedMime("text/plain".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnsupportedMime"));
        assert!(debug.contains("text/plain"));
    }
}
