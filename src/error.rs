use std::path::PathBuf;

use thiserror::Error;

pub const SAFETY_MESSAGE: &str =
    "Yêu cầu của bạn đã bị chặn vì lý do an toàn. Vui lòng thử lại với một prompt hoặc hình ảnh khác.";
pub const EMPTY_RESULT_MESSAGE: &str =
    "AI không trả về hình ảnh nào. Vui lòng thử lại với prompt khác.";
pub const UNKNOWN_API_MESSAGE: &str = "Đã xảy ra lỗi không xác định khi gọi API.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Đã có lỗi không xác định xảy ra.";

/// Every failure a screen can surface. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", SAFETY_MESSAGE)]
    Safety,

    #[error("AI không thể hoàn thành yêu cầu. Lý do: {0}.")]
    Completion(String),

    #[error("{}", EMPTY_RESULT_MESSAGE)]
    EmptyResult,

    #[error("{}", .0.as_deref().unwrap_or(UNKNOWN_API_MESSAGE))]
    Unknown(Option<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A second submit while the first is still outstanding.
    #[error("A submission is already in progress")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    ReadFailure,
    Safety,
    Completion,
    EmptyResult,
    Unknown,
    Config,
    Busy,
}

impl StudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StudioError::Validation(_) => ErrorKind::Validation,
            StudioError::ReadFailure { .. } => ErrorKind::ReadFailure,
            StudioError::Safety => ErrorKind::Safety,
            StudioError::Completion(_) => ErrorKind::Completion,
            StudioError::EmptyResult => ErrorKind::EmptyResult,
            StudioError::Unknown(_) => ErrorKind::Unknown,
            StudioError::Config(_) => ErrorKind::Config,
            StudioError::Busy => ErrorKind::Busy,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        StudioError::Validation(message.into())
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            StudioError::Unknown(None)
        } else {
            StudioError::Unknown(Some(message))
        }
    }
}

impl From<reqwest::Error> for StudioError {
    fn from(err: reqwest::Error) -> Self {
        StudioError::unknown(err.to_string())
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::unknown(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_message_carries_reason() {
        let err = StudioError::Completion("OTHER".to_string());
        assert_eq!(
            err.to_string(),
            "AI không thể hoàn thành yêu cầu. Lý do: OTHER."
        );
        assert_eq!(err.kind(), ErrorKind::Completion);
    }

    #[test]
    fn test_unknown_falls_back_to_generic_message() {
        assert_eq!(StudioError::unknown("").to_string(), UNKNOWN_API_MESSAGE);
        assert_eq!(
            StudioError::unknown("connection refused").to_string(),
            "connection refused"
        );
    }

    #[test]
    fn test_read_failure_is_generic_for_the_user() {
        let err = StudioError::ReadFailure {
            path: PathBuf::from("missing.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        };
        assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::ReadFailure);
    }
}
