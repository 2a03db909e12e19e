use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The cluster refused or could not take the request right now (429, 5xx, connect
    // or timeout failures). The service never retries, but callers may.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    // maps an http status returned by the search cluster to an error kind
    pub fn database_or_unavailable(message: &str, status: u16, reason: Option<String>) -> LibraryError {
        match status {
            404 => LibraryError::not_found(
                format!("not found error {:?} {:?}", message, reason).as_str()),
            409 => LibraryError::duplicate_key(
                format!("conflict error {:?} {:?}", message, reason).as_str()),
            400 => LibraryError::validation(
                format!("bad request error {:?} {:?}", message, reason).as_str(), reason),
            429 | 500..=599 => LibraryError::unavailable(
                format!("search cluster unavailable error {:?} {:?}", message, reason).as_str(), reason, true),
            _ => LibraryError::database(
                format!("search cluster error {} {:?} {:?}", status, message, reason).as_str(), reason, false),
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for store and configuration operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page token, i.e. offset of the first record
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// RecordStatus is the outcome of a mutating book operation, rendered into a ResultData
// message at the service boundary.
#[derive(Debug, PartialEq, Clone)]
pub enum RecordStatus {
    Empty(String),
    Exists,
    AddSuccess,
    AddError,
    DeleteSuccess(String),
    DeleteError(String),
    UpdateSuccess(String),
    UpdateError(String),
}

impl RecordStatus {
    pub fn is_error(&self) -> bool {
        !matches!(self, RecordStatus::AddSuccess | RecordStatus::DeleteSuccess(_) | RecordStatus::UpdateSuccess(_))
    }
}

impl Display for RecordStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RecordStatus::Empty(field) => write!(f, "{} field cannot be empty.", field),
            RecordStatus::Exists => write!(f, "Book's ISBN and/or Title matches with the existing record."),
            RecordStatus::AddSuccess => write!(f, "Book record has been successfully added."),
            RecordStatus::AddError => write!(f, "Error occurred while adding book record."),
            RecordStatus::DeleteSuccess(id) => write!(f, "Book record with ID: {} has been successfully deleted.", id),
            RecordStatus::DeleteError(id) => write!(f, "Error deleting book record with ID: {}", id),
            RecordStatus::UpdateSuccess(id) => write!(f, "Book record with ID: {} has been successfully updated.", id),
            RecordStatus::UpdateError(id) => write!(f, "Error updating book record with ID: {}", id),
        }
    }
}

/// Outcome of add, update and delete: an error flag plus a message that callers show as-is.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ResultData {
    error: bool,
    message: String,
}

impl ResultData {
    pub fn of(error: bool, message: &str) -> Self {
        ResultData {
            error,
            message: message.to_string(),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<RecordStatus> for ResultData {
    fn from(status: RecordStatus) -> Self {
        ResultData::of(status.is_error(), status.to_string().as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{LibraryError, RecordStatus, ResultData};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(LibraryError::database("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(LibraryError::validation("test", None), LibraryError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_serialization_error() {
        assert!(matches!(LibraryError::serialization("test"), LibraryError::Serialization{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_runtime_error() {
        assert!(matches!(LibraryError::runtime("test", None), LibraryError::Runtime{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LibraryError::database_or_unavailable("test", 404, None), LibraryError::NotFound{ message: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", 409, None), LibraryError::DuplicateKey{ message: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", 400, Some("parsing_exception".to_string())), LibraryError::Validation{ message: _, reason_code: Some(_) }));
        assert!(matches!(LibraryError::database_or_unavailable("test", 429, None), LibraryError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: true }));
        assert!(matches!(LibraryError::database_or_unavailable("test", 503, None), LibraryError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: true }));
        assert!(matches!(LibraryError::database_or_unavailable("test", 405, None), LibraryError::Database{ message: _, reason_code: _, retryable: false }));
    }

    #[tokio::test]
    async fn test_should_render_status_messages() {
        assert_eq!("ISBN field cannot be empty.", RecordStatus::Empty("ISBN".to_string()).to_string());
        assert_eq!("Book's ISBN and/or Title matches with the existing record.", RecordStatus::Exists.to_string());
        assert_eq!("Book record with ID: abc12345 has been successfully deleted.",
                   RecordStatus::DeleteSuccess("abc12345".to_string()).to_string());
        assert_eq!("Error updating book record with ID: abc12345",
                   RecordStatus::UpdateError("abc12345".to_string()).to_string());
    }

    #[tokio::test]
    async fn test_should_build_result_from_status() {
        let ok = ResultData::from(RecordStatus::AddSuccess);
        assert!(!ok.has_error());
        assert_eq!("Book record has been successfully added.", ok.message());

        for status in vec![
            RecordStatus::Empty("Title".to_string()),
            RecordStatus::Exists,
            RecordStatus::AddError,
            RecordStatus::DeleteError("x".to_string()),
            RecordStatus::UpdateError("x".to_string()),
        ] {
            assert!(ResultData::from(status).has_error());
        }
        assert!(!ResultData::from(RecordStatus::UpdateSuccess("x".to_string())).has_error());
        assert!(!ResultData::from(RecordStatus::DeleteSuccess("x".to_string())).has_error());
    }

    #[tokio::test]
    async fn test_should_serialize_result() {
        let json = serde_json::to_value(ResultData::of(true, "boom")).expect("serialize result");
        assert_eq!(serde_json::json!({"error": true, "message": "boom"}), json);
    }
}
