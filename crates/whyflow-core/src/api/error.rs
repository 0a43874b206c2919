//! ServiceError - service のエラーと envelope への対応付け

use serde_json::json;

use super::envelope::{ApiResponse, ErrorCode, HttpStatus};
use super::request::ValidationErrors;
use super::source::SourceError;

/// 内部エラー時に返すメッセージ（原因はログにだけ出す）
pub const GENERATION_FAILED: &str = "Failed to generate competitor selection execution";

/// 拒否したリクエストに返すメッセージ
pub const INVALID_PARAMETERS: &str = "Invalid request parameters";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid request parameters")]
    Validation(#[from] ValidationErrors),

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: SourceError,
    },
}

impl ServiceError {
    pub fn internal(source: SourceError) -> Self {
        ServiceError::Internal {
            message: GENERATION_FAILED.to_string(),
            source,
        }
    }

    pub fn status(&self) -> HttpStatus {
        match self {
            ServiceError::Validation(_) => HttpStatus::BadRequest,
            ServiceError::Internal { .. } => HttpStatus::InternalServerError,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Validation(_) => ErrorCode::ValidationError,
            ServiceError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// 検証エラーならフィールドエラー、内部エラーなら無し
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServiceError::Validation(errors) => Some(json!({ "errors": errors.0 })),
            ServiceError::Internal { .. } => None,
        }
    }

    pub fn to_response(&self, timestamp: String) -> ApiResponse {
        ApiResponse::error(self.to_string(), self.code(), self.details(), timestamp)
    }
}
