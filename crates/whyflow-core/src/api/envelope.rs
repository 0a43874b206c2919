//! Response envelope - すべての API エンドポイント共通のレスポンス形
//!
//! ```text
//! { "success": true,  "data": <DecisionExecution>, "timestamp": "..." }
//! { "success": false, "error": { "message", "code", "details"? }, "timestamp": "..." }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::DecisionExecution;

/// envelope と一緒に運ぶ HTTP ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpStatus {
    Ok,
    BadRequest,
    InternalServerError,
}

impl HttpStatus {
    pub fn as_u16(self) -> u16 {
        match self {
            HttpStatus::Ok => 200,
            HttpStatus::BadRequest => 400,
            HttpStatus::InternalServerError => 500,
        }
    }
}

/// 機械可読なエラー分類
///
/// SCREAMING_SNAKE_CASE でシリアライズ: VALIDATION_ERROR / INTERNAL_ERROR /
/// INVALID_REQUEST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InternalError,
    InvalidRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub data: DecisionExecution,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl ApiResponse {
    pub fn success(data: DecisionExecution, timestamp: String) -> Self {
        ApiResponse::Success(SuccessResponse {
            success: true,
            data,
            timestamp,
        })
    }

    pub fn error(
        message: impl Into<String>,
        code: ErrorCode,
        details: Option<serde_json::Value>,
        timestamp: String,
    ) -> Self {
        ApiResponse::Error(ErrorResponse {
            success: false,
            error: ErrorBody {
                message: message.into(),
                code,
                details,
            },
            timestamp,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    pub fn data(&self) -> Option<&DecisionExecution> {
        match self {
            ApiResponse::Success(ok) => Some(&ok.data),
            ApiResponse::Error(_) => None,
        }
    }
}
