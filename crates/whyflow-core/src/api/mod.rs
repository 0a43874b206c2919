//! API - HTTP の背後にある service 層
//!
//! - **envelope**: success / error レスポンスの形
//! - **request**: POST body / GET クエリのパースと検証
//! - **source**: `ExecutionSource` port + デモ実装
//! - **service**: 検証 -> 取得 -> envelope（ログ付き）
//! - **error**: `ServiceError` と status / code の対応

pub mod envelope;
pub mod error;
pub mod request;
pub mod service;
pub mod source;

pub use self::envelope::{
    ApiResponse, ErrorBody, ErrorCode, ErrorResponse, HttpStatus, SuccessResponse,
};
pub use self::error::{GENERATION_FAILED, INVALID_PARAMETERS, ServiceError};
pub use self::request::{
    CompetitorSelectionRequest, ExecutionOptions, SelectionQuery, ValidationErrors,
    validate_request,
};
pub use self::service::CompetitorSelectionService;
pub use self::source::{DemoExecutionSource, ExecutionSource, SourceError};
