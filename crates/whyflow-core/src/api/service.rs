//! CompetitorSelectionService - HTTP ルートの背後のリクエスト処理
//!
//! 成功でも失敗でも、結果はすべて `(HttpStatus, ApiResponse)` として出ていきます。
//! 内部原因は `tracing` でログに出し、レスポンスでは汎用メッセージに置き換えます。

use std::sync::Arc;

use tracing::{debug, error, info};

use super::envelope::{ApiResponse, HttpStatus};
use super::error::ServiceError;
use super::request::{CompetitorSelectionRequest, SelectionQuery, validate_request};
use super::source::{DemoExecutionSource, ExecutionSource, SourceError};
use crate::domain::{DecisionExecution, iso_timestamp};
use crate::ports::{Clock, SystemClock};

pub struct CompetitorSelectionService {
    source: Arc<dyn ExecutionSource>,
    clock: Arc<dyn Clock>,
}

impl CompetitorSelectionService {
    pub fn new(source: Arc<dyn ExecutionSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    /// demo source + 壁時計
    pub fn demo() -> Self {
        Self::new(Arc::new(DemoExecutionSource::system()), Arc::new(SystemClock))
    }

    /// execution を取得し、ID があることを確認
    pub async fn get_execution(
        &self,
        request: Option<&CompetitorSelectionRequest>,
    ) -> Result<DecisionExecution, ServiceError> {
        let execution = self.source.fetch(request).await.map_err(|e| {
            error!(error = %e, "error generating competitor selection execution");
            ServiceError::internal(e)
        })?;

        if execution.execution_id().is_empty() {
            let cause = SourceError::InvalidExecution("missing executionId".to_string());
            error!(error = %cause, "error generating competitor selection execution");
            return Err(ServiceError::internal(cause));
        }

        Ok(execution)
    }

    /// GET: クエリパラメータはログに出すだけ
    pub async fn handle_get(&self, query: &SelectionQuery) -> (HttpStatus, ApiResponse) {
        debug!(filter = ?query.filter, limit = ?query.limit, "competitor selection GET");
        let result = self.get_execution(None).await;
        self.respond(result)
    }

    /// POST: JSON でない body は `{}` 扱い
    pub async fn handle_post(&self, body: &[u8]) -> (HttpStatus, ApiResponse) {
        let body: serde_json::Value = serde_json::from_slice(body).unwrap_or_else(|e| {
            debug!(error = %e, "request body is not JSON; treating as empty");
            serde_json::Value::Object(serde_json::Map::new())
        });

        let request = match validate_request(&body) {
            Ok(request) => request,
            Err(errors) => {
                info!(errors = ?errors.0, "rejected competitor selection request");
                return self.respond(Err(errors.into()));
            }
        };

        debug!(?request, "competitor selection POST");
        let result = self.get_execution(Some(&request)).await;
        self.respond(result)
    }

    pub fn respond(
        &self,
        result: Result<DecisionExecution, ServiceError>,
    ) -> (HttpStatus, ApiResponse) {
        let timestamp = iso_timestamp(self.clock.now());
        match result {
            Ok(execution) => (HttpStatus::Ok, ApiResponse::success(execution, timestamp)),
            Err(err) => (err.status(), err.to_response(timestamp)),
        }
    }
}
