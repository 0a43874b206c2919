//! ExecutionSource port - service が execution を取得する先

use async_trait::async_trait;

use super::request::CompetitorSelectionRequest;
use crate::app::builder::{ExecutionFactory, SystemExecutionFactory};
use crate::app::demo::competitor_selection_execution_with;
use crate::domain::DecisionExecution;
use crate::ports::{Clock, IdGenerator, PrefixedIdGenerator, SystemClock, ThreadRngEntropy};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("execution source unavailable: {0}")]
    Unavailable(String),

    #[error("source produced an invalid execution: {0}")]
    InvalidExecution(String),
}

/// ExecutionSource は API が返す execution を生成
///
/// 実パイプラインが実行内容を変えられるようリクエストを渡す。
/// demo source は無視する。
#[async_trait]
pub trait ExecutionSource: Send + Sync {
    async fn fetch(
        &self,
        request: Option<&CompetitorSelectionRequest>,
    ) -> Result<DecisionExecution, SourceError>;
}

/// 固定のデモ実行を返す（ID / timestamp は呼び出しごとに新しい）
pub struct DemoExecutionSource<C, G> {
    factory: ExecutionFactory<C, G>,
}

impl<C: Clock, G: IdGenerator> DemoExecutionSource<C, G> {
    pub fn new(factory: ExecutionFactory<C, G>) -> Self {
        Self { factory }
    }
}

impl DemoExecutionSource<SystemClock, PrefixedIdGenerator<SystemClock, ThreadRngEntropy>> {
    pub fn system() -> Self {
        Self::new(SystemExecutionFactory::system())
    }
}

#[async_trait]
impl<C: Clock, G: IdGenerator> ExecutionSource for DemoExecutionSource<C, G> {
    async fn fetch(
        &self,
        _request: Option<&CompetitorSelectionRequest>,
    ) -> Result<DecisionExecution, SourceError> {
        Ok(competitor_selection_execution_with(&self.factory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, FixedEntropy};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn demo_source_serves_demo_run() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let source = DemoExecutionSource::new(ExecutionFactory::new(
            clock,
            PrefixedIdGenerator::new(clock, FixedEntropy(0)),
        ));

        let execution = source.fetch(None).await.unwrap();
        assert_eq!(execution.len(), 6);
        assert_eq!(execution.execution_id().as_str(), "exec_1704110400000_0000000");
    }

    #[tokio::test]
    async fn demo_source_ignores_request() {
        let source = DemoExecutionSource::system();
        let request = CompetitorSelectionRequest {
            product_title: Some("something else".into()),
            ..Default::default()
        };
        let execution = source.fetch(Some(&request)).await.unwrap();
        assert_eq!(execution.steps()[0].name, "Keyword Generation");
    }
}
