//! DecisionExecution - 意思決定パイプラインの 1 回分の記録

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExecutionId;
use super::step::DecisionStep;

/// UTC 時刻を `Date.prototype.toISOString()` 形式に整形
/// （ミリ秒精度、`Z` 付き: `2024-01-01T12:00:00.000Z`）
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 1 回分の実行: ヘッダ（id, name, 作成時刻）+ 順序付き steps
///
/// # 設計
/// - 構築後は読み取り専用。`steps` を増やせるのは `app::ExecutionBuilder::add_step` だけ
/// - `timestamp` は生成 / 供給された文字列のまま保持（外部ドキュメントをそのまま書き戻せる）
/// - シリアライズ -> パースで等しい値に戻る
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionExecution {
    execution_id: ExecutionId,
    name: String,
    timestamp: String,
    steps: Vec<DecisionStep>,
}

impl DecisionExecution {
    pub(crate) fn new(execution_id: ExecutionId, name: String, timestamp: String) -> Self {
        Self {
            execution_id,
            name,
            timestamp,
            steps: Vec::new(),
        }
    }

    pub(crate) fn push_step(&mut self, step: DecisionStep) {
        self.steps.push(step);
    }

    pub fn execution_id(&self) -> &ExecutionId {
        &self.execution_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 記録された ISO-8601 の作成時刻
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// `timestamp` を RFC 3339 としてパース（それ以外の文字列なら `None`）
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    pub fn steps(&self) -> &[DecisionStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&DecisionStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<DecisionStep> {
        self.steps
    }
}
