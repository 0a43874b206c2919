//! Domain identifiers (strongly-typed IDs).
//!
//! Execution ID は wire 上ではただの文字列（`"exec_1704110400000_k3j9x0a"`）ですが、
//! crate 内では `ExecutionId` として扱い、Step 名やラベルと混同できないようにします。
//!
//! 外部から読み込んだドキュメントは `exec_<millis>_<token>` 形式に従わない文字列も
//! 持ちうるため、newtype はフォーマットを検証しません。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 生成 ID のプレフィックス
pub const EXECUTION_ID_PREFIX: &str = "exec";

/// DecisionExecution（パイプライン 1 回分の記録）の識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionId(String);

impl ExecutionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for ExecutionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExecutionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
