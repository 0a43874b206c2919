//! Intake - 外部から持ち込まれた execution ドキュメントの受け入れ
//!
//! 貼り付け / アップロードされたドキュメントは「execution に見える」とき
//! （JSON オブジェクトで `steps` が配列）に現在の execution を置き換えます。
//!
//! # ヘッダは寛容
//! - `{"steps": []}` も受け入れる
//! - 欠けた / 文字列でないヘッダは "" で埋め、`AcceptedExecution::defaulted_fields` で報告
//!
//! # Step の中身は検査しない
//! 型付きモデルが必要とするもの（文字列の `name` を持つオブジェクト）だけを要求します。
//! 型の合わない `rationale` / `metadata` は `DecisionStep` が生の値として保持します。

use serde_json::{Map, Value};

use crate::domain::{DecisionExecution, DecisionStep, ExecutionId};

/// 構造チェックを通過したドキュメント
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedExecution {
    pub execution: DecisionExecution,

    /// 欠けていた / 文字列でなかったため "" で埋めたヘッダ
    /// （`executionId`, `name`, `timestamp`）
    pub defaulted_fields: Vec<&'static str>,
}

impl AcceptedExecution {
    pub fn is_complete(&self) -> bool {
        self.defaulted_fields.is_empty()
    }
}

/// ドキュメントを拒否した理由
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("document has no `steps` field")]
    MissingSteps,

    #[error("`steps` must be an array, found {found}")]
    StepsNotASequence { found: &'static str },

    #[error("steps[{index}] is not a valid step: {reason}")]
    InvalidStep { index: usize, reason: String },
}

impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        IntakeError::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// テキストをパースして構造チェック
pub fn parse_execution_document(text: &str) -> Result<AcceptedExecution, IntakeError> {
    let value: Value = serde_json::from_str(text)?;
    check_execution_value(value)
}

/// パース済みの値に対する構造チェック
pub fn check_execution_value(value: Value) -> Result<AcceptedExecution, IntakeError> {
    let mut document = match value {
        Value::Object(map) => map,
        other => {
            return Err(IntakeError::NotAnObject {
                found: json_kind(&other),
            });
        }
    };

    let raw_steps = match document.remove("steps") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(IntakeError::StepsNotASequence {
                found: json_kind(&other),
            });
        }
        None => return Err(IntakeError::MissingSteps),
    };

    let mut defaulted_fields = Vec::new();
    let execution_id = header_string(&mut document, "executionId", &mut defaulted_fields);
    let name = header_string(&mut document, "name", &mut defaulted_fields);
    let timestamp = header_string(&mut document, "timestamp", &mut defaulted_fields);

    let mut execution = DecisionExecution::new(ExecutionId::from(execution_id), name, timestamp);
    for (index, raw) in raw_steps.into_iter().enumerate() {
        let step: DecisionStep = serde_json::from_value(raw).map_err(|e| IntakeError::InvalidStep {
            index,
            reason: e.to_string(),
        })?;
        execution.push_step(step);
    }

    Ok(AcceptedExecution {
        execution,
        defaulted_fields,
    })
}

fn header_string(
    document: &mut Map<String, Value>,
    key: &'static str,
    defaulted: &mut Vec<&'static str>,
) -> String {
    match document.remove(key) {
        Some(Value::String(s)) => s,
        _ => {
            defaulted.push(key);
            String::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
