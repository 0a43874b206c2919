//! Request - competitor-selection エンドポイントのパラメータと検証
//!
//! # 寛容さ
//! - オブジェクトでない body は空リクエスト扱い
//! - `null` は absent 扱い
//! - 型違いはすべて集めて報告（最初の 1 件で止めない）

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// POST body（全フィールド任意、未知フィールドは無視）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorSelectionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ExecutionOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_metadata: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u32>,
}

/// GET クエリ文字列
///
/// 受け取ってログに出すだけで、結果には影響しない。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SelectionQuery {
    pub filter: Option<String>,
    pub limit: Option<String>,
}

impl SelectionQuery {
    /// デコード済みの key/value 列から作成
    ///
    /// 同じキーが複数回あれば最初の値を採用し、未知のキーは無視する。
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "filter" => &mut query.filter,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }
}

/// フィールド単位のメッセージ（違反フィールドごとに 1 件）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid request parameters: {}", .0.join("; "))]
pub struct ValidationErrors(pub Vec<String>);

/// フィールドの型を検証し、型付きリクエストを組み立てる
pub fn validate_request(body: &Value) -> Result<CompetitorSelectionRequest, ValidationErrors> {
    let Value::Object(fields) = body else {
        return Ok(CompetitorSelectionRequest::default());
    };

    let mut errors = Vec::new();
    let product_title = string_field(fields, "productTitle", &mut errors);
    let category = string_field(fields, "category", &mut errors);
    let options = match fields.get("options") {
        None | Some(Value::Null) => None,
        Some(Value::Object(options)) => Some(options_field(options, &mut errors)),
        Some(_) => {
            errors.push("options must be an object".to_string());
            None
        }
    };

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }
    Ok(CompetitorSelectionRequest {
        product_title,
        category,
        options,
    })
}

fn string_field(fields: &Map<String, Value>, key: &str, errors: &mut Vec<String>) -> Option<String> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("{key} must be a string"));
            None
        }
    }
}

fn options_field(options: &Map<String, Value>, errors: &mut Vec<String>) -> ExecutionOptions {
    let include_metadata = match options.get("includeMetadata") {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.push("options.includeMetadata must be a boolean".to_string());
            None
        }
    };

    let max_steps = match options.get("maxSteps") {
        None | Some(Value::Null) => None,
        Some(v) => match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                errors.push("options.maxSteps must be a non-negative integer".to_string());
                None
            }
        },
    };

    ExecutionOptions {
        include_metadata,
        max_steps,
    }
}
