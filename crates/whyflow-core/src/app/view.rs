//! View projections - 表示用に execution から導出するプレーンなデータ
//!
//! レイアウトやスタイルは持ちません。レンダラがこれをサイドバーの一覧、
//! ノード / エッジ図、詳細パネルに変換します。
//!
//! # キー順
//! `metadata` / `extra` はドキュメント順のまま（`Object.keys` と同じ順）。

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{DecisionExecution, DecisionStep, STEP_TYPE_KEY};

/// `step_type` が無い（または空文字の）ノードのラベル
pub const DEFAULT_NODE_DESCRIPTION: &str = "Process Step";

/// サイドバー一覧の 1 行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    /// パイプライン内の位置（1 始まり）
    pub number: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub index: usize,
    pub label: String,
    pub description: String,
    /// 入力エッジがある（先頭以外）
    pub has_target: bool,
    /// 出力エッジがある（末尾以外）
    pub has_source: bool,
    pub input_summary: String,
    pub output_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Step を一直線につないだグラフ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// 詳細パネルが 1 Step について表示するもの
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepDetail {
    pub number: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    pub input_json: String,
    pub output_json: String,
    /// `step_type` を除いた metadata（ラベルとして表示済み）
    pub metadata: Map<String, Value>,
    pub extra: Map<String, Value>,
}

pub fn step_summaries(execution: &DecisionExecution) -> Vec<StepSummary> {
    execution
        .steps()
        .iter()
        .enumerate()
        .map(|(index, step)| StepSummary {
            number: index + 1,
            name: step.name.clone(),
            step_type: display_step_type(step).map(str::to_string),
        })
        .collect()
}

pub fn workflow_graph(execution: &DecisionExecution) -> WorkflowGraph {
    let len = execution.len();
    let nodes = execution
        .steps()
        .iter()
        .enumerate()
        .map(|(index, step)| GraphNode {
            id: index.to_string(),
            index,
            label: step.name.clone(),
            description: display_step_type(step)
                .unwrap_or(DEFAULT_NODE_DESCRIPTION)
                .to_string(),
            has_target: index > 0,
            has_source: index + 1 < len,
            input_summary: field_summary(step.input.as_ref(), "No input"),
            output_summary: field_summary(step.output.as_ref(), "No output"),
        })
        .collect();

    let edges = (1..len)
        .map(|target| {
            let source = target - 1;
            GraphEdge {
                id: format!("edge-{source}-{target}"),
                source: source.to_string(),
                target: target.to_string(),
            }
        })
        .collect();

    WorkflowGraph { nodes, edges }
}

pub fn step_detail(execution: &DecisionExecution, index: usize) -> Option<StepDetail> {
    execution.step(index).map(|step| detail_of(index, step))
}

fn detail_of(index: usize, step: &DecisionStep) -> StepDetail {
    let metadata = step
        .metadata
        .iter()
        .flatten()
        .filter(|(k, _)| k.as_str() != STEP_TYPE_KEY)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    StepDetail {
        number: index + 1,
        name: step.name.clone(),
        rationale: step.rationale.clone(),
        input_json: pretty_json(step.input.as_ref()),
        output_json: pretty_json(step.output.as_ref()),
        metadata,
        extra: step.extra().clone(),
    }
}

/// 空文字の `step_type` はラベルとして扱わない
fn display_step_type(step: &DecisionStep) -> Option<&str> {
    step.step_type().filter(|t| !t.is_empty())
}

/// 2 スペースインデントの JSON。absent は `undefined` と表示
pub fn pretty_json(value: Option<&Value>) -> String {
    match value {
        Some(v) => serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()),
        None => "undefined".to_string(),
    }
}

/// truthy な値は "<n> fields"、absent / falsy なら `empty`
///
/// n は `Object.keys` に従う: オブジェクトはキー数、配列は長さ、文字列は文字数、
/// その他のスカラーは 0。
fn field_summary(value: Option<&Value>, empty: &str) -> String {
    let count = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return empty.to_string(),
        Some(Value::String(s)) if s.is_empty() => return empty.to_string(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => return empty.to_string(),
        Some(Value::Object(map)) => map.len(),
        Some(Value::Array(items)) => items.len(),
        Some(Value::String(s)) => s.chars().count(),
        Some(Value::Bool(true)) | Some(Value::Number(_)) => 0,
    };
    format!("{count} fields")
}
