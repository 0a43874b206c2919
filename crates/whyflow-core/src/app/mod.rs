//! App - アプリケーション層
//!
//! domain モデルから execution を組み立て、presentation が必要とするビューを導出します。
//!
//! # 構成要素
//! - **ExecutionBuilder / ExecutionFactory**: 作成・追加・export
//! - **demo**: 固定の competitor-selection 実行例
//! - **intake**: 外部ドキュメントの構造チェック
//! - **ViewerSession**: 表示中の execution + 選択中の Step
//! - **view**: サイドバー行、ノード / エッジ図、Step 詳細

pub mod builder;
pub mod demo;
pub mod intake;
pub mod session;
pub mod view;

pub use self::builder::{ExecutionBuilder, ExecutionFactory, SystemExecutionFactory};
pub use self::demo::{
    DEMO_EXECUTION_NAME, competitor_selection_execution, competitor_selection_execution_with,
};
pub use self::intake::{
    AcceptedExecution, IntakeError, check_execution_value, parse_execution_document,
};
pub use self::session::{SessionError, ViewerSession};
pub use self::view::{
    GraphEdge, GraphNode, StepDetail, StepSummary, WorkflowGraph, step_detail, step_summaries,
    workflow_graph,
};
