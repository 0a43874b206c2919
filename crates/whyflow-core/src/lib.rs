//! whyflow-core
//!
//! 自動意思決定パイプラインをデバッグするための decision execution モデル
//!
//! # モジュール
//! - **domain**: `DecisionExecution`, `DecisionStep`, `ExecutionId`
//! - **ports**: clock / entropy / ID 生成（テストで差し替え可能）
//! - **app**: builder、デモ実行、ドキュメント取り込み、viewer session、view projection
//! - **api**: リクエスト検証、レスポンス envelope、service

pub mod api;
pub mod app;
pub mod domain;
pub mod ports;

pub use app::{ExecutionBuilder, competitor_selection_execution};
pub use domain::{DecisionExecution, DecisionStep, ExecutionId};
