//! ExecutionBuilder - DecisionExecution を 1 Step ずつ組み立てる
//!
//! # ライフサイクル
//! - create: ヘッダ（id, name, timestamp）を確定、steps は空
//! - add_step: 末尾に追加のみ（並べ替え・削除はしない）
//! - export / finish: builder とつながりの無いプレーンな値を返す

use crate::domain::{DecisionExecution, DecisionStep, ExecutionId, iso_timestamp};
use crate::ports::{Clock, IdGenerator, PrefixedIdGenerator, SystemClock, ThreadRngEntropy};

/// ExecutionFactory は注入された port から builder を作成
///
/// # 使用例
/// ```ignore
/// let factory = ExecutionFactory::new(clock, PrefixedIdGenerator::new(clock, FixedEntropy(0)));
/// let mut builder = factory.create("Competitor Product Selection", None);
/// builder.add_step(DecisionStep::new("Keyword Generation"));
/// let execution = builder.finish();
/// ```
pub struct ExecutionFactory<C, G> {
    clock: C,
    id_gen: G,
}

/// 壁時計とスレッド RNG につないだ Factory
pub type SystemExecutionFactory =
    ExecutionFactory<SystemClock, PrefixedIdGenerator<SystemClock, ThreadRngEntropy>>;

impl<C: Clock, G: IdGenerator> ExecutionFactory<C, G> {
    pub fn new(clock: C, id_gen: G) -> Self {
        Self { clock, id_gen }
    }

    /// 新しい execution を開始
    ///
    /// `execution_id` が与えられ空でなければそのまま使い、それ以外は生成する。
    /// `name` は "" を含め何でも受け付ける。
    pub fn create(
        &self,
        name: impl Into<String>,
        execution_id: Option<ExecutionId>,
    ) -> ExecutionBuilder {
        let execution_id = execution_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.id_gen.generate_execution_id());
        let timestamp = iso_timestamp(self.clock.now());
        ExecutionBuilder {
            execution: DecisionExecution::new(execution_id, name.into(), timestamp),
        }
    }
}

impl SystemExecutionFactory {
    pub fn system() -> Self {
        Self::new(
            SystemClock,
            PrefixedIdGenerator::new(SystemClock, ThreadRngEntropy),
        )
    }
}

impl Default for SystemExecutionFactory {
    fn default() -> Self {
        Self::system()
    }
}

/// ExecutionBuilder は組み立て中の execution を所有
#[derive(Debug, Clone)]
pub struct ExecutionBuilder {
    execution: DecisionExecution,
}

impl ExecutionBuilder {
    /// 壁時計とスレッド RNG で作成
    pub fn new(name: impl Into<String>, execution_id: Option<ExecutionId>) -> Self {
        SystemExecutionFactory::system().create(name, execution_id)
    }

    /// Step を追加（検証なし、Step の形は open）
    pub fn add_step(&mut self, step: DecisionStep) {
        self.execution.push_step(step);
    }

    /// `add_step` のチェーン版
    pub fn step(mut self, step: DecisionStep) -> Self {
        self.add_step(step);
        self
    }

    pub fn execution_id(&self) -> &ExecutionId {
        self.execution.execution_id()
    }

    pub fn steps(&self) -> &[DecisionStep] {
        self.execution.steps()
    }

    pub fn len(&self) -> usize {
        self.execution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.execution.is_empty()
    }

    /// 現在の状態のスナップショット（以降の `add_step` の影響を受けない）
    pub fn export(&self) -> DecisionExecution {
        self.execution.clone()
    }

    pub fn finish(self) -> DecisionExecution {
        self.execution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, FixedEntropy};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    fn fixed_factory() -> ExecutionFactory<FixedClock, PrefixedIdGenerator<FixedClock, FixedEntropy>> {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        ExecutionFactory::new(clock, PrefixedIdGenerator::new(clock, FixedEntropy(0)))
    }

    #[rstest]
    #[case::named("Competitor Product Selection", Some("exec_demo_001"))]
    #[case::empty_name("", Some("custom"))]
    #[case::generated("run", None)]
    fn create_then_export_is_empty(#[case] name: &str, #[case] id: Option<&str>) {
        let builder = fixed_factory().create(name, id.map(ExecutionId::from));
        let execution = builder.export();

        assert!(execution.steps().is_empty());
        assert_eq!(execution.name(), name);
        assert_eq!(execution.timestamp(), "2024-01-01T12:00:00.000Z");
        match id {
            Some(id) => assert_eq!(execution.execution_id().as_str(), id),
            None => assert_eq!(execution.execution_id().as_str(), "exec_1704110400000_0000000"),
        }
    }

    #[test]
    fn empty_supplied_id_is_replaced() {
        let execution = fixed_factory().create("x", Some(ExecutionId::new(""))).finish();
        assert_eq!(execution.execution_id().as_str(), "exec_1704110400000_0000000");
    }

    #[test]
    fn steps_are_exported_in_call_order() {
        let mut builder = fixed_factory().create("x", None);
        let steps = vec![
            DecisionStep::new("a").with_input(json!({ "k": 1 })),
            DecisionStep::new("b").with_rationale("why"),
            DecisionStep::new("c").with_step_type("ranking"),
        ];
        for step in steps.clone() {
            builder.add_step(step);
        }
        assert_eq!(builder.len(), 3);
        assert_eq!(builder.export().steps(), steps.as_slice());
    }

    #[test]
    fn name_only_step_is_exported_unchanged() {
        let step = DecisionStep::new("Keyword Generation");
        let execution = fixed_factory().create("x", None).step(step.clone()).finish();
        assert_eq!(execution.steps(), &[step]);
    }

    #[test]
    fn export_is_a_snapshot() {
        let mut builder = fixed_factory().create("x", None);
        builder.add_step(DecisionStep::new("first"));
        let snapshot = builder.export();

        builder.add_step(DecisionStep::new("second"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn exported_execution_roundtrips() {
        let execution = fixed_factory()
            .create("x", None)
            .step(DecisionStep::new("a").with_output(json!(null)))
            .step(DecisionStep::new("b").with_field("evaluations", json!([{ "asin": "B0COMP01" }])))
            .finish();

        let s = serde_json::to_string(&execution).unwrap();
        let back: DecisionExecution = serde_json::from_str(&s).unwrap();
        assert_eq!(back, execution);
    }

    #[test]
    fn system_builder_generates_distinct_ids() {
        let a = ExecutionBuilder::new("a", None);
        let b = ExecutionBuilder::new("b", None);
        assert_ne!(a.execution_id(), b.execution_id());
        assert!(a.execution_id().as_str().starts_with("exec_"));
    }
}
