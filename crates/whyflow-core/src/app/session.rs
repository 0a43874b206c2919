//! ViewerSession - 表示中の execution と選択中の Step

use super::intake::{AcceptedExecution, IntakeError, parse_execution_document};
use crate::domain::{DecisionExecution, DecisionStep};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("step {index} is out of range (execution has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone)]
pub struct ViewerSession {
    execution: DecisionExecution,
    selected: usize,
}

impl ViewerSession {
    pub fn new(execution: DecisionExecution) -> Self {
        Self {
            execution,
            selected: 0,
        }
    }

    pub fn execution(&self) -> &DecisionExecution {
        &self.execution
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// execution に Step が無いときだけ `None`
    pub fn current_step(&self) -> Option<&DecisionStep> {
        self.execution.step(self.selected)
    }

    pub fn select(&mut self, index: usize) -> Result<&DecisionStep, SessionError> {
        let len = self.execution.len();
        let step = self
            .execution
            .step(index)
            .ok_or(SessionError::StepOutOfRange { index, len })?;
        self.selected = index;
        Ok(step)
    }

    /// 貼り付け / アップロードされたドキュメントで execution を置き換える
    ///
    /// エラー時はセッションを一切変更しない。
    pub fn load_text(&mut self, text: &str) -> Result<Vec<&'static str>, IntakeError> {
        let AcceptedExecution {
            execution,
            defaulted_fields,
        } = parse_execution_document(text)?;
        self.replace(execution);
        Ok(defaulted_fields)
    }

    pub fn replace(&mut self, execution: DecisionExecution) {
        self.execution = execution;
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::demo::competitor_selection_execution;

    #[test]
    fn starts_on_first_step() {
        let session = ViewerSession::new(competitor_selection_execution());
        assert_eq!(session.selected(), 0);
        assert_eq!(session.current_step().unwrap().name, "Keyword Generation");
    }

    #[test]
    fn select_out_of_range_keeps_selection() {
        let mut session = ViewerSession::new(competitor_selection_execution());
        session.select(5).unwrap();

        let err = session.select(6).unwrap_err();
        assert_eq!(err, SessionError::StepOutOfRange { index: 6, len: 6 });
        assert_eq!(session.selected(), 5);
    }

    #[test]
    fn bad_document_retains_prior_state() {
        let mut session = ViewerSession::new(competitor_selection_execution());
        session.select(2).unwrap();
        let before = session.execution().clone();

        assert!(session.load_text("not json").is_err());
        assert!(session.load_text(r#"{ "steps": "nope" }"#).is_err());

        assert_eq!(session.execution(), &before);
        assert_eq!(session.selected(), 2);
    }

    #[test]
    fn good_document_replaces_and_resets_selection() {
        let mut session = ViewerSession::new(competitor_selection_execution());
        session.select(3).unwrap();

        let defaulted = session
            .load_text(r#"{ "name": "pasted", "steps": [ { "name": "only" } ] }"#)
            .unwrap();
        assert_eq!(defaulted, vec!["executionId", "timestamp"]);
        assert_eq!(session.selected(), 0);
        assert_eq!(session.execution().name(), "pasted");
        assert_eq!(session.current_step().unwrap().name, "only");
    }

    #[test]
    fn empty_execution_has_no_current_step() {
        let mut session = ViewerSession::new(competitor_selection_execution());
        session.load_text(r#"{ "steps": [] }"#).unwrap();
        assert!(session.current_step().is_none());
        assert!(session.select(0).is_err());
    }
}
