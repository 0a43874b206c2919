//! Domain model (IDs, steps, executions).
//!
//! ここにあるのはすべてシリアライズ可能なプレーンな値です。
//! I/O は行わず、失敗もしません。

pub mod execution;
pub mod ids;
pub mod step;

pub use execution::{DecisionExecution, iso_timestamp};
pub use ids::{EXECUTION_ID_PREFIX, ExecutionId};
pub use step::{DecisionStep, RESERVED_KEYS, STEP_TYPE_KEY};
