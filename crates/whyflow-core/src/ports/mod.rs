//! Ports - 抽象化層
//!
//! 時刻と乱数だけがモデルの外部入力です。どちらも trait 経由で注入するので、
//! テストでは ID と timestamp を固定できます。

pub mod clock;
pub mod entropy;
pub mod id_generator;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::entropy::{CountingEntropy, Entropy, FixedEntropy, ThreadRngEntropy};
pub use self::id_generator::{IdGenerator, PrefixedIdGenerator};
