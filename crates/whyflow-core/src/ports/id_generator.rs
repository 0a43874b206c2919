//! IdGenerator port - ID 生成の抽象化
//!
//! # フォーマット
//! `exec_<millis>_<token>`
//! - millis: Unix epoch からのミリ秒（Clock から取得）
//! - token: `Entropy` から引いた base-36（`0-9a-z`）7 文字
//!
//! 人が読める形式であり、一意性の保証ではありません。
//! ミリ秒と token の両方が一致したときだけ衝突します。

use crate::domain::ids::{EXECUTION_ID_PREFIX, ExecutionId};
use crate::ports::{Clock, Entropy};

/// 生成 ID のランダム token の長さ
pub const TOKEN_LEN: usize = 7;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// IdGenerator は新しい execution の ID を生成
///
/// # Thread Safety
/// - `Send + Sync` が必須（並行するリクエストハンドラで共有される）
pub trait IdGenerator: Send + Sync {
    fn generate_execution_id(&self) -> ExecutionId;
}

/// Clock + Entropy ベースの generator
///
/// `FixedClock` と `FixedEntropy` を使えば出力は完全に決定的。
pub struct PrefixedIdGenerator<C, E> {
    clock: C,
    entropy: E,
}

impl<C: Clock, E: Entropy> PrefixedIdGenerator<C, E> {
    pub fn new(clock: C, entropy: E) -> Self {
        Self { clock, entropy }
    }
}

impl<C: Clock, E: Entropy> IdGenerator for PrefixedIdGenerator<C, E> {
    fn generate_execution_id(&self) -> ExecutionId {
        let millis = self.clock.now().timestamp_millis();
        let token = base36_token(self.entropy.next_u64());
        ExecutionId::new(format!("{EXECUTION_ID_PREFIX}_{millis}_{token}"))
    }
}

/// `value` を `TOKEN_LEN` 桁の base-36 に縮める（ゼロ埋め）
fn base36_token(value: u64) -> String {
    let mut rest = value % 36u64.pow(TOKEN_LEN as u32);
    let mut digits = [b'0'; TOKEN_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36_DIGITS[(rest % 36) as usize];
        rest /= 36;
    }
    digits.iter().map(|&d| d as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{CountingEntropy, FixedClock, FixedEntropy, SystemClock, ThreadRngEntropy};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn noon() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[rstest]
    #[case::zero(0, "0000000")]
    #[case::last_digit(35, "000000z")]
    #[case::two_digits(36, "0000010")]
    #[case::wraps_at_36_pow_7(78_364_164_096 + 1, "0000001")]
    #[case::max(78_364_164_095, "zzzzzzz")]
    fn token_is_seven_base36_chars(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(base36_token(value), expected);
    }

    #[test]
    fn injected_ports_give_exact_id() {
        let id_gen = PrefixedIdGenerator::new(noon(), FixedEntropy(35));
        let id = id_gen.generate_execution_id();
        assert_eq!(id.as_str(), "exec_1704110400000_000000z");
    }

    #[test]
    fn same_millisecond_different_token_differs() {
        let id_gen = PrefixedIdGenerator::new(noon(), CountingEntropy::starting_at(0));
        let id1 = id_gen.generate_execution_id();
        let id2 = id_gen.generate_execution_id();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("exec_1704110400000_"));
        assert!(id2.as_str().starts_with("exec_1704110400000_"));
    }

    #[test]
    fn system_generator_ids_are_distinct() {
        let id_gen = PrefixedIdGenerator::new(SystemClock, ThreadRngEntropy);
        let id1 = id_gen.generate_execution_id();
        let id2 = id_gen.generate_execution_id();
        assert_ne!(id1, id2);

        let parts: Vec<_> = id1.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "exec");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), TOKEN_LEN);
    }
}
