//! Entropy port - 乱数源の抽象化
//!
//! 生成 ID の短い token にだけ使います。暗号学的な強度は求めません。

use std::sync::atomic::{AtomicU64, Ordering};

/// Entropy はランダムに見える 64-bit 値を返す
pub trait Entropy: Send + Sync {
    fn next_u64(&self) -> u64;
}

/// `rand` のスレッドローカル RNG（本番用）
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngEntropy;

impl Entropy for ThreadRngEntropy {
    fn next_u64(&self) -> u64 {
        rand::random()
    }
}

/// 毎回同じ値を返す（テスト用）
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy(pub u64);

impl Entropy for FixedEntropy {
    fn next_u64(&self) -> u64 {
        self.0
    }
}

/// seed から 1 ずつ増える（異なる値が必要なテスト用）
#[derive(Debug, Default)]
pub struct CountingEntropy {
    next: AtomicU64,
}

impl CountingEntropy {
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }
}

impl Entropy for CountingEntropy {
    fn next_u64(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
