//! 再試行の待機
//!
//! 待機時間は「単位」で数え、実時間への換算はDelay実装に任せる。
//! テストでは記録用の実装を差し込む。

use std::time::Duration;

/// 試行番号（0始まり）の直前に待つ単位数: 2^attempt
///
/// 初回（attempt == 0）は待たない
pub fn backoff_units(attempt: u32) -> u32 {
    if attempt == 0 {
        0
    } else {
        2u32.saturating_pow(attempt)
    }
}

#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn wait(&self, units: u32);
}

/// tokio::time::sleep による待機（呼び出し元タスクだけを止める）
#[derive(Debug, Clone, Copy)]
pub struct TokioDelay {
    pub unit: Duration,
}

impl TokioDelay {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    pub fn from_millis(unit_ms: u64) -> Self {
        Self::new(Duration::from_millis(unit_ms))
    }
}

impl Default for TokioDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Delay for TokioDelay {
    async fn wait(&self, units: u32) {
        if units == 0 {
            return;
        }
        tokio::time::sleep(self.unit.saturating_mul(units)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_units() {
        assert_eq!(backoff_units(0), 0);
        assert_eq!(backoff_units(1), 2);
        assert_eq!(backoff_units(2), 4);
        assert_eq!(backoff_units(3), 8);
    }

    #[test]
    fn test_backoff_units_saturates() {
        assert_eq!(backoff_units(40), u32::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_delay_sleeps_units() {
        let delay = TokioDelay::from_millis(100);
        let start = tokio::time::Instant::now();
        delay.wait(4).await;
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_delay_zero_units() {
        let delay = TokioDelay::default();
        let start = tokio::time::Instant::now();
        delay.wait(0).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
