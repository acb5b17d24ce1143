mod duckduckgo;

pub use duckduckgo::{extract_vqd, DuckDuckGoImages, DUCKDUCKGO_URL};

use crate::error::Result;
use crate::retry::{backoff_units, Delay};
use aura_threads_common::ProductRecord;

/// 既定の最大試行回数
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// 画像検索の呼び出し口
#[allow(async_fn_in_trait)]
pub trait ImageSearch {
    async fn images(&self, query: &str, max_results: usize) -> Result<Vec<ProductRecord>>;
}

/// クエリを実商品1件に解決する
///
/// - 1件目のみ返す（関連度の検証はしない）
/// - 結果0件は正常な「見つからない」扱いで再試行しない
/// - エラー時は合計max_attempts回まで試行し、試行番号aの前に2^a単位待つ
/// - すべて失敗してもエラーにはせずNoneを返す（max_attemptsが0なら検索せずNone）
pub async fn resolve_product<S, D>(
    search: &S,
    delay: &D,
    query: &str,
    max_attempts: u32,
) -> Option<ProductRecord>
where
    S: ImageSearch,
    D: Delay,
{
    for attempt in 0..max_attempts {
        if attempt > 0 {
            delay.wait(backoff_units(attempt)).await;
        }

        match search.images(query, 1).await {
            Ok(results) => return results.into_iter().next(),
            Err(e) => {
                tracing::warn!(
                    "Search error (attempt {}/{}): {}",
                    attempt + 1,
                    max_attempts,
                    e
                );
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuraError;
    use std::cell::{Cell, RefCell};

    struct FailingSearch {
        calls: Cell<u32>,
    }

    impl ImageSearch for FailingSearch {
        async fn images(&self, _query: &str, _max_results: usize) -> Result<Vec<ProductRecord>> {
            self.calls.set(self.calls.get() + 1);
            Err(AuraError::Search("connection reset".into()))
        }
    }

    /// 指定回数だけ失敗し、その後は固定の結果を返す
    struct FlakySearch {
        failures: u32,
        results: Vec<ProductRecord>,
        calls: Cell<u32>,
        requested: RefCell<Vec<usize>>,
    }

    impl ImageSearch for FlakySearch {
        async fn images(&self, _query: &str, max_results: usize) -> Result<Vec<ProductRecord>> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            self.requested.borrow_mut().push(max_results);
            if n < self.failures {
                Err(AuraError::Search("rate limited".into()))
            } else {
                Ok(self.results.clone())
            }
        }
    }

    #[derive(Default)]
    struct RecordingDelay {
        waits: RefCell<Vec<u32>>,
    }

    impl Delay for RecordingDelay {
        async fn wait(&self, units: u32) {
            self.waits.borrow_mut().push(units);
        }
    }

    fn product(title: &str) -> ProductRecord {
        ProductRecord {
            image_url: format!("https://img.example/{}.jpg", title),
            title: title.to_string(),
            source_url: format!("https://shop.example/{}", title),
        }
    }

    fn flaky(failures: u32, results: Vec<ProductRecord>) -> FlakySearch {
        FlakySearch {
            failures,
            results,
            calls: Cell::new(0),
            requested: RefCell::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_all_attempts_fail_returns_none() {
        let search = FailingSearch { calls: Cell::new(0) };
        let delay = RecordingDelay::default();

        let result = resolve_product(&search, &delay, "Zara red blazer", 3).await;

        assert!(result.is_none());
        assert_eq!(search.calls.get(), 3);
    }

    #[tokio::test]
    async fn test_backoff_delays_when_all_fail() {
        let search = FailingSearch { calls: Cell::new(0) };
        let delay = RecordingDelay::default();

        resolve_product(&search, &delay, "Zara red blazer", 4).await;

        assert_eq!(search.calls.get(), 4);
        assert_eq!(*delay.waits.borrow(), vec![2, 4, 8]);
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let search = flaky(0, vec![product("first"), product("second")]);
        let delay = RecordingDelay::default();

        let result = resolve_product(&search, &delay, "Zara red blazer", 3).await;

        assert_eq!(result, Some(product("first")));
        assert_eq!(search.calls.get(), 1);
        assert_eq!(*search.requested.borrow(), vec![1]);
        assert!(delay.waits.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_empty_results_not_retried() {
        let search = flaky(0, vec![]);
        let delay = RecordingDelay::default();

        let result = resolve_product(&search, &delay, "Zara black jeans", 3).await;

        assert!(result.is_none());
        assert_eq!(search.calls.get(), 1);
        assert!(delay.waits.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_recovers_after_failures() {
        let search = flaky(2, vec![product("late")]);
        let delay = RecordingDelay::default();

        let result = resolve_product(&search, &delay, "Zara white sneakers", 3).await;

        assert_eq!(result, Some(product("late")));
        assert_eq!(search.calls.get(), 3);
        assert_eq!(*delay.waits.borrow(), vec![2, 4]);
    }

    #[tokio::test]
    async fn test_zero_attempts_makes_no_calls() {
        let search = flaky(0, vec![product("unused")]);
        let delay = RecordingDelay::default();

        let result = resolve_product(&search, &delay, "Zara scarf", 0).await;

        assert!(result.is_none());
        assert_eq!(search.calls.get(), 0);
        assert!(delay.waits.borrow().is_empty());
    }
}
