//! 生成パイプライン
//!
//! コーデ提案 → アイテムごとに商品検索（順番に1件ずつ）→ Lookbook

use crate::error::Result;
use crate::recommender::{request_recommendation, InferenceBackend};
use crate::retry::Delay;
use crate::search::{resolve_product, ImageSearch, DEFAULT_MAX_ATTEMPTS};
use aura_threads_common::{Lookbook, RecommendationRequest, RecommendationResponse, Slot};

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub search_max_attempts: u32,
    pub inference_retries: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            search_max_attempts: DEFAULT_MAX_ATTEMPTS,
            inference_retries: 0,
        }
    }
}

/// 1回の生成操作を実行する
///
/// 推論側の失敗は全体を失敗させる。商品検索の失敗はそのスロットが未解決になるだけ。
/// `on_analysis` は提案取得直後、`on_slot` はスロット確定ごとに呼ばれる（index, total, slot）。
pub async fn generate_lookbook<B, S, D>(
    backend: &B,
    search: &S,
    delay: &D,
    request: &RecommendationRequest,
    options: PipelineOptions,
    mut on_analysis: impl FnMut(&RecommendationResponse),
    mut on_slot: impl FnMut(usize, usize, &Slot),
) -> Result<Lookbook>
where
    B: InferenceBackend,
    S: ImageSearch,
    D: Delay,
{
    let recommendation =
        request_recommendation(backend, delay, request, options.inference_retries).await?;
    on_analysis(&recommendation);

    let RecommendationResponse { analysis, items } = recommendation;
    let total = items.len();
    let mut slots = Vec::with_capacity(total);

    for (idx, item) in items.into_iter().enumerate() {
        let product = resolve_product(search, delay, &item.query, options.search_max_attempts).await;
        if product.is_none() {
            tracing::info!(query = %item.query, "no product found");
        }

        let slot = Slot { item, product };
        on_slot(idx, total, &slot);
        slots.push(slot);
    }

    Ok(Lookbook {
        brand: request.brand.trim().to_string(),
        analysis,
        slots,
    })
}
