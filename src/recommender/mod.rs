mod openai;

pub use openai::OpenAiClient;

use crate::error::{AuraError, Result};
use crate::retry::{backoff_units, Delay};
use aura_threads_common::{
    build_recommendation_prompt, parse_recommendation_response, ImagePayload,
    RecommendationRequest, RecommendationResponse, EXPECTED_ITEM_COUNT,
};

/// マルチモーダル推論の呼び出し口
///
/// 戻り値のNoneは「応答本文が空（null）」を表す
#[allow(async_fn_in_trait)]
pub trait InferenceBackend {
    async fn complete(&self, prompt: &str, image: &ImagePayload) -> Result<Option<String>>;
}

/// 写真+ブランドからコーデ提案を得る
///
/// 通信エラー・429・5xxのみ `retries` 回まで再試行する。
/// 空応答とJSON不正は即座に呼び出し元へ返す。
pub async fn request_recommendation<B, D>(
    backend: &B,
    delay: &D,
    request: &RecommendationRequest,
    retries: u32,
) -> Result<RecommendationResponse>
where
    B: InferenceBackend,
    D: Delay,
{
    let brand = request.brand.trim();
    if brand.is_empty() {
        return Err(AuraError::EmptyBrand);
    }

    let prompt = build_recommendation_prompt(brand);

    let mut attempt: u32 = 0;
    let content = loop {
        if attempt > 0 {
            delay.wait(backoff_units(attempt)).await;
        }

        match backend.complete(&prompt, &request.image).await {
            Ok(content) => break content,
            Err(err) if err.is_transient() && attempt < retries => {
                tracing::warn!(
                    "Inference error (attempt {}/{}): {}",
                    attempt + 1,
                    retries + 1,
                    err
                );
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    };

    if let Some(ref text) = content {
        tracing::debug!(content = %text, "raw recommendation content");
    }

    let response = parse_recommendation_response(content.as_deref())?;

    if response.items.len() != EXPECTED_ITEM_COUNT {
        tracing::warn!(
            "expected {} items, model returned {}",
            EXPECTED_ITEM_COUNT,
            response.items.len()
        );
    }

    Ok(response)
}
