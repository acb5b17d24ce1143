//! APIレスポンスパーサー
//!
//! 推論APIのcontentをコーデ提案としてパース・検証する
//!
//! content全体が1つのJSONであることを要求する（前後の文章やコードブロックは受け付けない）

use crate::error::{Error, Result};
use crate::types::RecommendationResponse;

/// コーデ提案レスポンスをパース
///
/// # Arguments
/// * `content` - 推論APIの `choices[0].message.content`（nullならNone）
///
/// # Returns
/// * `Ok(RecommendationResponse)` - パース・検証成功
/// * `Err(Error::EmptyResponse)` - contentが空（パースは試みない）
/// * `Err(Error::Parse)` - JSONでない、または必須キーが無い
/// * `Err(Error::InvalidShape)` - itemsが空、またはqueryが空
pub fn parse_recommendation_response(content: Option<&str>) -> Result<RecommendationResponse> {
    let content = match content {
        Some(c) if !c.trim().is_empty() => c,
        _ => return Err(Error::EmptyResponse),
    };

    let response: RecommendationResponse = serde_json::from_str(content)
        .map_err(|e| Error::Parse(format!("recommendation JSON: {}", e)))?;

    validate_recommendation(&response)?;
    Ok(response)
}

/// 形の検証
///
/// アイテム数は1件以上なら許容する（3件でなくても呼び出し側で警告のみ）
pub fn validate_recommendation(response: &RecommendationResponse) -> Result<()> {
    if response.items.is_empty() {
        return Err(Error::InvalidShape("items is empty".into()));
    }

    for (idx, item) in response.items.iter().enumerate() {
        if item.query.trim().is_empty() {
            return Err(Error::InvalidShape(format!("items[{}].query is empty", idx)));
        }
    }

    Ok(())
}
