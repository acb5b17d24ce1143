//! プロンプト生成モジュール
//!
//! - OUTFIT_CATEGORIES: 提案させるアイテムの区分
//! - build_recommendation_prompt: 写真解析+コーデ提案用プロンプト

/// コーデを構成するアイテム区分（この順で3点）
pub const OUTFIT_CATEGORIES: &[&str] = &["Top", "Bottom", "Shoes/Accessory"];

/// 提案させるアイテム数
pub const EXPECTED_ITEM_COUNT: usize = 3;

/// コーデ提案プロンプト生成
///
/// # Arguments
/// * `brand` - ユーザーが指定したブランド名
///
/// # Returns
/// 画像と一緒に送るプロンプト文字列
pub fn build_recommendation_prompt(brand: &str) -> String {
    let item_lines = OUTFIT_CATEGORIES
        .iter()
        .map(|category| {
            format!(
                r#"        {{"query": "{brand} [specific item name and color]", "category": "{category}"}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"You are a high-end fashion stylist.
1. Analyze the person in this selfie (gender, estimated skin tone, body build, face shape).
2. Based on this analysis, suggest a cohesive outfit consisting of {EXPECTED_ITEM_COUNT} distinct items (e.g., Top, Bottom, Accessory/Shoes) from the brand "{brand}".
3. The outfit should be stylish and flatter their specific features.

Return the response ONLY in JSON format with this structure:
{{
    "analysis": "Brief analysis of the user's features and why this style suits them.",
    "items": [
{item_lines}
    ]
}}
"#
    )
}
