//! コーデ提案の型定義
//!
//! CLIとエクスポートで共有される型:
//! - ImagePayload: 送信用の画像データ
//! - RecommendationResponse / ItemDescriptor: 推論APIの出力
//! - ProductRecord: 画像検索で見つかった実商品
//! - Slot / Lookbook: パイプラインの最終出力

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// 受け付ける画像拡張子（小文字で比較）
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// 拡張子が許可リストに含まれるか
pub fn is_supported_extension(ext: &str) -> bool {
    let lower = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&lower.as_str())
}

/// 拡張子からMIMEタイプを決める（png以外はjpeg扱い）
pub fn mime_type_for_extension(ext: &str) -> &'static str {
    if ext.eq_ignore_ascii_case("png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

/// 送信前の画像データ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// "data:image/jpeg;base64,..." 形式
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// 1回の生成操作の入力
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub image: ImagePayload,
    pub brand: String,
}

/// 提案されたアイテム1点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// ブランド名 + アイテム説明（検索クエリにそのまま使う）
    pub query: String,
    /// "Top" / "Bottom" / "Shoes/Accessory" など自由記述
    pub category: String,
}

/// 推論APIの出力
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub analysis: String,
    pub items: Vec<ItemDescriptor>,
}

/// 画像検索の1件目
///
/// 検索サービスのフィールド名（image / title / url）で読み書きする
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "url")]
    pub source_url: String,
}

/// アイテムと解決結果の組（未解決ならproductはNone）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub item: ItemDescriptor,
    pub product: Option<ProductRecord>,
}

impl Slot {
    pub fn is_resolved(&self) -> bool {
        self.product.is_some()
    }
}

/// 生成操作1回分の結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookbook {
    pub brand: String,
    pub analysis: String,
    pub slots: Vec<Slot>,
}

impl Lookbook {
    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_resolved()).count()
    }
}
