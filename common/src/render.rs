//! 表示用モデル
//!
//! Slotを商品カード / 未検出メッセージに変換する。
//! ターミナル出力とHTMLエクスポートの両方がこれを使う。

use crate::types::{Lookbook, Slot};

/// カードに表示するタイトルの最大文字数
pub const TITLE_MAX_CHARS: usize = 50;

/// タイトルを先頭max_chars文字に切り詰め、常に "..." を付ける
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    let head: String = title.chars().take(max_chars).collect();
    format!("{}...", head)
}

/// 未検出時のメッセージ
pub fn not_found_message(query: &str) -> String {
    format!("Could not find exact match for {}", query)
}

/// 1スロット分の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    Product {
        category: String,
        image_url: String,
        title: String,
        source_url: String,
    },
    NotFound {
        message: String,
    },
}

impl Card {
    pub fn from_slot(slot: &Slot) -> Self {
        match &slot.product {
            Some(product) => Card::Product {
                category: slot.item.category.clone(),
                image_url: product.image_url.clone(),
                title: truncate_title(&product.title, TITLE_MAX_CHARS),
                source_url: product.source_url.clone(),
            },
            None => Card::NotFound {
                message: not_found_message(&slot.item.query),
            },
        }
    }
}

/// ルックブック全体のカード列（順序はスロット順）
pub fn cards(lookbook: &Lookbook) -> Vec<Card> {
    lookbook.slots.iter().map(Card::from_slot).collect()
}

/// 1枚のカードをテキスト表示
pub fn render_card_text(index: usize, card: &Card) -> String {
    match card {
        Card::Product {
            category,
            image_url,
            title,
            source_url,
        } => format!(
            "[{}] {}\n    {}\n    image: {}\n    Shop Now ↗ {}\n",
            index + 1,
            category,
            title,
            image_url,
            source_url
        ),
        Card::NotFound { message } => format!("[{}] ⚠ {}\n", index + 1, message),
    }
}

/// ルックブック全体をテキスト表示
pub fn render_text(lookbook: &Lookbook) -> String {
    let mut out = String::new();
    out.push_str("🧐 The Stylist's Take\n");
    out.push_str(&lookbook.analysis);
    out.push_str("\n\n");
    out.push_str(&format!("✨ Recommended {} Look\n", lookbook.brand));
    for (idx, card) in cards(lookbook).iter().enumerate() {
        out.push_str(&render_card_text(idx, card));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemDescriptor, ProductRecord};

    fn slot(query: &str, category: &str, product: Option<ProductRecord>) -> Slot {
        Slot {
            item: ItemDescriptor {
                query: query.to_string(),
                category: category.to_string(),
            },
            product,
        }
    }

    fn product(title: &str) -> ProductRecord {
        ProductRecord {
            image_url: "https://img.example/p.jpg".to_string(),
            title: title.to_string(),
            source_url: "https://shop.example/p".to_string(),
        }
    }

    #[test]
    fn test_truncate_title_long() {
        let title = "a".repeat(80);
        let truncated = truncate_title(&title, TITLE_MAX_CHARS);
        assert_eq!(truncated, format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_truncate_title_short_still_has_ellipsis() {
        assert_eq!(truncate_title("Blazer", TITLE_MAX_CHARS), "Blazer...");
    }

    #[test]
    fn test_truncate_title_multibyte() {
        let title = "赤".repeat(60);
        let truncated = truncate_title(&title, TITLE_MAX_CHARS);
        assert_eq!(truncated.chars().count(), 53);
    }

    #[test]
    fn test_card_from_resolved_slot() {
        let card = Card::from_slot(&slot("Zara red blazer", "Top", Some(product("Red Blazer"))));
        assert_eq!(
            card,
            Card::Product {
                category: "Top".to_string(),
                image_url: "https://img.example/p.jpg".to_string(),
                title: "Red Blazer...".to_string(),
                source_url: "https://shop.example/p".to_string(),
            }
        );
    }

    #[test]
    fn test_card_from_unresolved_slot() {
        let card = Card::from_slot(&slot("Zara black jeans", "Bottom", None));
        assert_eq!(
            card,
            Card::NotFound {
                message: "Could not find exact match for Zara black jeans".to_string()
            }
        );
    }

    #[test]
    fn test_render_text_keeps_order() {
        let lookbook = Lookbook {
            brand: "Zara".to_string(),
            analysis: "Looks sharp.".to_string(),
            slots: vec![
                slot("Zara red blazer", "Top", Some(product("Blazer"))),
                slot("Zara black jeans", "Bottom", None),
            ],
        };
        let text = render_text(&lookbook);
        assert!(text.contains("Recommended Zara Look"));
        let top = text.find("[1] Top").unwrap();
        let missing = text.find("[2] ⚠ Could not find exact match for Zara black jeans").unwrap();
        assert!(top < missing);
    }
}
