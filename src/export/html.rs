use aura_threads_common::{render, Card, Lookbook};
use crate::error::Result;
use std::path::Path;

const STYLE: &str = r#"
    body { background-color: #FAFAFA; font-family: 'Lato', sans-serif; margin: 0 auto; max-width: 1100px; padding: 2rem; }
    h1, h2 { font-family: 'Playfair Display', serif; color: #1A1A1A; }
    h1 { text-align: center; margin-bottom: 2rem; }
    .subtitle { text-align: center; color: #666; }
    .analysis { background: #E8F5E9; border-radius: 10px; padding: 1rem 1.25rem; }
    .grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1.5rem; }
    .product-card { background-color: white; border-radius: 15px; padding: 15px; box-shadow: 0 4px 15px rgba(0,0,0,0.05); text-align: center; }
    .product-img-wrap { height: 200px; overflow: hidden; border-radius: 10px; margin-bottom: 10px; }
    .product-img { width: 100%; height: 200px; object-fit: cover; border-radius: 10px; }
    .product-title { font-weight: 700; font-size: 1.1em; margin-bottom: 5px; color: #333; }
    .product-desc { font-size: 0.9em; color: #666; height: 40px; overflow: hidden; }
    .product-link { text-decoration: none; color: white; background-color: #000; padding: 8px 15px; border-radius: 20px; font-size: 0.9em; display: inline-block; margin-top: 10px; }
    .not-found { background: #FFF8E1; border-radius: 10px; padding: 1rem; color: #8D6E00; }
    footer { margin-top: 2rem; color: #999; font-size: 0.8em; text-align: center; }
"#;

/// HTML特殊文字のエスケープ
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_card_html(card: &Card) -> String {
    match card {
        Card::Product {
            category,
            image_url,
            title,
            source_url,
        } => format!(
            r#"<div class="product-card">
  <div class="product-img-wrap"><img src="{img}" class="product-img" alt="{title}"></div>
  <div class="product-title">{category}</div>
  <p class="product-desc">{title}</p>
  <a href="{url}" target="_blank" rel="noopener" class="product-link">Shop Now ↗</a>
</div>"#,
            img = escape_html(image_url),
            title = escape_html(title),
            category = escape_html(category),
            url = escape_html(source_url),
        ),
        Card::NotFound { message } => {
            format!(r#"<div class="not-found">⚠ {}</div>"#, escape_html(message))
        }
    }
}

/// ルックブックを単体HTMLページとして文字列化
pub fn render_html(lookbook: &Lookbook, generated_at: &str) -> String {
    let cards = render::cards(lookbook)
        .iter()
        .map(render_card_html)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Aura &amp; Threads - {brand}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>✨ Aura &amp; Threads</h1>
<p class="subtitle">AI-Powered Personal Styling</p>
<h2>🧐 The Stylist's Take</h2>
<div class="analysis">{analysis}</div>
<h2>✨ Recommended {brand} Look</h2>
<div class="grid">
{cards}
</div>
<footer>Generated {generated_at}</footer>
</body>
</html>
"#,
        brand = escape_html(&lookbook.brand),
        analysis = escape_html(&lookbook.analysis),
        generated_at = escape_html(generated_at),
    )
}

pub fn write_html(lookbook: &Lookbook, output_path: &Path) -> Result<()> {
    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    std::fs::write(output_path, render_html(lookbook, &generated_at))?;
    Ok(())
}
