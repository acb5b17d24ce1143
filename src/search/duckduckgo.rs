//! DuckDuckGo画像検索
//!
//! 1. 検索ページからvqdトークンを取得
//! 2. i.js にトークン付きで問い合わせ、results[] を ProductRecord として読む

use super::ImageSearch;
use crate::error::{AuraError, Result};
use aura_threads_common::ProductRecord;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DUCKDUCKGO_URL: &str = "https://duckduckgo.com";

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// i.js の応答。結果は1件ずつ読み、image/urlの欠けた項目は捨てる
#[derive(Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

impl ImagesResponse {
    fn into_products(self, max_results: usize) -> Vec<ProductRecord> {
        self.results
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<ProductRecord>(value) {
                Ok(record) if !record.image_url.is_empty() && !record.source_url.is_empty() => {
                    Some(record)
                }
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!("skipping image result: {}", e);
                    None
                }
            })
            .take(max_results)
            .collect()
    }
}

#[derive(Clone)]
pub struct DuckDuckGoImages {
    http: Client,
    base_url: String,
}

impl DuckDuckGoImages {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(DUCKDUCKGO_URL.to_string(), timeout)
    }

    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_http_client(http, base_url))
    }

    pub fn with_http_client(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    async fn fetch_vqd(&self, query: &str) -> Result<String> {
        let resp = self
            .http
            .get(format!("{}/", self.base()))
            .query(&[("q", query)])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AuraError::Search(format!(
                "token request failed with HTTP {}",
                resp.status().as_u16()
            )));
        }

        let html = resp.text().await?;
        extract_vqd(&html)
            .map(str::to_string)
            .ok_or_else(|| AuraError::Search(format!("vqd token not found for {:?}", query)))
    }
}

impl ImageSearch for DuckDuckGoImages {
    async fn images(&self, query: &str, max_results: usize) -> Result<Vec<ProductRecord>> {
        let vqd = self.fetch_vqd(query).await?;

        let resp = self
            .http
            .get(format!("{}/i.js", self.base()))
            .header("Referer", format!("{}/", self.base()))
            .query(&[
                ("l", "wt-wt"),
                ("o", "json"),
                ("q", query),
                ("vqd", vqd.as_str()),
                ("f", ",,,,,"),
                ("p", "1"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AuraError::Search(format!(
                "image search failed with HTTP {}",
                resp.status().as_u16()
            )));
        }

        let body: ImagesResponse = resp.json().await?;
        Ok(body.into_products(max_results))
    }
}

/// 検索ページのHTMLからvqdトークンを抜き出す
pub fn extract_vqd(html: &str) -> Option<&str> {
    lazy_static::lazy_static! {
        static ref VQD_RE: Regex = Regex::new(r#"vqd=["']?([0-9-]+)"#).unwrap();
    }

    VQD_RE
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}
