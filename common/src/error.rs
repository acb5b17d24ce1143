//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 推論APIが空のcontentを返した（APIキー・クォータ起因が多い）
    #[error("Received empty response from API. Please check your API key and quota.")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    Parse(String),

    /// JSONとしては正しいが、コーデ提案として使えない形
    #[error("Invalid recommendation shape: {0}")]
    InvalidShape(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
