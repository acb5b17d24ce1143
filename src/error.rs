use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuraError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Please provide an OpenAI API key (`aura-threads config --set-api-key YOUR_KEY` or OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("Please enter a brand name")]
    EmptyBrand,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported image format: {0} (use jpg, jpeg or png)")]
    UnsupportedImageFormat(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("API call error: {0}")]
    ApiCall(String),

    #[error("API returned HTTP {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Image search error: {0}")]
    Search(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] aura_threads_common::Error),
}

impl AuraError {
    /// 再試行で回復しうる失敗か（通信エラー、429、5xx）
    ///
    /// 空レスポンスやJSON不正は対象外
    pub fn is_transient(&self) -> bool {
        match self {
            AuraError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            AuraError::ApiStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuraError>;
