//! Aura & Threads Common Library
//!
//! CLIとエクスポートで共有される型・プロンプト・パーサー

pub mod types;
pub mod error;
pub mod prompts;
pub mod parser;
pub mod render;

pub use types::{
    ImagePayload, ItemDescriptor, Lookbook, ProductRecord, RecommendationRequest,
    RecommendationResponse, Slot, IMAGE_EXTENSIONS, is_supported_extension, mime_type_for_extension,
};
pub use error::{Error, Result};
pub use prompts::{build_recommendation_prompt, EXPECTED_ITEM_COUNT, OUTFIT_CATEGORIES};
pub use parser::{parse_recommendation_response, validate_recommendation};
pub use render::{Card, render_text, truncate_title, not_found_message, TITLE_MAX_CHARS};
