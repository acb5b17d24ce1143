pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod photo;
pub mod pipeline;
pub mod recommender;
pub mod retry;
pub mod search;
