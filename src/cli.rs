use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aura-threads")]
#[command(about = "AI-powered personal styling: selfie + brand -> outfit with real products", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真とブランドからコーデを提案し、実商品を検索
    Recommend {
        /// 写真ファイル (jpg/jpeg/png)
        #[arg(required = true)]
        image: PathBuf,

        /// ブランド名（省略時は対話入力）
        #[arg(short, long)]
        brand: Option<String>,

        /// HTMLルックブックの出力先
        #[arg(long)]
        html: Option<PathBuf>,

        /// JSON結果の出力先
        #[arg(long)]
        json: Option<PathBuf>,

        /// 商品検索の最大試行回数（設定値を上書き）
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_attempts: Option<u32>,

        /// 推論モデル（設定値を上書き）
        #[arg(short, long)]
        model: Option<String>,
    },

    /// 検索クエリを商品1件に解決（推論なし）
    Search {
        /// 検索クエリ（例: "Zara red blazer"）
        #[arg(required = true)]
        query: String,

        /// 最大試行回数（設定値を上書き）
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_attempts: Option<u32>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 保存済みAPIキーを削除
        #[arg(long, conflicts_with = "set_api_key")]
        clear_api_key: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
