pub mod config;
pub mod hash_embedder;
pub mod similarity;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use config::EmbedderConfig;
pub use hash_embedder::HashEmbedder;
pub use similarity::cosine_similarity;

/// 文埋め込みベクトル
#[derive(Debug, Clone)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

/// 埋め込み計算の失敗。モデル推論のエラーは握りつぶさず
/// そのまま呼び出し元へ伝播させる。
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding computation failed: {0}")]
    Computation(String),
}

/// 文埋め込みの抽象インターフェース
///
/// 実装例:
/// - HashEmbedder: Feature Hashing（決定論的、学習不要）
/// - 事前学習モデル（プロセス外推論）はこの trait を実装して差し込む
///
/// 返すベクトルは L2 正規化済みであること。
pub trait TextEmbedder: Send + Sync {
    /// 実装名（"hash" など）
    fn name(&self) -> &'static str;

    /// バージョン情報（モデルの世代管理用）
    fn version(&self) -> &str;

    /// 埋め込み次元数
    fn dimension(&self) -> usize;

    /// テキストを固定長ベクトルに変換
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// 複数テキストの一括埋め込み（デフォルト実装: ループ）
    /// バッチ推論できる実装はオーバーライド推奨
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

/// 埋め込み実装のファクトリ（未知の名前は hash にフォールバック）
pub fn create_embedder(name: &str, config: EmbedderConfig) -> Box<dyn TextEmbedder> {
    match name {
        "hash" => Box::new(HashEmbedder::new(config)),
        _ => Box::new(HashEmbedder::new(config)),
    }
}

/// 環境変数から埋め込み設定を読み込み
pub fn load_config_from_env() -> EmbedderConfig {
    EmbedderConfig {
        dimension: std::env::var("RM_EMBED_DIMENSION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(384),
    }
}

/// 環境変数から埋め込み実装を初期化するヘルパー
pub fn init_embedder_from_env() -> Box<dyn TextEmbedder> {
    let config = load_config_from_env();
    let name = std::env::var("RM_EMBEDDER").unwrap_or_else(|_| "hash".into());
    create_embedder(&name, config)
}
