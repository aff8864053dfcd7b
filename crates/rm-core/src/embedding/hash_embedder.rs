use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::{EmbedderConfig, Embedding, EmbeddingError, TextEmbedder};
use crate::normalize::normalize;

/// 固定 seed（決定論的 hash のため）
/// ⚠️ この値を変更すると全 embedding が変わる → version() を上げること
const HASH_SEED_K0: u64 = 0x9e37_79b9_7f4a_7c15;
const HASH_SEED_K1: u64 = 0x6a09_e667_f3bc_c908;

/// Feature Hashing による決定論的な文埋め込み
///
/// - 学習不要（固定ハッシュ関数）
/// - 高速（O(n) where n = token count）
/// - SipHash13 + 固定 seed で Rust バージョン間の安定性を保証
///
/// 入力は `normalize` で正規化してから空白区切りでトークン化するため、
/// 表記揺れの範囲で同じテキストは同じベクトルに写る。
pub struct HashEmbedder {
    config: EmbedderConfig,
}

impl HashEmbedder {
    pub fn new(config: EmbedderConfig) -> Self {
        let mut config = config;
        config.dimension = config.dimension.max(1);
        Self { config }
    }

    /// トークンをハッシュして次元インデックスに変換
    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.config.dimension
    }

    fn tokens_to_embedding(&self, tokens: &[&str]) -> Embedding {
        let mut vector = vec![0.0f32; self.config.dimension];

        for token in tokens {
            let idx = self.hash_token(token);
            // Sign hashing: 偶数ハッシュ → +1, 奇数ハッシュ → -1
            let sign = if self.hash_token(&format!("{token}_sign")) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign;
        }

        // L2正規化
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Embedding {
            vector,
            created_at: chrono::Utc::now(),
        }
    }
}

impl TextEmbedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        // トークン化やハッシュ関数が変わったらバージョンを上げる
        "v1"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let normalized = normalize(text);
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        Ok(self.tokens_to_embedding(&tokens))
    }
}
