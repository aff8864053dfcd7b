/// 埋め込み設定
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// 埋め込み次元数
    pub dimension: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self { dimension: 384 }
    }
}
