/// ランキング重み（デフォルト）
/// カバレッジと意味類似度を同等に重視し、密度は補助シグナルとして扱う
pub const DEFAULT_RANKING_WEIGHTS: RankingWeights = RankingWeights {
    coverage: 0.4,
    similarity: 0.4,
    density: 0.2,
};

#[derive(Debug, Clone, Copy)]
pub struct RankingWeights {
    pub coverage: f64,
    pub similarity: f64,
    pub density: f64,
}

impl RankingWeights {
    pub fn sum(&self) -> f64 {
        self.coverage + self.similarity + self.density
    }
}
