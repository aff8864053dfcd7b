//! ランキング品質のオフライン評価指標。
//!
//! どの関数もランキング済みの関連性リストに対する純関数で、
//! マッチングエンジン本体には依存しない。

use serde::Serialize;

/// Precision@k。k がリスト長を超える場合はリスト長へクランプする。
/// 空リストや k=0 は 0.0。
pub fn precision_at_k(relevances: &[bool], k: usize) -> f64 {
    let k = k.min(relevances.len());
    if k == 0 {
        return 0.0;
    }

    let hits = relevances[..k].iter().filter(|&&relevant| relevant).count();
    hits as f64 / k as f64
}

/// Average Precision。関連アイテムの位置ごとの precision の平均。
/// 関連アイテムが1件もなければ 0.0。
pub fn average_precision(relevances: &[bool]) -> f64 {
    let mut relevant_count = 0usize;
    let mut precisions = Vec::new();

    for (position, &relevant) in relevances.iter().enumerate() {
        if relevant {
            relevant_count += 1;
            precisions.push(relevant_count as f64 / (position + 1) as f64);
        }
    }

    if precisions.is_empty() {
        0.0
    } else {
        precisions.iter().sum::<f64>() / precisions.len() as f64
    }
}

/// Mean Average Precision。クエリが無ければ 0.0。
pub fn mean_average_precision(queries: &[Vec<bool>]) -> f64 {
    if queries.is_empty() {
        return 0.0;
    }

    queries.iter().map(|query| average_precision(query)).sum::<f64>() / queries.len() as f64
}

fn dcg(scores: &[f64]) -> f64 {
    scores
        .iter()
        .enumerate()
        .map(|(position, score)| score / ((position + 2) as f64).log2())
        .sum()
}

/// nDCG@k。k 省略時はリスト全長。理想 DCG が 0（全スコア 0 または
/// 空リスト）のときは 0.0。
pub fn normalized_dcg(scores: &[f64], k: Option<usize>) -> f64 {
    let k = k.unwrap_or(scores.len()).min(scores.len());

    let actual = &scores[..k];

    let mut ideal: Vec<f64> = scores.to_vec();
    ideal.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    ideal.truncate(k);

    let ideal_dcg = dcg(&ideal);
    if ideal_dcg > 0.0 {
        dcg(actual) / ideal_dcg
    } else {
        0.0
    }
}

/// `compute_all` の集計結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalSummary {
    pub precision_at_k: f64,
    pub mean_average_precision: f64,
    pub ndcg_at_k: f64,
}

/// クエリ単位の評価データを追記専用で蓄積するアキュムレータ。
///
/// 1評価ランにつき1インスタンスを使うこと。並行アペンドは想定しない
/// （必要なら呼び出し側で直列化する）。集計は蓄積済み状態への純関数。
#[derive(Debug, Default)]
pub struct EvaluationMetrics {
    relevance_lists: Vec<Vec<bool>>,
    score_lists: Vec<Vec<f64>>,
}

impl EvaluationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1クエリ分の結果（ランキング順の関連性と関連度スコア）を追記する
    pub fn add_query_result(&mut self, relevances: Vec<bool>, relevance_scores: Vec<f64>) {
        self.relevance_lists.push(relevances);
        self.score_lists.push(relevance_scores);
    }

    pub fn query_count(&self) -> usize {
        self.relevance_lists.len()
    }

    /// 全クエリの P@k / MAP / nDCG@k をまとめて計算する。
    /// クエリが無ければ全指標 0.0。
    pub fn compute_all(&self, k: usize) -> EvalSummary {
        let precision = if self.relevance_lists.is_empty() {
            0.0
        } else {
            self.relevance_lists
                .iter()
                .map(|relevances| precision_at_k(relevances, k))
                .sum::<f64>()
                / self.relevance_lists.len() as f64
        };

        let ndcg = if self.score_lists.is_empty() {
            0.0
        } else {
            self.score_lists
                .iter()
                .map(|scores| normalized_dcg(scores, Some(k)))
                .sum::<f64>()
                / self.score_lists.len() as f64
        };

        EvalSummary {
            precision_at_k: precision,
            mean_average_precision: mean_average_precision(&self.relevance_lists),
            ndcg_at_k: ndcg,
        }
    }
}
