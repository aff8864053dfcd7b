pub mod explanation;
pub mod weights;

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::info;

use crate::embedding::{
    cosine_similarity, EmbedderConfig, EmbeddingError, HashEmbedder, TextEmbedder,
};
use crate::{JobDescription, MatchResult, Resume};

pub use weights::{RankingWeights, DEFAULT_RANKING_WEIGHTS};

/// JD要求スキルのうち履歴書側が満たす割合。
/// 要求が空なら 0.0（要求ゼロからカバレッジは主張できない）。
pub fn skill_coverage(resume_skills: &[String], jd_skills: &[String]) -> f64 {
    if jd_skills.is_empty() {
        return 0.0;
    }

    let resume_set: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();
    let jd_set: HashSet<&str> = jd_skills.iter().map(String::as_str).collect();

    let matched = jd_set.iter().filter(|s| resume_set.contains(*s)).count();
    matched as f64 / jd_set.len() as f64
}

/// 履歴書スキルのうちこの求人に関係する割合（スキル水増しの検出）。
/// 履歴書側が空なら 0.0。
pub fn skill_density(resume_skills: &[String], jd_skills: &[String]) -> f64 {
    if resume_skills.is_empty() {
        return 0.0;
    }

    let resume_set: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();
    let jd_set: HashSet<&str> = jd_skills.iter().map(String::as_str).collect();

    let relevant = resume_set.iter().filter(|s| jd_set.contains(*s)).count();
    relevant as f64 / resume_set.len() as f64
}

#[derive(Debug, Clone, Serialize)]
pub struct MatcherStats {
    pub embedder: &'static str,
    pub version: String,
    pub dimension: usize,
}

/// Resume と JobDescription のマッチングを行うステートレスなサービス。
///
/// 入力レコードを所有も変更もしない。埋め込みの失敗だけが失敗要因で、
/// そのまま呼び出し元へ伝播する（間違ったスコアで静かに成功しない）。
pub struct SemanticMatcher {
    embedder: Box<dyn TextEmbedder>,
}

impl SemanticMatcher {
    pub fn new(embedder: Box<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }

    /// 決定論的な組み込み埋め込みで構成するショートカット
    pub fn with_hash_embedder() -> Self {
        Self::new(Box::new(HashEmbedder::new(EmbedderConfig::default())))
    }

    /// 2テキストの意味類似度（0.0〜1.0）。
    /// どちらかが空白のみなら埋め込みを呼ばず 0.0。
    pub fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, EmbeddingError> {
        if text_a.trim().is_empty() || text_b.trim().is_empty() {
            return Ok(0.0);
        }

        let a = self.embedder.embed(text_a)?;
        let b = self.embedder.embed(text_b)?;
        Ok(f64::from(cosine_similarity(&a.vector, &b.vector)).clamp(0.0, 1.0))
    }

    /// 1件の履歴書を求人票に照合して MatchResult を組み立てる。
    ///
    /// 類似度は raw テキスト、カバレッジ/密度は resume.skills と
    /// jd.all_skills()、missing は必須スキルのみから計算する。
    pub fn match_resume(
        &self,
        resume: &Resume,
        jd: &JobDescription,
    ) -> Result<MatchResult, EmbeddingError> {
        let similarity_score = self.similarity(&resume.raw_text, &jd.raw_text)?;

        let jd_skills = jd.all_skills();
        let skill_coverage = skill_coverage(&resume.skills, &jd_skills);
        let skill_density = skill_density(&resume.skills, &jd_skills);

        let resume_set: BTreeSet<&str> = resume.skills.iter().map(String::as_str).collect();
        let jd_set: BTreeSet<&str> = jd_skills.iter().map(String::as_str).collect();

        let matching_skills: Vec<String> = jd_set
            .iter()
            .filter(|s| resume_set.contains(*s))
            .map(|s| s.to_string())
            .collect();
        let missing_skills: Vec<String> = jd
            .required_skills
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .filter(|s| !resume_set.contains(s))
            .map(str::to_string)
            .collect();

        let explanation = explanation::generate_explanation(
            similarity_score,
            skill_coverage,
            skill_density,
            &matching_skills,
            &missing_skills,
        );

        info!(
            similarity = similarity_score,
            coverage = skill_coverage,
            density = skill_density,
            "match completed"
        );

        Ok(MatchResult {
            similarity_score,
            skill_coverage,
            skill_density,
            matching_skills,
            missing_skills,
            explanation,
        })
    }

    /// 複数候補を重み付きスコア降順でランキングする。
    /// `Vec::sort_by` は安定ソートのため、同点は入力順を保持する。
    pub fn rank(
        &self,
        resumes: &[Resume],
        jd: &JobDescription,
        weights: Option<RankingWeights>,
    ) -> Result<Vec<(Resume, MatchResult)>, EmbeddingError> {
        let weights = weights.unwrap_or(DEFAULT_RANKING_WEIGHTS);

        let mut scored = Vec::with_capacity(resumes.len());
        for resume in resumes {
            let result = self.match_resume(resume, jd)?;
            let score = weights.coverage * result.skill_coverage
                + weights.similarity * result.similarity_score
                + weights.density * result.skill_density;
            scored.push((resume.clone(), result, score));
        }

        scored.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .map(|(resume, result, _)| (resume, result))
            .collect())
    }

    pub fn stats(&self) -> MatcherStats {
        MatcherStats {
            embedder: self.embedder.name(),
            version: self.embedder.version().to_string(),
            dimension: self.embedder.dimension(),
        }
    }
}
