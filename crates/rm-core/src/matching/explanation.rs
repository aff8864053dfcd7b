/// 総合スコアの重み（固定設計定数）
pub const SIMILARITY_WEIGHT: f64 = 0.4;
pub const COVERAGE_WEIGHT: f64 = 0.4;
pub const DENSITY_WEIGHT: f64 = 0.2;

/// 説明文に列挙するスキル数の上限
const MAX_MATCHING_LISTED: usize = 5;
const MAX_MISSING_LISTED: usize = 3;

/// 0.4·similarity + 0.4·coverage + 0.2·density
pub fn overall_score(similarity: f64, coverage: f64, density: f64) -> f64 {
    SIMILARITY_WEIGHT * similarity + COVERAGE_WEIGHT * coverage + DENSITY_WEIGHT * density
}

/// ルールベースの説明文生成。閾値・文面は固定の設計定数で、
/// 同じ入力からは常に同じ文章が出る。
pub fn generate_explanation(
    similarity: f64,
    coverage: f64,
    density: f64,
    matching_skills: &[String],
    missing_skills: &[String],
) -> String {
    let mut parts: Vec<String> = Vec::new();

    let overall = overall_score(similarity, coverage, density);
    parts.push(
        if overall >= 0.8 {
            "Excellent overall match for this position."
        } else if overall >= 0.6 {
            "Good match with some areas for improvement."
        } else if overall >= 0.4 {
            "Moderate match - consider additional preparation."
        } else {
            "Limited match - significant gaps identified."
        }
        .to_string(),
    );

    parts.push(
        if similarity >= 0.7 {
            "Excellent semantic alignment with the job description."
        } else if similarity >= 0.5 {
            "Good semantic similarity with the role requirements."
        } else {
            "Limited semantic similarity with the job description."
        }
        .to_string(),
    );

    parts.push(
        if coverage >= 0.8 {
            "Excellent skill coverage for this role."
        } else if coverage >= 0.6 {
            "Good skill match for most requirements."
        } else if coverage >= 0.4 {
            "Moderate skill coverage - some gaps exist."
        } else {
            "Significant skill gaps for this position."
        }
        .to_string(),
    );

    if !matching_skills.is_empty() {
        let listed: Vec<&str> = matching_skills
            .iter()
            .take(MAX_MATCHING_LISTED)
            .map(String::as_str)
            .collect();
        parts.push(format!("Strong skills in: {}.", listed.join(", ")));
    }

    if !missing_skills.is_empty() {
        let listed: Vec<&str> = missing_skills
            .iter()
            .take(MAX_MISSING_LISTED)
            .map(String::as_str)
            .collect();
        parts.push(format!("Consider developing skills in: {}.", listed.join(", ")));
    }

    parts.join(" ")
}
