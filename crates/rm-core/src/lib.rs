pub mod embedding;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod ontology;
pub mod pipeline;
pub mod skills;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// Commonly used data models produced by the pipeline and consumed by the matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub raw_text: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub skills_by_category: BTreeMap<String, Vec<String>>,
    pub experience_years: f64,
    pub candidate_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub raw_text: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub skills_by_category: BTreeMap<String, Vec<String>>,
    pub title: Option<String>,
    pub company: Option<String>,
}

impl JobDescription {
    /// 必須+歓迎スキルの導出ビュー。必須が先、順序保持で重複排除。
    /// 保存フィールドにはしない（required/preferred との乖離を防ぐ）。
    pub fn all_skills(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.required_skills
            .iter()
            .chain(self.preferred_skills.iter())
            .filter(|skill| seen.insert(skill.as_str()))
            .cloned()
            .collect()
    }
}

/// 1回のマッチング呼び出しの不変スナップショット。
/// スコアはすべて [0,1]、matching_skills と missing_skills は互いに素。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub similarity_score: f64,
    pub skill_coverage: f64,
    pub skill_density: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_skills_keeps_required_first_and_dedupes() {
        let jd = JobDescription {
            required_skills: vec!["python".into(), "sql".into()],
            preferred_skills: vec!["sql".into(), "docker".into()],
            ..JobDescription::default()
        };

        assert_eq!(
            jd.all_skills(),
            vec!["python".to_string(), "sql".to_string(), "docker".to_string()]
        );
    }

    #[test]
    fn all_skills_is_empty_for_default_jd() {
        assert!(JobDescription::default().all_skills().is_empty());
    }
}
