use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// オントロジー読み込み失敗（入力欠落・構文エラー・構造違反）
#[derive(Debug, Error)]
pub enum OntologyError {
    #[error("failed to read ontology source {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse ontology source: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid ontology shape: {0}")]
    Shape(String),
}

/// カテゴリ→スキルラベル一覧の語彙。ロード後は不変。
///
/// BTreeMap を使うため走査順はカテゴリ名順で決定論的になる
/// （`suggest_skills` の「オントロジー走査順」はこの順を指す）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ontology {
    categories: BTreeMap<String, Vec<String>>,
}

impl Ontology {
    /// JSON 文字列からロードして形を検証する。
    ///
    /// 受理する形: オブジェクトのトップレベル、値はすべて非空文字列の配列。
    pub fn from_json_str(raw: &str) -> Result<Self, OntologyError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let object = value.as_object().ok_or_else(|| {
            OntologyError::Shape("ontology must be a mapping of category to skill list".into())
        })?;

        let mut categories = BTreeMap::new();
        for (category, skills_value) in object {
            let entries = skills_value.as_array().ok_or_else(|| {
                OntologyError::Shape(format!(
                    "category '{category}' must contain a list of skills"
                ))
            })?;

            let mut skills = Vec::with_capacity(entries.len());
            for entry in entries {
                let skill = entry.as_str().ok_or_else(|| {
                    OntologyError::Shape(format!(
                        "skills in category '{category}' must be strings"
                    ))
                })?;
                if skill.trim().is_empty() {
                    return Err(OntologyError::Shape(format!(
                        "category '{category}' contains an empty skill label"
                    )));
                }
                skills.push(skill.to_string());
            }
            categories.insert(category.clone(), skills);
        }

        info!(categories = categories.len(), "loaded skills ontology");
        Ok(Self { categories })
    }

    /// ファイルからロード。再ロードはこの関数をもう一度呼ぶだけ。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OntologyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| OntologyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.categories.iter()
    }

    pub fn skills_in(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// カテゴリ数
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// 全カテゴリ合計のスキルラベル数（重複カウントあり）
    pub fn total_skills(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}
