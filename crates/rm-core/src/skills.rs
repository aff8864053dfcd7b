use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::normalize::normalize;
use crate::ontology::Ontology;

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// トークン境界付きの部分一致判定。
///
/// regex の `\b` は `c++` / `c#` のように記号で終わるラベルを正しく
/// 閉じられないため、前後が英数字でないことを直接確認する。
fn contains_token(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(needle) {
        let begin = search_from + offset;
        let end = begin + needle.len();

        let bounded_before = !haystack[..begin]
            .chars()
            .next_back()
            .map_or(false, is_token_char);
        let bounded_after = !haystack[end..].chars().next().map_or(false, is_token_char);
        if bounded_before && bounded_after {
            return true;
        }

        search_from = begin
            + haystack[begin..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
    }
    false
}

/// ラベル一致判定。ハイフンを含むラベルは空白区切りの表記揺れも試す
/// ("front-end" / "front end")。
fn skill_matches(norm_text: &str, skill: &str) -> bool {
    let label = skill.to_lowercase();
    if contains_token(norm_text, &label) {
        return true;
    }
    if label.contains('-') {
        let spaced = label.replace('-', " ");
        if contains_token(norm_text, &spaced) {
            return true;
        }
    }
    false
}

/// オントロジー語彙に対する全語一致スキル抽出。
/// 結果はラベル昇順・重複なし。O(|ontology| × |text|) だが語彙も文書も
/// 小さい前提（数百エントリ × 数千語）。大規模化する場合はトークン→
/// 候補スキルの転置インデックスを作ること。
pub fn extract_skills(text: &str, ontology: &Ontology) -> Vec<String> {
    if text.is_empty() || ontology.is_empty() {
        return Vec::new();
    }

    let norm_text = normalize(text);
    let mut found = BTreeSet::new();
    for (_, skills) in ontology.iter() {
        for skill in skills {
            if skill_matches(&norm_text, skill) {
                found.insert(skill.clone());
            }
        }
    }
    found.into_iter().collect()
}

/// カテゴリ別のスキル抽出。複数カテゴリに属するスキルは各カテゴリに
/// 重複して現れる。空のカテゴリは結果から省く。
pub fn extract_skills_by_category(
    text: &str,
    ontology: &Ontology,
) -> BTreeMap<String, Vec<String>> {
    if text.is_empty() || ontology.is_empty() {
        return BTreeMap::new();
    }

    let norm_text = normalize(text);
    let mut by_category = BTreeMap::new();
    for (category, skills) in ontology.iter() {
        let mut matched: BTreeSet<String> = BTreeSet::new();
        for skill in skills {
            if skill_matches(&norm_text, skill) {
                matched.insert(skill.clone());
            }
        }
        if !matched.is_empty() {
            by_category.insert(category.clone(), matched.into_iter().collect());
        }
    }
    by_category
}

/// 境界判定なしの部分文字列一致による緩い候補提示。
/// オントロジー走査順で最大 `max_suggestions` 件。スコアリングには使わない。
pub fn suggest_skills(text: &str, ontology: &Ontology, max_suggestions: usize) -> Vec<String> {
    if text.is_empty() || ontology.is_empty() || max_suggestions == 0 {
        return Vec::new();
    }

    let norm_text = normalize(text);
    let mut suggestions: Vec<String> = Vec::new();
    'categories: for (_, skills) in ontology.iter() {
        for skill in skills {
            if suggestions.len() >= max_suggestions {
                break 'categories;
            }
            if norm_text.contains(&skill.to_lowercase()) && !suggestions.contains(skill) {
                suggestions.push(skill.clone());
            }
        }
    }
    suggestions
}

/// 2つのスキル集合の Jaccard 重なり。どちらかが空なら 0.0
pub fn skill_overlap(skills_a: &[String], skills_b: &[String]) -> f64 {
    if skills_a.is_empty() || skills_b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = skills_a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = skills_b.iter().map(String::as_str).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
