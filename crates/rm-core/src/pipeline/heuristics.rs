use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // PII: 標準的な local@domain.tld / 区切り・括弧・国番号を許容する電話番号
    static ref EMAIL_RE: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
    static ref PHONE_RE: Regex =
        Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?(?:\(?\d{3}\)?[-.\s]?){2}\d{4}").unwrap();

    // 氏名らしい行（"Capitalized Capitalized" で始まる）
    static ref NAME_RE: Regex = Regex::new(r"^[A-Z][a-z]+ [A-Z][a-z]+").unwrap();

    // 経験年数の明示パターン。順に試し、最初に1件でも拾えたパターンの
    // 最大値を採用する（在籍年数と通算年数が混在する文書では最大値を
    // 通算とみなす）。
    static ref EXPERIENCE_RES: Vec<Regex> = vec![
        Regex::new(r"(?i)(\d+)\s*\+?\s*years?[\s\w]*experience").unwrap(),
        Regex::new(r"(?i)experience.*?(\d+)\s*\+?\s*years?").unwrap(),
        Regex::new(r"(?i)(\d+)\s*\+?\s*years?.*?experience").unwrap(),
        Regex::new(r"(?i)(\d+)\s*yr").unwrap(),
        Regex::new(r"(?i)(\d+)\s*yr\.").unwrap(),
    ];

    // 在籍期間らしい日付レンジ（YYYY-YYYY / YYYY-present）
    static ref DATE_RANGE_RE: Regex =
        Regex::new(r"(?i)\d{4}[\s\-–]*\d{4}|\d{4}[\s\-–]*(?:present|current|now)").unwrap();
}

const TITLE_KEYWORDS: &[&str] = &["engineer", "developer", "analyst", "manager", "specialist"];
const COMPANY_KEYWORDS: &[&str] = &["inc", "corp", "llc", "ltd", "company"];

/// 日付レンジ数を経験年数とみなすときの上限（参考文献リスト等の誤検出対策）
const DATE_RANGE_YEARS_CAP: f64 = 15.0;

/// 最初に一致したメールアドレス
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// 最初に一致した電話番号
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// 冒頭10行から氏名らしい行を抽出（4語以下・Capitalized 2連で始まる行）
pub fn extract_name(text: &str) -> Option<String> {
    for line in text.lines().take(10) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.split_whitespace().count() <= 4 && NAME_RE.is_match(line) {
            return Some(line.to_string());
        }
    }
    None
}

/// 冒頭20行から職種キーワードを含む短い行を職名として抽出
pub fn extract_title(text: &str) -> Option<String> {
    first_line_with_keyword(text, 20, 6, TITLE_KEYWORDS)
}

/// 冒頭20行から会社接尾辞を含む短い行を社名として抽出。
/// 判定は部分文字列一致（"since" も "inc" を含む）。精度より再現率。
pub fn extract_company(text: &str) -> Option<String> {
    first_line_with_keyword(text, 20, 4, COMPANY_KEYWORDS)
}

fn first_line_with_keyword(
    text: &str,
    max_lines: usize,
    max_words: usize,
    keywords: &[&str],
) -> Option<String> {
    for line in text.lines().take(max_lines) {
        let line = line.trim();
        if line.is_empty() || line.split_whitespace().count() > max_words {
            continue;
        }
        let lowered = line.to_lowercase();
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return Some(line.to_string());
        }
    }
    None
}

/// 経験年数の推定。明示パターン→日付レンジ数の順で試し、どちらも
/// 外れたら 0.0。正確さを保証しない参考シグナルであり、説明層でも
/// その前提で扱うこと。
pub fn extract_experience_years(text: &str) -> f64 {
    for re in EXPERIENCE_RES.iter() {
        let years: Vec<f64> = re
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| m.as_str().parse::<f64>().ok())
            .collect();
        if !years.is_empty() {
            return years.into_iter().fold(0.0, f64::max);
        }
    }

    let range_count = DATE_RANGE_RE.find_iter(text).count();
    if range_count > 0 {
        return (range_count as f64).min(DATE_RANGE_YEARS_CAP);
    }

    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_email_and_phone() {
        let text = "John Doe\nEmail: john.doe@email.com\nPhone: 123-456-7890";
        assert_eq!(extract_email(text).as_deref(), Some("john.doe@email.com"));
        assert_eq!(extract_phone(text).as_deref(), Some("123-456-7890"));
    }

    #[test]
    fn pii_absence_is_none() {
        assert_eq!(extract_email("no contact details here"), None);
        assert_eq!(extract_phone("no contact details here"), None);
    }

    #[test]
    fn name_comes_from_short_capitalized_line() {
        assert_eq!(
            extract_name("John Doe\nSoftware Engineer"),
            Some("John Doe".to_string())
        );
        // 5語以上の行は候補にしない
        assert_eq!(
            extract_name("John Doe is a software engineer by trade"),
            None
        );
        assert_eq!(extract_name("RESUME\nall lowercase here"), None);
    }

    #[test]
    fn title_and_company_use_keyword_lines() {
        let text = "Senior Software Engineer\nAcme Inc\n\nWe build things.";
        assert_eq!(
            extract_title(text),
            Some("Senior Software Engineer".to_string())
        );
        assert_eq!(extract_company(text), Some("Acme Inc".to_string()));

        assert_eq!(extract_title("We build things."), None);
        assert_eq!(extract_company("We build things."), None);
    }

    #[test]
    fn experience_takes_max_of_first_matching_pattern() {
        let years =
            extract_experience_years("5 years of experience as well as 2 years as intern");
        assert_eq!(years, 5.0);
    }

    #[test]
    fn experience_matches_experience_first_phrasing() {
        assert_eq!(extract_experience_years("Experience: 3+ years in backend"), 3.0);
    }

    #[test]
    fn experience_falls_back_to_date_range_count() {
        assert_eq!(
            extract_experience_years("2016-2018 2018-2020 2020-present"),
            3.0
        );

        // 大量のレンジは上限でクリップ
        let many = (0..20)
            .map(|i| format!("{}-{}", 1990 + i, 1991 + i))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(extract_experience_years(&many), 15.0);
    }

    #[test]
    fn experience_defaults_to_zero() {
        assert_eq!(extract_experience_years("no tenure information"), 0.0);
        assert_eq!(extract_experience_years(""), 0.0);
    }
}
