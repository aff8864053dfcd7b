use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// 単独トークンとして現れた場合のみ展開する略語表。
/// 略称で書かれがちなスキルの再現率を上げるためのもので、展開後の
/// 表記はオントロジー側のラベルに合わせてある。
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("ui", "user interface"),
    ("ux", "user experience"),
    ("api", "rest apis"),
];

static ABBREVIATION_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|(abbr, expanded)| {
            let pattern = format!(r"\b{abbr}\b");
            (Regex::new(&pattern).unwrap(), *expanded)
        })
        .collect()
});

// 許容文字集合: 英小文字・数字・'+'・'#'・'.'・'-'・スペース
static STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9+#.\- ]").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// マッチング用のテキスト正規化。純粋・全域・冪等（空入力は空出力）。
///
/// NFKC 正規化 → 小文字化 → 略語展開 → 許容外文字の除去 →
/// 連続空白の畳み込み → trim の順に適用する。
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut text = text.nfkc().collect::<String>().to_lowercase();

    for (re, expanded) in ABBREVIATION_RES.iter() {
        text = re.replace_all(&text, *expanded).into_owned();
    }

    let text = STRIP_RE.replace_all(&text, " ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
