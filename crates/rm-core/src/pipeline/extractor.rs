use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// 受理する拡張子。`.doc` は DOCX/PDF へ変換されるまで常に拒否。
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt", "rtf"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("unsupported file type .{extension}: {path}")]
    UnsupportedFormat { path: String, extension: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 文書→テキスト抽出の差し替え口。
///
/// PDF/DOCX の実パースは外部コラボレータ実装が担い、この trait を
/// 実装してパイプラインへ注入する。
pub trait TextExtractor: Send + Sync {
    /// 実装名（ログ・統計用）
    fn name(&self) -> &'static str;

    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// パスの存在と拡張子を検証し、小文字化した拡張子を返す
pub fn validate_file(path: &Path) -> Result<String, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ExtractError::UnsupportedFormat {
            path: path.display().to_string(),
            extension,
        });
    }

    Ok(extension)
}

// RTF 制御ワードと波括弧の除去用
static RTF_CONTROL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[a-z0-9-]+\d?").unwrap());
static RTF_BRACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}]").unwrap());

/// プレーンテキスト系（.txt / .rtf）のみ扱う組み込み実装。
/// `.pdf` / `.docx` は外部抽出実装の担当としてここでは未対応扱い。
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    fn read(path: &Path) -> Result<String, ExtractError> {
        fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain_text"
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let extension = validate_file(path)?;
        match extension.as_str() {
            "txt" => Self::read(path),
            "rtf" => {
                let content = Self::read(path)?;
                let stripped = RTF_CONTROL_RE.replace_all(&content, "");
                Ok(RTF_BRACE_RE.replace_all(&stripped, "").into_owned())
            }
            _ => Err(ExtractError::UnsupportedFormat {
                path: path.display().to_string(),
                extension,
            }),
        }
    }
}
