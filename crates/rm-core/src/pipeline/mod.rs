pub mod extractor;
pub mod heuristics;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::ontology::Ontology;
use crate::skills::{extract_skills, extract_skills_by_category};
use crate::{JobDescription, Resume};

pub use extractor::{ExtractError, PlainTextExtractor, TextExtractor, SUPPORTED_EXTENSIONS};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("no text content found in {0}")]
    EmptyContent(String),
}

/// 一括処理の結果。個別の失敗はパス付きで持ち帰る。
#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub resumes: Vec<Resume>,
    pub failures: Vec<BatchFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    pub ontology_categories: usize,
    pub total_skills: usize,
    pub extractor: &'static str,
}

/// 文書ファイルから Resume / JobDescription を組み立てるパイプライン。
///
/// オントロジーはロード済みの不変値として保持し、テキスト抽出は
/// 注入された `TextExtractor` に委譲する。PII・氏名・職名・経験年数の
/// ヒューリスティクスは失敗せず、見つからなければ欠損のまま返す。
pub struct DocumentPipeline {
    ontology: Ontology,
    extractor: Box<dyn TextExtractor>,
}

impl DocumentPipeline {
    pub fn new(ontology: Ontology, extractor: Box<dyn TextExtractor>) -> Self {
        Self {
            ontology,
            extractor,
        }
    }

    /// 組み込みのプレーンテキスト抽出で構成するショートカット
    pub fn with_plain_text(ontology: Ontology) -> Self {
        Self::new(ontology, Box::new(PlainTextExtractor))
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// 履歴書ファイルを処理して Resume を組み立てる。
    /// 抽出テキストが空白のみなら EmptyContent。
    pub fn process_resume(&self, path: impl AsRef<Path>) -> Result<Resume, PipelineError> {
        let path = path.as_ref();
        let raw_text = self.extractor.extract(path)?;
        if raw_text.trim().is_empty() {
            return Err(PipelineError::EmptyContent(path.display().to_string()));
        }

        let email = heuristics::extract_email(&raw_text);
        let phone = heuristics::extract_phone(&raw_text);
        let candidate_name = heuristics::extract_name(&raw_text);
        let skills = extract_skills(&raw_text, &self.ontology);
        let skills_by_category = extract_skills_by_category(&raw_text, &self.ontology);
        let experience_years = heuristics::extract_experience_years(&raw_text);

        info!(
            path = %path.display(),
            skills = skills.len(),
            experience_years,
            "resume processed"
        );

        Ok(Resume {
            raw_text,
            email,
            phone,
            skills,
            skills_by_category,
            experience_years,
            candidate_name,
        })
    }

    /// 求人票ファイルを処理して JobDescription を組み立てる。
    /// `required_override` があれば抽出結果の代わりに必須スキルとして
    /// 採用し、なければ抽出スキル全件を必須・歓迎は空のままにする。
    pub fn process_job_description(
        &self,
        path: impl AsRef<Path>,
        required_override: Option<Vec<String>>,
    ) -> Result<JobDescription, PipelineError> {
        let path = path.as_ref();
        let raw_text = self.extractor.extract(path)?;
        if raw_text.trim().is_empty() {
            return Err(PipelineError::EmptyContent(path.display().to_string()));
        }

        let extracted = extract_skills(&raw_text, &self.ontology);
        let required_skills = required_override.unwrap_or(extracted);
        let skills_by_category = extract_skills_by_category(&raw_text, &self.ontology);
        let title = heuristics::extract_title(&raw_text);
        let company = heuristics::extract_company(&raw_text);

        info!(
            path = %path.display(),
            required_skills = required_skills.len(),
            "job description processed"
        );

        Ok(JobDescription {
            raw_text,
            required_skills,
            preferred_skills: Vec::new(),
            skills_by_category,
            title,
            company,
        })
    }

    /// 複数履歴書の一括処理。1件の失敗でバッチを止めず、失敗は
    /// パス付きで記録して継続する。
    pub fn process_resume_batch<P: AsRef<Path>>(&self, paths: &[P]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for path in paths {
            match self.process_resume(path) {
                Ok(resume) => outcome.resumes.push(resume),
                Err(err) => {
                    warn!(path = %path.as_ref().display(), error = %err, "failed to process resume");
                    outcome.failures.push(BatchFailure {
                        path: path.as_ref().to_path_buf(),
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            processed = outcome.resumes.len(),
            failed = outcome.failures.len(),
            "resume batch finished"
        );
        outcome
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            ontology_categories: self.ontology.len(),
            total_skills: self.ontology.total_skills(),
            extractor: self.extractor.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME_TEXT: &str = "\
John Doe
Email: john.doe@email.com
Phone: 123-456-7890

Skills: Python, Java, SQL, Machine Learning

5 years of experience as a Software Engineer at ABC Corp (2020-2023)
";

    fn test_ontology() -> Ontology {
        Ontology::from_json_str(
            r#"{
                "programming": ["python", "java", "sql"],
                "ml": ["machine learning"],
                "tools": ["docker"]
            }"#,
        )
        .unwrap()
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn processes_resume_with_pii_skills_and_experience() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "resume.txt", RESUME_TEXT);
        let pipeline = DocumentPipeline::with_plain_text(test_ontology());

        let resume = pipeline.process_resume(&path).unwrap();

        assert_eq!(resume.email.as_deref(), Some("john.doe@email.com"));
        assert_eq!(resume.phone.as_deref(), Some("123-456-7890"));
        assert_eq!(resume.candidate_name.as_deref(), Some("John Doe"));
        assert_eq!(
            resume.skills,
            vec!["java", "machine learning", "python", "sql"]
        );
        assert_eq!(resume.experience_years, 5.0);
        assert_eq!(
            resume.skills_by_category["programming"],
            vec!["java", "python", "sql"]
        );
    }

    #[test]
    fn blank_document_is_empty_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "blank.txt", "   \n\t\n");
        let pipeline = DocumentPipeline::with_plain_text(test_ontology());

        let err = pipeline.process_resume(&path).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyContent(_)));
    }

    #[test]
    fn missing_file_propagates_as_extract_error() {
        let pipeline = DocumentPipeline::with_plain_text(test_ontology());
        let err = pipeline.process_resume("/nonexistent/resume.txt").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Extract(ExtractError::NotFound(_))
        ));
    }

    #[test]
    fn jd_required_skills_default_to_extracted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "jd.txt",
            "Senior Software Engineer\nAcme Inc\n\nLooking for Python and Docker experience.",
        );
        let pipeline = DocumentPipeline::with_plain_text(test_ontology());

        let jd = pipeline.process_job_description(&path, None).unwrap();

        assert_eq!(jd.required_skills, vec!["docker", "python"]);
        assert!(jd.preferred_skills.is_empty());
        assert_eq!(jd.title.as_deref(), Some("Senior Software Engineer"));
        assert_eq!(jd.company.as_deref(), Some("Acme Inc"));
    }

    #[test]
    fn jd_required_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "jd.txt", "Looking for Python developers.");
        let pipeline = DocumentPipeline::with_plain_text(test_ontology());

        let jd = pipeline
            .process_job_description(&path, Some(vec!["docker".into()]))
            .unwrap();

        assert_eq!(jd.required_skills, vec!["docker"]);
    }

    #[test]
    fn batch_continues_past_individual_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(&dir, "good.txt", RESUME_TEXT);
        let missing = dir.path().join("missing.txt");
        let pipeline = DocumentPipeline::with_plain_text(test_ontology());

        let outcome = pipeline.process_resume_batch(&[good, missing.clone()]);

        assert_eq!(outcome.resumes.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].path, missing);
        assert!(outcome.failures[0].error.contains("not found"));
    }

    #[test]
    fn stats_reflect_ontology_and_extractor() {
        let pipeline = DocumentPipeline::with_plain_text(test_ontology());
        let stats = pipeline.stats();

        assert_eq!(stats.ontology_categories, 3);
        assert_eq!(stats.total_skills, 5);
        assert_eq!(stats.extractor, "plain_text");
    }
}
