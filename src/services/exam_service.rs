//! 考试服务
//!
//! 串联段落来源、题目解析与计分，每个请求独立调用，不保存任何状态。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::question::Question;
use crate::models::submission::SubmissionSummary;
use crate::services::paragraph_source::{
    extract_paragraphs, is_word_file_name, DocumentFormat, ParagraphSource, PlainTextSource,
    WordPackageSource,
};
use crate::services::question_parser::QuestionParser;
use crate::services::scoring_service::score_submission;
use crate::utils::logging::{log_parse_complete, log_question_preview, log_submit_complete};
use std::io::Write;
use tracing::{debug, info};

/// 上传的文件
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 上传接口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRoute {
    /// 根据扩展名自动识别格式
    Auto,
    /// 只接受 Word 文档
    WordOnly,
}

/// 考试服务
#[derive(Debug, Clone)]
pub struct ExamService {
    strict_decode: bool,
    verbose_logging: bool,
}

impl ExamService {
    /// 创建新的考试服务
    pub fn new(config: &Config) -> Self {
        Self {
            strict_decode: config.strict_decode,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 从段落来源解析题目
    ///
    /// 非严格模式下解码失败按空文档处理。
    pub fn parse_source(&self, source: &dyn ParagraphSource) -> AppResult<Vec<Question>> {
        let paragraphs = if self.strict_decode {
            source.extract()?
        } else {
            extract_paragraphs(source)
        };
        debug!("{} 共 {} 个段落", source.format(), paragraphs.len());

        let questions = QuestionParser::new(source.fallback_policy()).parse(&paragraphs);

        if self.verbose_logging {
            for question in &questions {
                log_question_preview(question);
            }
        }
        log_parse_complete(&questions);

        Ok(questions)
    }

    /// 解析上传的文件
    ///
    /// Word 文档先写入临时文件再解析，临时文件在任何情况下都会被删除。
    pub async fn parse_upload(
        &self,
        upload: UploadedFile,
        route: UploadRoute,
    ) -> AppResult<Vec<Question>> {
        if upload.file_name.is_empty() {
            return Err(AppError::InputMissing("没有选择文件".to_string()));
        }

        if route == UploadRoute::WordOnly && !is_word_file_name(&upload.file_name) {
            return Err(AppError::UnsupportedFormat(
                "只支持 Word 文档文件 (.docx 或 .doc)".to_string(),
            ));
        }

        let format = DocumentFormat::from_file_name(&upload.file_name);
        info!(
            "📄 收到上传: {} ({}, {} 字节)",
            upload.file_name,
            format,
            upload.bytes.len()
        );

        let service = self.clone();
        tokio::task::spawn_blocking(move || match format {
            DocumentFormat::PlainText => {
                service.parse_source(&PlainTextSource::from_bytes(&upload.bytes))
            }
            DocumentFormat::WordPackage => service.parse_word_bytes(&upload.bytes),
        })
        .await
        .map_err(AppError::upload_failed)?
    }

    fn parse_word_bytes(&self, bytes: &[u8]) -> AppResult<Vec<Question>> {
        let mut temp_file = tempfile::Builder::new()
            .prefix("exam_upload_")
            .suffix(".docx")
            .tempfile()?;
        temp_file.write_all(bytes)?;
        temp_file.flush()?;

        let source = WordPackageSource::new(temp_file.path());
        self.parse_source(&source)
    }

    /// 对答卷评分
    pub fn score(&self, questions: &[Question], user_answers: &[String]) -> SubmissionSummary {
        let summary = score_submission(questions, user_answers);
        log_submit_complete(&summary);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;
    use std::io::Cursor;

    fn service(strict_decode: bool) -> ExamService {
        let config = Config {
            strict_decode,
            ..Config::default()
        };
        ExamService::new(&config)
    }

    fn text_upload(file_name: &str, content: &str) -> UploadedFile {
        UploadedFile {
            file_name: file_name.to_string(),
            bytes: content.as_bytes().to_vec(),
        }
    }

    fn word_upload(paragraphs: &[&str]) -> UploadedFile {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
            .collect();
        let xml = format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();

        UploadedFile {
            file_name: "exam.docx".to_string(),
            bytes: zip.finish().unwrap().into_inner(),
        }
    }

    #[tokio::test]
    async fn test_text_upload_defaults_to_single() {
        let upload = text_upload("exam.txt", "1.What is 2+2?\nA.3\nB.4\n答案:B");
        let questions = service(false)
            .parse_upload(upload, UploadRoute::Auto)
            .await
            .unwrap();

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_type, QuestionType::Single);
    }

    #[tokio::test]
    async fn test_word_upload_uses_content_heuristic() {
        let upload = word_upload(&["1.北京是中国首都", "答案:对"]);
        let questions = service(false)
            .parse_upload(upload, UploadRoute::WordOnly)
            .await
            .unwrap();

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_type, QuestionType::Judge);
        assert_eq!(questions[0].answer, "正确");
    }

    #[tokio::test]
    async fn test_empty_file_name_is_input_missing() {
        let result = service(false)
            .parse_upload(text_upload("", "1.a"), UploadRoute::Auto)
            .await;
        assert!(matches!(result, Err(AppError::InputMissing(_))));
    }

    #[tokio::test]
    async fn test_word_route_rejects_other_formats() {
        let result = service(false)
            .parse_upload(text_upload("exam.txt", "1.a"), UploadRoute::WordOnly)
            .await;
        assert!(matches!(result, Err(AppError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_broken_package_lenient_and_strict() {
        let broken = text_upload("exam.docx", "not a zip");

        let lenient = service(false)
            .parse_upload(broken.clone(), UploadRoute::Auto)
            .await
            .unwrap();
        assert!(lenient.is_empty());

        let strict = service(true).parse_upload(broken, UploadRoute::Auto).await;
        assert!(matches!(strict, Err(AppError::DecodeFailure(_))));
    }

    #[tokio::test]
    async fn test_word_without_text_nodes_yields_nothing() {
        let questions = service(false)
            .parse_upload(word_upload(&[]), UploadRoute::Auto)
            .await
            .unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn test_score_delegates() {
        let mut q = Question::new(1, QuestionType::Multiple, "1.题目");
        q.answer = "AC".to_string();
        q.score = 20;

        let summary = service(false).score(&[q], &["CA".to_string()]);
        assert!(summary.results[0].is_correct);
        assert_eq!(summary.total_score, 20);
    }
}
