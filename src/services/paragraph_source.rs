/// 段落来源
///
/// 把上传的原始内容拆成有序的段落文本，供题目解析器逐行扫描。
/// 纯文本按换行拆分；Word 文档（.docx）解压后读取 `word/document.xml`，
/// 每个 `w:p` 段落拼接其下所有 `w:t` 文本节点。
use crate::error::{AppError, AppResult};
use crate::models::question::QuestionType;
use crate::services::question_parser::FallbackPolicy;
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

const DOCUMENT_XML: &str = "word/document.xml";
const PARAGRAPH_TAG: &[u8] = b"w:p";
const TEXT_TAG: &[u8] = b"w:t";

/// 文档格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// 纯文本
    PlainText,
    /// Word 文档包（.docx / .doc）
    WordPackage,
}

impl DocumentFormat {
    /// 根据文件扩展名判断格式，非 Word 文档一律按纯文本处理
    pub fn from_file_name(file_name: &str) -> Self {
        if is_word_file_name(file_name) {
            DocumentFormat::WordPackage
        } else {
            DocumentFormat::PlainText
        }
    }

    /// 该格式对应的题型推断策略
    pub fn fallback_policy(self) -> FallbackPolicy {
        match self {
            DocumentFormat::PlainText => FallbackPolicy::Fixed(QuestionType::Single),
            DocumentFormat::WordPackage => FallbackPolicy::ContentHeuristic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "纯文本",
            DocumentFormat::WordPackage => "Word文档",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 文件名是否为 Word 文档（.docx / .doc，不区分大小写）
pub fn is_word_file_name(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("docx") || ext.eq_ignore_ascii_case("doc"))
        .unwrap_or(false)
}

/// 段落来源
pub trait ParagraphSource {
    /// 提取有序段落
    fn extract(&self) -> AppResult<Vec<String>>;

    /// 文档格式
    fn format(&self) -> DocumentFormat;

    /// 没有题型标记时使用的推断策略
    fn fallback_policy(&self) -> FallbackPolicy {
        self.format().fallback_policy()
    }
}

/// 提取段落，解码失败时记录警告并返回空列表
pub fn extract_paragraphs(source: &dyn ParagraphSource) -> Vec<String> {
    match source.extract() {
        Ok(paragraphs) => paragraphs,
        Err(e) => {
            warn!("⚠️ {}解析失败，按空文档处理: {}", source.format(), e);
            Vec::new()
        }
    }
}

/// 纯文本段落来源
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    content: String,
}

impl PlainTextSource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// 按 UTF-8 解码，丢弃无效字节
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let content = bytes
            .utf8_chunks()
            .map(|chunk| chunk.valid())
            .collect::<String>();
        Self { content }
    }
}

impl ParagraphSource for PlainTextSource {
    fn extract(&self) -> AppResult<Vec<String>> {
        Ok(self
            .content
            .trim_start_matches('\u{feff}')
            .split('\n')
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::PlainText
    }
}

/// Word 文档段落来源
#[derive(Debug, Clone)]
pub struct WordPackageSource {
    path: PathBuf,
}

impl WordPackageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ParagraphSource for WordPackageSource {
    fn extract(&self) -> AppResult<Vec<String>> {
        let file = File::open(&self.path)?;
        let paragraphs = read_docx_paragraphs(file)?;
        debug!(
            "从 {} 提取到 {} 个段落",
            self.path.display(),
            paragraphs.len()
        );
        Ok(paragraphs)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::WordPackage
    }
}

/// 从 Word 文档包中读取段落
pub fn read_docx_paragraphs<R: Read + Seek>(reader: R) -> AppResult<Vec<String>> {
    let mut archive = ZipArchive::new(reader)?;
    let mut document = archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| AppError::DecodeFailure(format!("缺少 {}: {}", DOCUMENT_XML, e)))?;

    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| AppError::DecodeFailure(format!("读取 {} 失败: {}", DOCUMENT_XML, e)))?;

    parse_document_xml(&xml)
}

/// 从 `document.xml` 中提取段落文本
///
/// 嵌套段落（如文本框）与外层段落各自成段，外层段落同样包含内层文本，
/// 段落顺序以起始标签出现的顺序为准。没有任何非空文本节点的段落被丢弃。
pub fn parse_document_xml(xml: &str) -> AppResult<Vec<String>> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();

    // 按起始标签顺序占位，段落结束时回填
    let mut slots: Vec<Option<String>> = Vec::new();
    let mut open: Vec<(usize, Vec<String>)> = Vec::new();
    let mut text_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                PARAGRAPH_TAG => {
                    slots.push(None);
                    open.push((slots.len() - 1, Vec::new()));
                }
                TEXT_TAG => text_depth += 1,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if text_depth > 0 {
                    let value = e.unescape()?.into_owned();
                    if !value.is_empty() {
                        for (_, parts) in open.iter_mut() {
                            parts.push(value.clone());
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                PARAGRAPH_TAG => {
                    if let Some((slot, parts)) = open.pop() {
                        if !parts.is_empty() {
                            slots[slot] = Some(parts.concat());
                        }
                    }
                }
                TEXT_TAG => text_depth = text_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn build_package(entry: &str, content: &str) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(entry, zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(DocumentFormat::from_file_name("试卷.docx"), DocumentFormat::WordPackage);
        assert_eq!(DocumentFormat::from_file_name("EXAM.DOC"), DocumentFormat::WordPackage);
        assert_eq!(DocumentFormat::from_file_name("exam.txt"), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_file_name("docx"), DocumentFormat::PlainText);
        assert_eq!(
            DocumentFormat::WordPackage.fallback_policy(),
            FallbackPolicy::ContentHeuristic
        );
    }

    #[test]
    fn test_plain_text_lines() {
        let source = PlainTextSource::new("\u{feff}1.题目\r\n\r\n  A.甲  \n答案:A\n");
        assert_eq!(source.extract().unwrap(), vec!["1.题目", "A.甲", "答案:A"]);
    }

    #[test]
    fn test_plain_text_drops_invalid_bytes() {
        let mut bytes = "1.题目".as_bytes().to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice("\n答案:A".as_bytes());

        let source = PlainTextSource::from_bytes(&bytes);
        assert_eq!(source.extract().unwrap(), vec!["1.题目", "答案:A"]);
    }

    #[test]
    fn test_plain_text_keeps_encoded_replacement_character() {
        let mut bytes = "1.符号\u{fffd}题".as_bytes().to_vec();
        bytes.push(0xc3);
        bytes.extend_from_slice("\n答案:A".as_bytes());

        let source = PlainTextSource::from_bytes(&bytes);
        assert_eq!(source.extract().unwrap(), vec!["1.符号\u{fffd}题", "答案:A"]);
    }

    #[test]
    fn test_runs_are_concatenated_per_paragraph() {
        let xml = document_xml(
            "<w:p><w:r><w:t>1.</w:t></w:r><w:r><w:t xml:space=\"preserve\">地球是 </w:t></w:r><w:r><w:t>圆的</w:t></w:r></w:p>\
             <w:p><w:r><w:t>答案:对</w:t></w:r></w:p>",
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["1.地球是 圆的", "答案:对"]);
    }

    #[test]
    fn test_paragraphs_without_text_are_dropped() {
        let xml = document_xml("<w:p/><w:p><w:pPr/></w:p><w:p><w:r><w:t></w:t></w:r></w:p><w:p><w:r><w:t>A&amp;B</w:t></w:r></w:p>");
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["A&B"]);
    }

    #[test]
    fn test_nested_paragraphs_follow_start_order() {
        let xml = document_xml(
            "<w:p><w:r><w:t>外</w:t></w:r><w:p><w:r><w:t>内</w:t></w:r></w:p><w:r><w:t>尾</w:t></w:r></w:p>",
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["外内尾", "内"]);
    }

    #[test]
    fn test_malformed_xml_is_decode_failure() {
        let result = parse_document_xml("<w:document><w:body><w:p></w:body>");
        assert!(matches!(result, Err(AppError::DecodeFailure(_))));
    }

    #[test]
    fn test_read_package() {
        let xml = document_xml("<w:p><w:r><w:t>判断题</w:t></w:r></w:p><w:p><w:r><w:t>1.水是否能导电</w:t></w:r></w:p>");
        let bytes = build_package(DOCUMENT_XML, &xml);

        let paragraphs = read_docx_paragraphs(Cursor::new(bytes)).unwrap();
        assert_eq!(paragraphs, vec!["判断题", "1.水是否能导电"]);
    }

    #[test]
    fn test_package_without_document_xml() {
        let bytes = build_package("word/styles.xml", "<w:styles/>");
        let result = read_docx_paragraphs(Cursor::new(bytes));
        assert!(matches!(result, Err(AppError::DecodeFailure(_))));
    }

    #[test]
    fn test_not_a_zip_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let source = WordPackageSource::new(&path);
        assert!(matches!(source.extract(), Err(AppError::DecodeFailure(_))));
        assert!(extract_paragraphs(&source).is_empty());
    }
}
