pub mod answer_normalizer;
pub mod exam_service;
pub mod paragraph_source;
pub mod question_parser;
pub mod scoring_service;

pub use exam_service::{ExamService, UploadRoute, UploadedFile};
pub use paragraph_source::{
    extract_paragraphs, DocumentFormat, ParagraphSource, PlainTextSource, WordPackageSource,
};
pub use question_parser::{parse_document, FallbackPolicy, QuestionParser};
pub use scoring_service::score_submission;
