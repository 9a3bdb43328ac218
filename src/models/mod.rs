pub mod question;
pub mod submission;

pub use question::{Question, QuestionType, JUDGE_OPTIONS};
pub use submission::{
    ScoringResult, SubmissionSummary, SubmitRequest, SubmitResponse, SubmittedAnswer,
    UploadResponse,
};
