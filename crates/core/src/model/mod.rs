mod ids;
mod limits;
mod question;
mod student;
mod summary;

pub use ids::{QuestionId, StudentId};
pub use limits::{ClusterLimits, MIN_CLUSTER};
pub use question::{
    AnswerLabel, Cluster, ParseLabelError, Question, QuestionDraft, QuestionError, Subject,
};
pub use student::{Area, ParseAreaError, StudentProfile};
pub use summary::{SessionSummary, SummaryError};
