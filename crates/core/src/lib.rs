#![forbid(unsafe_code)]

pub mod bank;
pub mod model;
pub mod sampler;
pub mod session;
pub mod time;

pub use bank::{BankError, QuestionBank};
pub use session::{
    AnswerFeedback, DEFAULT_TOTAL_QUESTIONS, Mode, Session, SessionError, Stage,
};
pub use time::Clock;
