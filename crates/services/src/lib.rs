#![forbid(unsafe_code)]

pub mod error;
pub mod question_loader;
pub mod quiz_service;
pub mod registration_service;
pub mod results_service;

pub use quiz_core::Clock;

pub use error::{LoadError, QuizServiceError, RegistrationError, ResultsError};
pub use question_loader::{load_question_bank, question_bank_from_json};
pub use quiz_service::{Advance, FinishOutcome, LoadNext, QuizRun, QuizService};
pub use registration_service::RegistrationService;
pub use results_service::ResultsService;
