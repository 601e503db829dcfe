use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{debug, warn};

use quiz_core::model::{AnswerLabel, Question, SessionSummary, StudentId, Subject};
use quiz_core::session::{AnswerFeedback, Mode, Session, Stage};
use quiz_core::{Clock, QuestionBank};
use storage::repository::{ResultRepository, StorageError};

use crate::error::QuizServiceError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// What finalization produced: the frozen summary, and whether the single
/// best-effort persistence attempt landed.
///
/// A failed `stored` never un-completes the session; the summary stays
/// available to the caller either way.
#[derive(Debug)]
pub struct FinishOutcome {
    pub summary: SessionSummary,
    pub stored: Result<i64, StorageError>,
}

/// Result of asking for the next question.
#[derive(Debug)]
pub enum LoadNext {
    Question(Question),
    /// The subject ran out of unused questions; the session completed early.
    Finished(FinishOutcome),
}

/// Result of advancing past an answered round.
#[derive(Debug)]
pub enum Advance {
    InProgress,
    Finished(FinishOutcome),
}

//
// ─── QUIZ RUN ──────────────────────────────────────────────────────────────────
//

/// A session bound to the student taking it.
#[derive(Debug)]
pub struct QuizRun {
    student_id: StudentId,
    session: Session,
}

impl QuizRun {
    #[must_use]
    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }
}

//
// ─── QUIZ SERVICE ──────────────────────────────────────────────────────────────
//

/// Drives sessions against the question bank and records finished runs.
///
/// One external caller issues one transition at a time; nothing here blocks
/// beyond the recorder write at finalization.
pub struct QuizService {
    bank: Arc<QuestionBank>,
    results: Arc<dyn ResultRepository>,
    clock: Clock,
    rng: StdRng,
}

impl QuizService {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, results: Arc<dyn ResultRepository>, clock: Clock) -> Self {
        Self {
            bank,
            results,
            clock,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the sampler's random source, e.g. with a seeded rng in tests.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Start a session for `student_id`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` for an unknown subject, a
    /// zero-length run, or an empty remediation pool.
    pub fn start(
        &self,
        student_id: StudentId,
        subject: Subject,
        total_questions: u32,
        mode: Mode,
    ) -> Result<QuizRun, QuizServiceError> {
        let session = Session::start(subject, total_questions, mode, self.bank.limits())?;
        debug!(student = %student_id, subject = %session.subject(), "quiz session started");
        Ok(QuizRun {
            student_id,
            session,
        })
    }

    /// Draw the next question, or finalize early on exhaustion.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` when the session is already
    /// complete.
    pub async fn load_next(&mut self, run: &mut QuizRun) -> Result<LoadNext, QuizServiceError> {
        match run.session.load_next(&self.bank, &mut self.rng)? {
            Some(id) => {
                let Some(question) = self.bank.question(id) else {
                    return Err(QuizServiceError::MissingQuestion(id));
                };
                Ok(LoadNext::Question(question.clone()))
            }
            None => {
                debug!(student = %run.student_id, "question pool exhausted, finishing early");
                Ok(LoadNext::Finished(self.record(run).await))
            }
        }
    }

    /// Grade a free-form answer choice against the pending question.
    ///
    /// # Errors
    ///
    /// Returns `InvalidChoice` when `choice` is not one of A-D, and
    /// `QuizServiceError::Session` for grading a round that is not pending.
    pub fn submit_answer(
        &self,
        run: &mut QuizRun,
        choice: &str,
    ) -> Result<AnswerFeedback, QuizServiceError> {
        let label = choice
            .parse::<AnswerLabel>()
            .map_err(|_| QuizServiceError::InvalidChoice(choice.to_string()))?;
        Ok(run.session.submit_answer(label)?)
    }

    /// Move past an answered round, finalizing when the run is done.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` when the round has not been
    /// graded or the session is already complete.
    pub async fn advance(&self, run: &mut QuizRun) -> Result<Advance, QuizServiceError> {
        let stage = run.session.advance()?;
        if stage == Stage::Complete {
            Ok(Advance::Finished(self.record(run).await))
        } else {
            Ok(Advance::InProgress)
        }
    }

    /// End the run now, keeping whatever score and progress accumulated.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` when the session already
    /// finished.
    pub async fn quit(&self, run: &mut QuizRun) -> Result<FinishOutcome, QuizServiceError> {
        run.session.quit()?;
        debug!(student = %run.student_id, "quiz quit early");
        Ok(self.record(run).await)
    }

    /// Spawn a remediation run over the finished run's weak clusters.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` wrapping `NoWeakAreas` when there
    /// is nothing to remediate, or `NotComplete` for a live session.
    pub fn restart_remediation(&self, run: &QuizRun) -> Result<QuizRun, QuizServiceError> {
        let session = run.session.restart_remediation()?;
        debug!(student = %run.student_id, "remediation session started");
        Ok(QuizRun {
            student_id: run.student_id.clone(),
            session,
        })
    }

    /// One best-effort persistence attempt; failure is surfaced, not
    /// retried, and never rolls the completion back.
    async fn record(&self, run: &QuizRun) -> FinishOutcome {
        let summary = run.session.summary();
        let taken_at = self.clock.now();
        let stored = self
            .results
            .append_result(&run.student_id, &summary, taken_at)
            .await;
        match &stored {
            Ok(id) => debug!(result_id = *id, "quiz result persisted"),
            Err(err) => warn!(%err, "failed to persist quiz result"),
        }
        FinishOutcome { summary, stored }
    }
}
