use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use crate::bank::QuestionBank;
use crate::model::{
    AnswerLabel, Cluster, ClusterLimits, MIN_CLUSTER, QuestionId, SessionSummary, Subject,
};
use crate::sampler;

/// Session length used when the caller does not pick one.
pub const DEFAULT_TOTAL_QUESTIONS: u32 = 5;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no cluster limit configured for subject {0:?}")]
    UnknownSubject(String),

    #[error("session must ask at least one question")]
    InvalidTotal,

    #[error("remediation requires a non-empty weak-cluster pool")]
    InvalidMode,

    #[error("no question is awaiting an answer")]
    NoCurrentQuestion,

    #[error("current question was already answered")]
    AlreadyAnswered,

    #[error("current question has not been answered yet")]
    NotAnswered,

    #[error("session is already complete")]
    Completed,

    #[error("session is still in progress")]
    NotComplete,

    #[error("no weak clusters recorded, nothing to remediate")]
    NoWeakAreas,
}

//
// ─── MODE AND STAGE ────────────────────────────────────────────────────────────
//

/// Sampling and adaptation policy for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Adaptive: correctness moves the active cluster one step up or down.
    Normal,
    /// Fixed to previously weak tiers; the cluster never adapts per answer.
    Remediation { pool: Vec<Cluster> },
}

/// Where a session is in its lifecycle.
///
/// `Ready` covers both "just started" and "advanced, next question not yet
/// loaded".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ready,
    AwaitingAnswer,
    Answered,
    Complete,
}

/// Outcome of grading one answer, kept for the calling surface to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_label: AnswerLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CurrentRound {
    question: QuestionId,
    /// Cluster the question was drawn under; mistakes are attributed here
    /// even if the sampler had to widen past it.
    cluster: Cluster,
    correct: AnswerLabel,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One assessment run for a single student and subject.
///
/// The session owns all mutable quiz state and is driven strictly through
/// its transition methods; every transition either fully applies or fails
/// before mutating anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    subject: Subject,
    mode: Mode,
    max_cluster: Cluster,
    active_cluster: Cluster,
    total_questions: u32,
    question_index: u32,
    score: u32,
    used_questions: HashSet<QuestionId>,
    current: Option<CurrentRound>,
    weak_clusters: BTreeMap<Cluster, u32>,
    last_outcome: Option<AnswerFeedback>,
    stage: Stage,
}

impl Session {
    /// Begin a session for `subject` asking `total_questions` questions.
    ///
    /// Normal mode opens at the midpoint of the subject's cluster range;
    /// remediation opens at the first pool cluster and seeds a zero mistake
    /// count for every pool member.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSubject` if `limits` has no entry for the subject,
    /// `InvalidTotal` for a zero-length session, and `InvalidMode` for a
    /// remediation request with an empty pool.
    pub fn start(
        subject: Subject,
        total_questions: u32,
        mode: Mode,
        limits: &ClusterLimits,
    ) -> Result<Self, SessionError> {
        let max = limits
            .max_for(&subject)
            .ok_or_else(|| SessionError::UnknownSubject(subject.as_str().to_string()))?;
        if total_questions == 0 {
            return Err(SessionError::InvalidTotal);
        }
        Self::begin(subject, total_questions, mode, max)
    }

    fn begin(
        subject: Subject,
        total_questions: u32,
        mode: Mode,
        max_cluster: Cluster,
    ) -> Result<Self, SessionError> {
        let (active_cluster, weak_clusters) = match &mode {
            Mode::Normal => {
                let midpoint = (max_cluster.value() / 2).max(MIN_CLUSTER.value());
                (Cluster::new(midpoint), BTreeMap::new())
            }
            Mode::Remediation { pool } => {
                let Some(first) = pool.first() else {
                    return Err(SessionError::InvalidMode);
                };
                (*first, pool.iter().map(|&c| (c, 0)).collect())
            }
        };

        Ok(Self {
            subject,
            mode,
            max_cluster,
            active_cluster,
            total_questions,
            question_index: 0,
            score: 0,
            used_questions: HashSet::new(),
            current: None,
            weak_clusters,
            last_outcome: None,
            stage: Stage::Ready,
        })
    }

    /// Draw the next question, if one is not already pending.
    ///
    /// A pending question (answered or not) makes this a no-op returning its
    /// id. When the sampler is exhausted the session completes early and
    /// `None` is returned; that is a designed outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns `Completed` when called on a finished session.
    pub fn load_next<R: Rng + ?Sized>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<Option<QuestionId>, SessionError> {
        match self.stage {
            Stage::Complete => return Err(SessionError::Completed),
            Stage::AwaitingAnswer | Stage::Answered => {
                return Ok(self.current.as_ref().map(|round| round.question));
            }
            Stage::Ready => {}
        }

        // Remediation keeps the target inside the pool.
        if let Mode::Remediation { pool } = &self.mode {
            if !pool.contains(&self.active_cluster) {
                if let Some(&cluster) = pool.choose(rng) {
                    self.active_cluster = cluster;
                }
            }
        }

        let picked = {
            let fallback: &[Cluster] = match &self.mode {
                Mode::Normal => &[],
                Mode::Remediation { pool } => pool,
            };
            sampler::draw(
                bank,
                &self.subject,
                self.active_cluster,
                &self.used_questions,
                fallback,
                rng,
            )
            .map(|q| (q.id, q.correct))
        };

        match picked {
            None => {
                self.finish();
                Ok(None)
            }
            Some((id, correct)) => {
                self.used_questions.insert(id);
                self.current = Some(CurrentRound {
                    question: id,
                    cluster: self.active_cluster,
                    correct,
                });
                self.stage = Stage::AwaitingAnswer;
                Ok(Some(id))
            }
        }
    }

    /// Grade `choice` against the pending question.
    ///
    /// A correct answer bumps the score; in normal mode it also moves the
    /// active cluster one step up (clamped). An incorrect answer moves it one
    /// step down (normal mode only) and records a mistake against the
    /// cluster the question was drawn under.
    ///
    /// # Errors
    ///
    /// Returns `NoCurrentQuestion` with nothing pending, `AlreadyAnswered`
    /// for a second grade of the same round, and `Completed` on a finished
    /// session.
    pub fn submit_answer(&mut self, choice: AnswerLabel) -> Result<AnswerFeedback, SessionError> {
        match self.stage {
            Stage::Complete => return Err(SessionError::Completed),
            Stage::Answered => return Err(SessionError::AlreadyAnswered),
            Stage::Ready => return Err(SessionError::NoCurrentQuestion),
            Stage::AwaitingAnswer => {}
        }
        let Some(round) = self.current.as_ref() else {
            return Err(SessionError::NoCurrentQuestion);
        };
        let drawn_cluster = round.cluster;
        let correct_label = round.correct;

        let correct = choice == correct_label;
        if correct {
            self.score += 1;
            if matches!(self.mode, Mode::Normal) {
                self.active_cluster = self.active_cluster.step_up(self.max_cluster);
            }
        } else {
            if matches!(self.mode, Mode::Normal) {
                self.active_cluster = self.active_cluster.step_down();
            }
            *self.weak_clusters.entry(drawn_cluster).or_insert(0) += 1;
        }

        let feedback = AnswerFeedback {
            correct,
            correct_label,
        };
        self.last_outcome = Some(feedback);
        self.stage = Stage::Answered;
        Ok(feedback)
    }

    /// Close out an answered round and move on.
    ///
    /// Reaching the planned total completes the session.
    ///
    /// # Errors
    ///
    /// Returns `NotAnswered` before a graded round and `Completed` on a
    /// finished session.
    pub fn advance(&mut self) -> Result<Stage, SessionError> {
        match self.stage {
            Stage::Complete => return Err(SessionError::Completed),
            Stage::Ready | Stage::AwaitingAnswer => return Err(SessionError::NotAnswered),
            Stage::Answered => {}
        }

        self.question_index += 1;
        self.current = None;
        self.last_outcome = None;
        if self.question_index >= self.total_questions {
            self.finish();
        } else {
            self.stage = Stage::Ready;
        }
        Ok(self.stage)
    }

    /// End the session now with whatever score and progress accumulated.
    ///
    /// # Errors
    ///
    /// Returns `Completed` if the session already finished.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        if self.stage == Stage::Complete {
            return Err(SessionError::Completed);
        }
        self.finish();
        Ok(())
    }

    /// Spawn a remediation session over this session's weak clusters.
    ///
    /// # Errors
    ///
    /// Returns `NotComplete` while this session is still running and
    /// `NoWeakAreas` when no cluster collected a mistake.
    pub fn restart_remediation(&self) -> Result<Session, SessionError> {
        if self.stage != Stage::Complete {
            return Err(SessionError::NotComplete);
        }
        let pool: Vec<Cluster> = self
            .weak_clusters
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&cluster, _)| cluster)
            .collect();
        if pool.is_empty() {
            return Err(SessionError::NoWeakAreas);
        }
        Self::begin(
            self.subject.clone(),
            self.total_questions,
            Mode::Remediation { pool },
            self.max_cluster,
        )
    }

    fn finish(&mut self) {
        self.current = None;
        self.stage = Stage::Complete;
    }

    /// Snapshot for the result recorder.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_run(
            self.subject.clone(),
            self.score,
            self.total_questions,
            self.question_index,
            self.weak_clusters.clone(),
        )
    }

    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    #[must_use]
    pub fn active_cluster(&self) -> Cluster {
        self.active_cluster
    }

    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn used_questions(&self) -> &HashSet<QuestionId> {
        &self.used_questions
    }

    #[must_use]
    pub fn current_question(&self) -> Option<QuestionId> {
        self.current.as_ref().map(|round| round.question)
    }

    #[must_use]
    pub fn weak_clusters(&self) -> &BTreeMap<Cluster, u32> {
        &self.weak_clusters
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<AnswerFeedback> {
        self.last_outcome
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionDraft;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn draft(subject: &str, cluster: i64) -> QuestionDraft {
        QuestionDraft {
            subject: subject.to_string(),
            cluster,
            question: format!("{subject} tier {cluster}"),
            option_a: "one".to_string(),
            option_b: "two".to_string(),
            option_c: "three".to_string(),
            option_d: "four".to_string(),
            answer: "C".to_string(),
        }
    }

    /// Three Mathematics questions in every tier 1..=8.
    fn math_bank() -> QuestionBank {
        let mut drafts = Vec::new();
        for cluster in 1..=8 {
            for _ in 0..3 {
                drafts.push(draft("Mathematics", cluster));
            }
        }
        QuestionBank::from_drafts(drafts, ClusterLimits::defaults()).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn start_math(total: u32) -> Session {
        Session::start(
            Subject::new("Mathematics"),
            total,
            Mode::Normal,
            &ClusterLimits::defaults(),
        )
        .unwrap()
    }

    fn wrong_label(correct: AnswerLabel) -> AnswerLabel {
        AnswerLabel::ALL
            .into_iter()
            .find(|&l| l != correct)
            .unwrap()
    }

    /// Loads the next question and answers it correctly or not.
    fn play_round(
        session: &mut Session,
        bank: &QuestionBank,
        rng: &mut StdRng,
        correctly: bool,
    ) -> AnswerFeedback {
        let id = session.load_next(bank, rng).unwrap().unwrap();
        let correct = bank.question(id).unwrap().correct;
        let choice = if correctly {
            correct
        } else {
            wrong_label(correct)
        };
        session.submit_answer(choice).unwrap()
    }

    #[test]
    fn normal_session_opens_at_the_midpoint() {
        let session = start_math(5);
        assert_eq!(session.active_cluster(), Cluster::new(4));
        assert_eq!(session.stage(), Stage::Ready);
        assert_eq!(session.score(), 0);
        assert!(session.weak_clusters().is_empty());
    }

    #[test]
    fn unknown_subject_is_rejected_at_start() {
        let err = Session::start(
            Subject::new("History"),
            5,
            Mode::Normal,
            &ClusterLimits::defaults(),
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::UnknownSubject(_)));
    }

    #[test]
    fn zero_length_session_is_rejected() {
        let err = Session::start(
            Subject::new("Mathematics"),
            0,
            Mode::Normal,
            &ClusterLimits::defaults(),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::InvalidTotal);
    }

    #[test]
    fn remediation_with_empty_pool_is_rejected() {
        let err = Session::start(
            Subject::new("Mathematics"),
            5,
            Mode::Remediation { pool: Vec::new() },
            &ClusterLimits::defaults(),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::InvalidMode);
    }

    // Scenario: Mathematics, N=8, midpoint start; one correct answer climbs
    // to 5, the following mistake falls back to 4 and charges cluster 5.
    #[test]
    fn adaptive_cluster_follows_correctness() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(5);

        assert_eq!(session.active_cluster(), Cluster::new(4));
        play_round(&mut session, &bank, &mut rng, true);
        assert_eq!(session.active_cluster(), Cluster::new(5));
        session.advance().unwrap();

        play_round(&mut session, &bank, &mut rng, false);
        assert_eq!(session.active_cluster(), Cluster::new(4));
        assert_eq!(session.weak_clusters().get(&Cluster::new(5)), Some(&1));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn cluster_clamps_at_the_bottom() {
        let limits = ClusterLimits::new().with_limit(Subject::new("Tiny"), Cluster::new(2));
        let drafts = vec![draft("Tiny", 1), draft("Tiny", 1), draft("Tiny", 2)];
        let bank = QuestionBank::from_drafts(drafts, limits.clone()).unwrap();
        let mut rng = rng();

        let mut session = Session::start(Subject::new("Tiny"), 3, Mode::Normal, &limits).unwrap();
        assert_eq!(session.active_cluster(), MIN_CLUSTER);

        play_round(&mut session, &bank, &mut rng, false);
        assert_eq!(session.active_cluster(), MIN_CLUSTER);
        assert_eq!(session.weak_clusters().get(&MIN_CLUSTER), Some(&1));
    }

    #[test]
    fn cluster_stays_within_bounds_after_every_answer() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(20);

        for round in 0..20 {
            if session.is_complete() {
                break;
            }
            if session.load_next(&bank, &mut rng).unwrap().is_none() {
                break;
            }
            let id = session.current_question().unwrap();
            let correct = bank.question(id).unwrap().correct;
            // Push hard against both clamps.
            let choice = if round < 10 { correct } else { wrong_label(correct) };
            session.submit_answer(choice).unwrap();

            let cluster = session.active_cluster().value();
            assert!((1..=8).contains(&cluster));
            session.advance().unwrap();
        }
    }

    #[test]
    fn load_next_never_repeats_a_question() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(24);
        let mut seen = HashSet::new();

        loop {
            match session.load_next(&bank, &mut rng).unwrap() {
                None => break,
                Some(id) => {
                    assert!(seen.insert(id), "question {id} repeated");
                    let correct = bank.question(id).unwrap().correct;
                    session.submit_answer(correct).unwrap();
                    if session.advance().unwrap() == Stage::Complete {
                        break;
                    }
                }
            }
        }
        assert_eq!(seen.len(), session.used_questions().len());
    }

    #[test]
    fn load_next_is_idempotent_until_advance() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(5);

        let first = session.load_next(&bank, &mut rng).unwrap();
        let used = session.used_questions().clone();
        let second = session.load_next(&bank, &mut rng).unwrap();

        assert_eq!(first, second);
        assert_eq!(&used, session.used_questions());

        // Still pending after grading; only advance clears it.
        let id = first.unwrap();
        session
            .submit_answer(bank.question(id).unwrap().correct)
            .unwrap();
        assert_eq!(session.load_next(&bank, &mut rng).unwrap(), Some(id));
    }

    #[test]
    fn grading_requires_a_pending_question() {
        let mut session = start_math(5);
        assert_eq!(
            session.submit_answer(AnswerLabel::A).unwrap_err(),
            SessionError::NoCurrentQuestion
        );
    }

    #[test]
    fn double_grading_is_rejected() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(5);

        play_round(&mut session, &bank, &mut rng, true);
        assert_eq!(
            session.submit_answer(AnswerLabel::A).unwrap_err(),
            SessionError::AlreadyAnswered
        );
        // The failed second grade left the score untouched.
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn advance_requires_a_graded_round() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(5);

        assert_eq!(session.advance().unwrap_err(), SessionError::NotAnswered);
        session.load_next(&bank, &mut rng).unwrap();
        assert_eq!(session.advance().unwrap_err(), SessionError::NotAnswered);
    }

    // Scenario: total of three rounds answered and advanced ends the session
    // with full progress.
    #[test]
    fn completing_all_rounds_reports_full_progress() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(3);

        for _ in 0..3 {
            play_round(&mut session, &bank, &mut rng, true);
            session.advance().unwrap();
        }

        assert!(session.is_complete());
        assert_eq!(session.question_index(), 3);
        let summary = session.summary();
        assert_eq!(summary.progress(), 1.0);
        assert_eq!(summary.score(), 3);
        assert_eq!(
            session.load_next(&bank, &mut rng).unwrap_err(),
            SessionError::Completed
        );
    }

    // Scenario: quitting after two of five rounds records 0.4 progress.
    #[test]
    fn quit_finalizes_with_partial_progress() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(5);

        for _ in 0..2 {
            play_round(&mut session, &bank, &mut rng, true);
            session.advance().unwrap();
        }
        session.quit().unwrap();

        assert!(session.is_complete());
        let summary = session.summary();
        assert!((summary.progress() - 0.4).abs() < f64::EPSILON);
        assert_eq!(session.quit().unwrap_err(), SessionError::Completed);
    }

    #[test]
    fn exhaustion_completes_the_session_early() {
        let drafts = vec![draft("Mathematics", 4), draft("Mathematics", 4)];
        let bank = QuestionBank::from_drafts(drafts, ClusterLimits::defaults()).unwrap();
        let mut rng = rng();
        let mut session = start_math(5);

        for _ in 0..2 {
            play_round(&mut session, &bank, &mut rng, true);
            session.advance().unwrap();
        }
        assert_eq!(session.load_next(&bank, &mut rng).unwrap(), None);
        assert!(session.is_complete());
        assert!((session.summary().progress() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn weak_counts_only_grow_on_mistakes() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(6);

        for correctly in [true, false, true, false, true, true] {
            play_round(&mut session, &bank, &mut rng, correctly);
            session.advance().unwrap();
        }

        let total_mistakes: u32 = session.weak_clusters().values().sum();
        assert_eq!(total_mistakes, 2);
        assert_eq!(session.score(), 4);
    }

    #[test]
    fn restart_without_mistakes_reports_no_weak_areas() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(3);

        for _ in 0..3 {
            play_round(&mut session, &bank, &mut rng, true);
            session.advance().unwrap();
        }
        assert_eq!(
            session.restart_remediation().unwrap_err(),
            SessionError::NoWeakAreas
        );
    }

    #[test]
    fn restart_requires_a_complete_session() {
        let session = start_math(3);
        assert_eq!(
            session.restart_remediation().unwrap_err(),
            SessionError::NotComplete
        );
    }

    #[test]
    fn restart_builds_a_remediation_session_over_weak_clusters() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(3);

        for _ in 0..3 {
            play_round(&mut session, &bank, &mut rng, false);
            session.advance().unwrap();
        }
        let weak: Vec<Cluster> = session.summary().weak_list();
        assert!(!weak.is_empty());

        let retry = session.restart_remediation().unwrap();
        assert_eq!(retry.mode(), &Mode::Remediation { pool: weak.clone() });
        assert_eq!(retry.active_cluster(), weak[0]);
        assert_eq!(retry.score(), 0);
        assert!(retry.used_questions().is_empty());
        // Seeded with zero counts, ready to accumulate fresh mistakes.
        assert!(retry.weak_clusters().values().all(|&count| count == 0));
        assert_eq!(
            retry.weak_clusters().keys().copied().collect::<Vec<_>>(),
            weak
        );
    }

    // Scenario: pool {2, 5} opens at 2; once tier 2 runs dry the sampler
    // falls back to the pool union before touching the rest of the subject.
    #[test]
    fn remediation_draws_from_the_pool_union_before_widening() {
        let mut drafts = vec![draft("Mathematics", 2)];
        for _ in 0..4 {
            drafts.push(draft("Mathematics", 5));
        }
        drafts.push(draft("Mathematics", 3));
        let bank = QuestionBank::from_drafts(drafts, ClusterLimits::defaults()).unwrap();
        let mut rng = rng();

        let pool = vec![Cluster::new(2), Cluster::new(5)];
        let mut session = Session::start(
            Subject::new("Mathematics"),
            5,
            Mode::Remediation { pool: pool.clone() },
            &ClusterLimits::defaults(),
        )
        .unwrap();
        assert_eq!(session.active_cluster(), Cluster::new(2));

        // First draw consumes the only tier-2 question.
        let id = session.load_next(&bank, &mut rng).unwrap().unwrap();
        assert_eq!(bank.question(id).unwrap().cluster, Cluster::new(2));
        session.submit_answer(AnswerLabel::C).unwrap();
        session.advance().unwrap();

        // The next four draws must come from the pool union, not tier 3.
        for _ in 0..4 {
            let id = session.load_next(&bank, &mut rng).unwrap().unwrap();
            assert_eq!(bank.question(id).unwrap().cluster, Cluster::new(5));
            session.submit_answer(AnswerLabel::C).unwrap();
            if session.advance().unwrap() == Stage::Complete {
                break;
            }
        }
    }

    #[test]
    fn remediation_never_adapts_the_cluster() {
        let mut drafts = Vec::new();
        for _ in 0..6 {
            drafts.push(draft("Mathematics", 2));
        }
        let bank = QuestionBank::from_drafts(drafts, ClusterLimits::defaults()).unwrap();
        let mut rng = rng();

        let mut session = Session::start(
            Subject::new("Mathematics"),
            4,
            Mode::Remediation {
                pool: vec![Cluster::new(2)],
            },
            &ClusterLimits::defaults(),
        )
        .unwrap();

        for correctly in [true, false, true, false] {
            play_round(&mut session, &bank, &mut rng, correctly);
            assert_eq!(session.active_cluster(), Cluster::new(2));
            session.advance().unwrap();
        }
        // Mistakes are still tracked while the cluster stays put.
        assert_eq!(session.weak_clusters().get(&Cluster::new(2)), Some(&2));
    }

    #[test]
    fn feedback_carries_the_correct_label() {
        let bank = math_bank();
        let mut rng = rng();
        let mut session = start_math(5);

        let feedback = play_round(&mut session, &bank, &mut rng, false);
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_label, AnswerLabel::C);
        assert_eq!(session.last_outcome(), Some(feedback));

        session.advance().unwrap();
        assert_eq!(session.last_outcome(), None);
    }
}
