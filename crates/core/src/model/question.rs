use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::limits::{ClusterLimits, MIN_CLUSTER};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question body cannot be empty")]
    EmptyBody,

    #[error("option {label} cannot be empty")]
    EmptyOption { label: AnswerLabel },

    #[error("cluster {value} is outside 1..={max}")]
    ClusterOutOfRange { value: i64, max: u32 },

    #[error("no cluster limit configured for subject {0:?}")]
    UnknownSubject(String),

    #[error(transparent)]
    InvalidAnswer(#[from] ParseLabelError),
}

/// Error type for parsing an answer label from free-form input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("answer label must be one of A-D, got {found:?}")]
pub struct ParseLabelError {
    found: String,
}

//
// ─── SUBJECT ───────────────────────────────────────────────────────────────────
//

/// Name of a question pool, e.g. `English` or `Mathematics`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── CLUSTER ───────────────────────────────────────────────────────────────────
//

/// Integer difficulty tier within a subject's question pool; higher is harder.
///
/// Valid tiers run from [`MIN_CLUSTER`] up to the subject's configured
/// maximum (see [`ClusterLimits`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cluster(u32);

impl Cluster {
    #[must_use]
    pub const fn new(tier: u32) -> Self {
        Self(tier)
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// One tier harder, clamped to `max`.
    #[must_use]
    pub fn step_up(self, max: Cluster) -> Cluster {
        Cluster(self.0.saturating_add(1).min(max.0))
    }

    /// One tier easier, clamped to [`MIN_CLUSTER`].
    #[must_use]
    pub fn step_down(self) -> Cluster {
        Cluster(self.0.saturating_sub(1).max(MIN_CLUSTER.value()))
    }

    /// Friendly topic label for display surfaces.
    #[must_use]
    pub fn label(&self) -> String {
        match self.0 {
            1 => "Foundations".to_string(),
            2 => "Basics".to_string(),
            3 => "Practice".to_string(),
            4 => "Intermediate".to_string(),
            5 => "Advanced Practice".to_string(),
            6 => "Advanced".to_string(),
            7 => "Expert".to_string(),
            8 => "Mastery".to_string(),
            other => format!("Cluster {other}"),
        }
    }
}

impl fmt::Debug for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cluster({})", self.0)
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── ANSWER LABEL ──────────────────────────────────────────────────────────────
//

/// One of the four option slots of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerLabel {
    A,
    B,
    C,
    D,
}

impl AnswerLabel {
    pub const ALL: [AnswerLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl FromStr for AnswerLabel {
    type Err = ParseLabelError;

    /// Parsing is trimmed and case-insensitive: `" b "` is `B`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("a") => Ok(Self::A),
            t if t.eq_ignore_ascii_case("b") => Ok(Self::B),
            t if t.eq_ignore_ascii_case("c") => Ok(Self::C),
            t if t.eq_ignore_ascii_case("d") => Ok(Self::D),
            other => Err(ParseLabelError {
                found: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Raw question record as it arrives from an ingested question file.
///
/// Field values are unchecked until [`QuestionDraft::validate`] runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionDraft {
    pub subject: String,
    pub cluster: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub answer: String,
}

impl QuestionDraft {
    /// Validate the draft into an immutable [`Question`].
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the body or an option is empty, the
    /// cluster falls outside the subject's configured `1..=N` range, the
    /// subject has no configured limit, or the answer is not one of A-D.
    pub fn validate(
        self,
        id: QuestionId,
        limits: &ClusterLimits,
    ) -> Result<Question, QuestionError> {
        let subject = Subject::new(self.subject.trim());
        let max = limits
            .max_for(&subject)
            .ok_or_else(|| QuestionError::UnknownSubject(subject.as_str().to_string()))?;

        let in_range = self.cluster >= i64::from(MIN_CLUSTER.value())
            && self.cluster <= i64::from(max.value());
        if !in_range {
            return Err(QuestionError::ClusterOutOfRange {
                value: self.cluster,
                max: max.value(),
            });
        }
        let cluster = Cluster::new(u32::try_from(self.cluster).map_err(|_| {
            QuestionError::ClusterOutOfRange {
                value: self.cluster,
                max: max.value(),
            }
        })?);

        let body = self.question.trim().to_string();
        if body.is_empty() {
            return Err(QuestionError::EmptyBody);
        }

        let options = [self.option_a, self.option_b, self.option_c, self.option_d];
        for (label, option) in AnswerLabel::ALL.into_iter().zip(options.iter()) {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption { label });
            }
        }

        let correct = AnswerLabel::from_str(&self.answer)?;

        Ok(Question {
            id,
            subject,
            cluster,
            body,
            options,
            correct,
        })
    }
}

/// A validated multiple-choice question. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub subject: Subject,
    pub cluster: Cluster,
    pub body: String,
    /// Option texts in A, B, C, D order.
    pub options: [String; 4],
    pub correct: AnswerLabel,
}

impl Question {
    /// Text of the option behind `label`.
    #[must_use]
    pub fn option(&self, label: AnswerLabel) -> &str {
        &self.options[label.index()]
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
