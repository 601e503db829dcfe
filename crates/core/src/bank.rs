use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::{Cluster, ClusterLimits, Question, QuestionDraft, QuestionError, QuestionId, Subject};

/// A question draft that failed validation while the bank was being built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("question {index}: {source}")]
pub struct BankError {
    pub index: usize,
    #[source]
    pub source: QuestionError,
}

/// Immutable repository of validated questions, grouped by (subject, cluster).
///
/// Built once at startup and shared read-only for the lifetime of the
/// process; sessions never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    limits: ClusterLimits,
}

impl QuestionBank {
    /// Validates every draft in load order and assigns position-based ids.
    ///
    /// # Errors
    ///
    /// Returns `BankError` carrying the offending draft's index for the
    /// first draft that fails validation.
    pub fn from_drafts(
        drafts: Vec<QuestionDraft>,
        limits: ClusterLimits,
    ) -> Result<Self, BankError> {
        let mut questions = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.into_iter().enumerate() {
            let id = QuestionId::new(index as u64);
            let question = draft
                .validate(id, &limits)
                .map_err(|source| BankError { index, source })?;
            questions.push(question);
        }
        Ok(Self { questions, limits })
    }

    #[must_use]
    pub fn limits(&self) -> &ClusterLimits {
        &self.limits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Looks a question up by id.
    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(usize::try_from(id.value()).ok()?)
    }

    /// Every distinct subject present in the bank, ascending.
    #[must_use]
    pub fn subjects(&self) -> BTreeSet<&Subject> {
        self.questions.iter().map(|q| &q.subject).collect()
    }

    /// Questions in `subject`, regardless of cluster.
    pub fn questions_by_subject<'a>(
        &'a self,
        subject: &'a Subject,
    ) -> impl Iterator<Item = &'a Question> {
        self.questions.iter().filter(move |q| &q.subject == subject)
    }

    /// Questions in `subject` with exactly the given cluster.
    pub fn questions_for<'a>(
        &'a self,
        subject: &'a Subject,
        cluster: Cluster,
    ) -> impl Iterator<Item = &'a Question> {
        self.questions_by_subject(subject)
            .filter(move |q| q.cluster == cluster)
    }

    /// Questions in `subject` whose cluster is any of `clusters` (union).
    pub fn questions_in<'a>(
        &'a self,
        subject: &'a Subject,
        clusters: &'a [Cluster],
    ) -> impl Iterator<Item = &'a Question> {
        self.questions_by_subject(subject)
            .filter(move |q| clusters.contains(&q.cluster))
    }
}
