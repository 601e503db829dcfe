use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::question::{Cluster, Subject};

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("score {score} exceeds total questions {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("progress {0} is outside 0.0..=1.0")]
    InvalidProgress(f64),
}

/// Frozen outcome of a finished assessment session.
///
/// This is the value handed to the result recorder: raw correct count, the
/// fraction of the planned run that was actually answered, and the mistake
/// count per difficulty tier.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    subject: Subject,
    score: u32,
    total_questions: u32,
    progress: f64,
    weak_clusters: BTreeMap<Cluster, u32>,
}

impl SessionSummary {
    /// Rehydrate a summary from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError` if the score exceeds the total or the progress
    /// fraction is out of range.
    pub fn from_persisted(
        subject: Subject,
        score: u32,
        total_questions: u32,
        progress: f64,
        weak_clusters: BTreeMap<Cluster, u32>,
    ) -> Result<Self, SummaryError> {
        if score > total_questions {
            return Err(SummaryError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }
        if !(0.0..=1.0).contains(&progress) {
            return Err(SummaryError::InvalidProgress(progress));
        }

        Ok(Self {
            subject,
            score,
            total_questions,
            progress,
            weak_clusters,
        })
    }

    /// Snapshot of a live session. Progress is computed from how many rounds
    /// were answered out of the planned total.
    pub(crate) fn from_run(
        subject: Subject,
        score: u32,
        total_questions: u32,
        question_index: u32,
        weak_clusters: BTreeMap<Cluster, u32>,
    ) -> Self {
        let progress = f64::from(question_index) / f64::from(total_questions.max(1));
        Self {
            subject,
            score,
            total_questions,
            progress: progress.min(1.0),
            weak_clusters,
        }
    }

    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Fraction of the planned run that was answered, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn weak_clusters(&self) -> &BTreeMap<Cluster, u32> {
        &self.weak_clusters
    }

    /// Clusters that collected at least one mistake, ascending.
    #[must_use]
    pub fn weak_list(&self) -> Vec<Cluster> {
        self.weak_clusters
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&cluster, _)| cluster)
            .collect()
    }
}
