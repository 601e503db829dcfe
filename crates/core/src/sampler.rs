//! Question selection with tiered fallback.
//!
//! The sampler never stalls a session just because one tier ran dry: it
//! widens the candidate set in fixed steps and only reports exhaustion when
//! the whole subject has been used up.

use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;

use crate::bank::QuestionBank;
use crate::model::{Cluster, Question, QuestionId, Subject};

/// Draws an unused question for `subject`, preferring `target`.
///
/// Candidate sets are tried in order, each minus `exclude`:
/// 1. questions in the target cluster;
/// 2. questions in any of `fallback` (remediation pool), when non-empty;
/// 3. every question in the subject.
///
/// The pick within the final candidate set is uniform at random. `None`
/// means the subject is exhausted under every policy.
pub fn draw<'a, R: Rng + ?Sized>(
    bank: &'a QuestionBank,
    subject: &'a Subject,
    target: Cluster,
    exclude: &HashSet<QuestionId>,
    fallback: &'a [Cluster],
    rng: &mut R,
) -> Option<&'a Question> {
    let mut candidates: Vec<&Question> = bank
        .questions_for(subject, target)
        .filter(|q| !exclude.contains(&q.id))
        .collect();

    if candidates.is_empty() && !fallback.is_empty() {
        candidates = bank
            .questions_in(subject, fallback)
            .filter(|q| !exclude.contains(&q.id))
            .collect();
    }

    if candidates.is_empty() {
        candidates = bank
            .questions_by_subject(subject)
            .filter(|q| !exclude.contains(&q.id))
            .collect();
    }

    candidates.choose(rng).copied()
}
