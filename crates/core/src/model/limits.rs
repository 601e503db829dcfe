use std::collections::HashMap;

use crate::model::question::{Cluster, Subject};

/// Lowest valid difficulty tier for every subject.
pub const MIN_CLUSTER: Cluster = Cluster::new(1);

/// Configured difficulty ceiling per subject.
///
/// Subjects without an entry are rejected outright: a session never invents a
/// ceiling for an unknown subject.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterLimits {
    limits: HashMap<Subject, Cluster>,
}

impl ClusterLimits {
    /// An empty limit table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock configuration: English runs 1..=7, Mathematics 1..=8.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new()
            .with_limit(Subject::new("English"), Cluster::new(7))
            .with_limit(Subject::new("Mathematics"), Cluster::new(8))
    }

    /// Adds or replaces a subject's ceiling.
    #[must_use]
    pub fn with_limit(mut self, subject: Subject, max: Cluster) -> Self {
        self.limits.insert(subject, max);
        self
    }

    /// The configured ceiling `N(subject)`, if any.
    #[must_use]
    pub fn max_for(&self, subject: &Subject) -> Option<Cluster> {
        self.limits.get(subject).copied()
    }

    /// Starting tier for an adaptive session: `N(subject) / 2`, never below
    /// [`MIN_CLUSTER`].
    #[must_use]
    pub fn midpoint(&self, subject: &Subject) -> Option<Cluster> {
        self.max_for(subject)
            .map(|max| Cluster::new((max.value() / 2).max(MIN_CLUSTER.value())))
    }

    /// Subjects with a configured ceiling.
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.limits.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_configured_subjects() {
        let limits = ClusterLimits::defaults();
        assert_eq!(
            limits.max_for(&Subject::new("English")),
            Some(Cluster::new(7))
        );
        assert_eq!(
            limits.max_for(&Subject::new("Mathematics")),
            Some(Cluster::new(8))
        );
        assert_eq!(limits.max_for(&Subject::new("History")), None);
    }

    #[test]
    fn midpoint_is_half_the_ceiling() {
        let limits = ClusterLimits::defaults();
        assert_eq!(
            limits.midpoint(&Subject::new("Mathematics")),
            Some(Cluster::new(4))
        );
        assert_eq!(
            limits.midpoint(&Subject::new("English")),
            Some(Cluster::new(3))
        );
    }

    #[test]
    fn midpoint_never_drops_below_min_cluster() {
        let limits = ClusterLimits::new().with_limit(Subject::new("Tiny"), Cluster::new(1));
        assert_eq!(
            limits.midpoint(&Subject::new("Tiny")),
            Some(Cluster::new(1))
        );
    }
}
