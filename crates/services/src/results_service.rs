use std::sync::Arc;

use quiz_core::model::StudentId;
use storage::repository::{ResultRepository, ResultRow};

use crate::error::ResultsError;

/// Read side of the recorder boundary: a student's past results.
#[derive(Clone)]
pub struct ResultsService {
    results: Arc<dyn ResultRepository>,
}

impl ResultsService {
    #[must_use]
    pub fn new(results: Arc<dyn ResultRepository>) -> Self {
        Self { results }
    }

    /// A student's persisted results, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ResultsError` on read failures.
    pub async fn history(
        &self,
        student_id: &StudentId,
        limit: u32,
    ) -> Result<Vec<ResultRow>, ResultsError> {
        Ok(self.results.results_for_student(student_id, limit).await?)
    }
}
