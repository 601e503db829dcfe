use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{SessionSummary, StudentId, StudentProfile};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// One persisted quiz result, as read back from storage.
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub id: i64,
    pub student_id: StudentId,
    pub taken_at: DateTime<Utc>,
    pub summary: SessionSummary,
}

/// Repository contract for registered students.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Persist a newly registered student.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` when the id is already taken, or
    /// other storage errors.
    async fn insert_student(&self, student: &StudentProfile) -> Result<(), StorageError>;

    /// Fetch a student by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_student(&self, id: &StudentId) -> Result<StudentProfile, StorageError>;
}

/// The result-recorder boundary: an append-only sink of finished sessions.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Append a finished session's summary and return the new row id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the summary cannot be stored.
    async fn append_result(
        &self,
        student_id: &StudentId,
        summary: &SessionSummary,
        taken_at: DateTime<Utc>,
    ) -> Result<i64, StorageError>;

    /// Fetch a single persisted result by row id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_result(&self, id: i64) -> Result<ResultRow, StorageError>;

    /// A student's results, most recent first, capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn results_for_student(
        &self,
        student_id: &StudentId,
        limit: u32,
    ) -> Result<Vec<ResultRow>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    students: Arc<Mutex<HashMap<StudentId, StudentProfile>>>,
    results: Arc<Mutex<Vec<ResultRow>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryRepository {
    async fn insert_student(&self, student: &StudentProfile) -> Result<(), StorageError> {
        let mut guard = self
            .students
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(&student.id) {
            return Err(StorageError::Conflict);
        }
        guard.insert(student.id.clone(), student.clone());
        Ok(())
    }

    async fn get_student(&self, id: &StudentId) -> Result<StudentProfile, StorageError> {
        let guard = self
            .students
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(id).cloned().ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn append_result(
        &self,
        student_id: &StudentId,
        summary: &SessionSummary,
        taken_at: DateTime<Utc>,
    ) -> Result<i64, StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = guard.len() as i64 + 1;
        guard.push(ResultRow {
            id,
            student_id: student_id.clone(),
            taken_at,
            summary: summary.clone(),
        });
        Ok(id)
    }

    async fn get_result(&self, id: i64) -> Result<ResultRow, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn results_for_student(
        &self,
        student_id: &StudentId,
        limit: u32,
    ) -> Result<Vec<ResultRow>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<ResultRow> = guard
            .iter()
            .filter(|row| &row.student_id == student_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.taken_at.cmp(&a.taken_at).then(b.id.cmp(&a.id)));
        rows.truncate(limit as usize);
        Ok(rows)
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub students: Arc<dyn StudentRepository>,
    pub results: Arc<dyn ResultRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let students: Arc<dyn StudentRepository> = Arc::new(repo.clone());
        let results: Arc<dyn ResultRepository> = Arc::new(repo);
        Self { students, results }
    }
}
