use chrono::{DateTime, Utc};
use quiz_core::model::{SessionSummary, StudentId};

use super::{
    SqliteRepository,
    mapping::{map_result_row, weak_clusters_to_json},
};
use crate::repository::{ResultRepository, ResultRow, StorageError};

#[async_trait::async_trait]
impl ResultRepository for SqliteRepository {
    async fn append_result(
        &self,
        student_id: &StudentId,
        summary: &SessionSummary,
        taken_at: DateTime<Utc>,
    ) -> Result<i64, StorageError> {
        let weak = weak_clusters_to_json(summary.weak_clusters())?;

        let res = sqlx::query(
            r"
                INSERT INTO results (
                    student_id, subject, score, total_questions,
                    progress, weak_clusters, taken_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(student_id.as_str())
        .bind(summary.subject().as_str())
        .bind(i64::from(summary.score()))
        .bind(i64::from(summary.total_questions()))
        .bind(summary.progress())
        .bind(weak)
        .bind(taken_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(res.last_insert_rowid())
    }

    async fn get_result(&self, id: i64) -> Result<ResultRow, StorageError> {
        let row = sqlx::query(
            r"
                SELECT
                    id, student_id, subject, score, total_questions,
                    progress, weak_clusters, taken_at
                FROM results
                WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .ok_or(StorageError::NotFound)?;

        map_result_row(&row)
    }

    async fn results_for_student(
        &self,
        student_id: &StudentId,
        limit: u32,
    ) -> Result<Vec<ResultRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    id, student_id, subject, score, total_questions,
                    progress, weak_clusters, taken_at
                FROM results
                WHERE student_id = ?1
                ORDER BY taken_at DESC, id DESC
                LIMIT ?2
            ",
        )
        .bind(student_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_result_row(&row)?);
        }

        Ok(out)
    }
}
