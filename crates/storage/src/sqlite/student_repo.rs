use quiz_core::model::{StudentId, StudentProfile};

use super::{SqliteRepository, mapping::map_student_row};
use crate::repository::{StorageError, StudentRepository};

fn map_write_err(e: sqlx::Error) -> StorageError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return StorageError::Conflict;
        }
    }
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl StudentRepository for SqliteRepository {
    async fn insert_student(&self, student: &StudentProfile) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO students (student_id, name, area, created_at)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(student.id.as_str())
        .bind(student.name.as_deref())
        .bind(student.area.as_str())
        .bind(student.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;

        Ok(())
    }

    async fn get_student(&self, id: &StudentId) -> Result<StudentProfile, StorageError> {
        let row = sqlx::query(
            r"
                SELECT student_id, name, area, created_at
                FROM students
                WHERE student_id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .ok_or(StorageError::NotFound)?;

        map_student_row(&row)
    }
}
