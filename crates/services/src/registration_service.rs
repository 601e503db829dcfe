use std::sync::Arc;
use tracing::info;

use quiz_core::Clock;
use quiz_core::model::{Area, StudentId, StudentProfile};
use storage::repository::StudentRepository;

use crate::error::RegistrationError;

/// Creates student profiles and hands out their public ids.
#[derive(Clone)]
pub struct RegistrationService {
    clock: Clock,
    students: Arc<dyn StudentRepository>,
}

impl RegistrationService {
    #[must_use]
    pub fn new(clock: Clock, students: Arc<dyn StudentRepository>) -> Self {
        Self { clock, students }
    }

    /// Register a new student and persist the profile.
    ///
    /// The name is optional; whitespace-only names are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError` when the profile cannot be stored.
    pub async fn register(
        &self,
        name: Option<&str>,
        area: Area,
    ) -> Result<StudentProfile, RegistrationError> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let profile = StudentProfile {
            id: StudentId::generate(),
            name,
            area,
            created_at: self.clock.now(),
        };
        self.students.insert_student(&profile).await?;
        info!(student = %profile.id, "student registered");
        Ok(profile)
    }

    /// Fetch a previously registered student.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError` when the student is missing or the read
    /// fails.
    pub async fn lookup(&self, id: &StudentId) -> Result<StudentProfile, RegistrationError> {
        Ok(self.students.get_student(id).await?)
    }
}
