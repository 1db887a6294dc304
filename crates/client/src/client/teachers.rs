//! Teacher operations.

use tangoagenda_core::agenda::{CreateTeacherRequest, Teacher, UpdateTeacherRequest};

use super::TangoAgendaClient;
use crate::error::Result;

impl TangoAgendaClient {
    /// List all teachers.
    pub async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let response = self
            .client
            .get(self.url("/api/admin/teachers"))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new teacher.
    pub async fn create_teacher(&self, req: &CreateTeacherRequest) -> Result<Teacher> {
        let response = self
            .client
            .post(self.url("/api/admin/teachers"))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get teacher by ID.
    pub async fn get_teacher(&self, id: &str) -> Result<Teacher> {
        let response = self
            .client
            .get(self.url(&format!("/api/admin/teachers/{}", id)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a teacher.
    pub async fn update_teacher(&self, id: &str, req: &UpdateTeacherRequest) -> Result<Teacher> {
        let response = self
            .client
            .put(self.url(&format!("/api/admin/teachers/{}", id)))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete teacher by ID.
    pub async fn delete_teacher(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/admin/teachers/{}", id)))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
