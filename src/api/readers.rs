//! Reader endpoints (`/Lectores`).

use crate::api::{ApiClient, ApiError};
use crate::model::{Reader, ReaderDraft};

impl ApiClient {
    pub async fn list_readers(&self) -> Result<Vec<Reader>, ApiError> {
        self.get_json("Lectores").await
    }

    pub async fn get_reader(&self, id: i64) -> Result<Reader, ApiError> {
        self.get_json(&format!("Lectores/{id}")).await
    }

    pub async fn create_reader(&self, draft: &ReaderDraft) -> Result<Reader, ApiError> {
        self.post_json("Lectores", draft).await
    }

    pub async fn update_reader(&self, id: i64, draft: &ReaderDraft) -> Result<Reader, ApiError> {
        self.put_json(&format!("Lectores/{id}"), draft).await
    }

    pub async fn delete_reader(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("Lectores/{id}")).await
    }
}
