//! Copy endpoints (`/Ejemplares`).

use crate::api::{ApiClient, ApiError};
use crate::model::{BookCopy, CopyDraft};

impl ApiClient {
    pub async fn list_copies(&self) -> Result<Vec<BookCopy>, ApiError> {
        self.get_json("Ejemplares").await
    }

    pub async fn get_copy(&self, id: i64) -> Result<BookCopy, ApiError> {
        self.get_json(&format!("Ejemplares/{id}")).await
    }

    pub async fn create_copy(&self, draft: &CopyDraft) -> Result<BookCopy, ApiError> {
        self.post_json("Ejemplares", draft).await
    }

    pub async fn update_copy(&self, id: i64, draft: &CopyDraft) -> Result<BookCopy, ApiError> {
        self.put_json(&format!("Ejemplares/{id}"), draft).await
    }

    pub async fn delete_copy(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("Ejemplares/{id}")).await
    }
}
