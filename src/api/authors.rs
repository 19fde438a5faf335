//! Author endpoints (`/Autores`).

use crate::api::{ApiClient, ApiError};
use crate::model::{Author, AuthorDraft};

impl ApiClient {
    pub async fn list_authors(&self) -> Result<Vec<Author>, ApiError> {
        self.get_json("Autores").await
    }

    pub async fn get_author(&self, id: i64) -> Result<Author, ApiError> {
        self.get_json(&format!("Autores/{id}")).await
    }

    pub async fn create_author(&self, draft: &AuthorDraft) -> Result<Author, ApiError> {
        self.post_json("Autores", draft).await
    }

    pub async fn update_author(&self, id: i64, draft: &AuthorDraft) -> Result<Author, ApiError> {
        self.put_json(&format!("Autores/{id}"), draft).await
    }

    pub async fn delete_author(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("Autores/{id}")).await
    }
}
