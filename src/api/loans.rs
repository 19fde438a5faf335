//! Loan endpoints (`/Prestamos`).

use crate::api::{ApiClient, ApiError};
use crate::model::{Loan, LoanDraft};

impl ApiClient {
    pub async fn list_loans(&self) -> Result<Vec<Loan>, ApiError> {
        self.get_json("Prestamos").await
    }

    pub async fn get_loan(&self, id: i64) -> Result<Loan, ApiError> {
        self.get_json(&format!("Prestamos/{id}")).await
    }

    pub async fn create_loan(&self, draft: &LoanDraft) -> Result<Loan, ApiError> {
        self.post_json("Prestamos", draft).await
    }

    pub async fn update_loan(&self, id: i64, draft: &LoanDraft) -> Result<Loan, ApiError> {
        self.put_json(&format!("Prestamos/{id}"), draft).await
    }

    pub async fn delete_loan(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("Prestamos/{id}")).await
    }
}
