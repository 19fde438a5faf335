//! HTTP data client for the library API.
//!
//! One method per CRUD verb per entity, grouped in the entity submodules. Every
//! method builds the request from typed arguments, issues it, and decodes the
//! body on 2xx; any other outcome becomes a classified [`ApiError`]. There are
//! no retries and no timeouts beyond the transport's defaults; callers decide
//! what to tell the user.

pub mod authors;
pub mod copies;
pub mod error;
pub mod loans;
pub mod readers;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use error::ApiError;

/// Thin wrapper over a shared `reqwest::Client` and the base URL resolved at
/// startup. Cloning is cheap; every spawned request task gets its own handle.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, &self.base_url))?;
        self.decode(path, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, &self.base_url))?;
        self.decode(path, response).await
    }

    async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "PUT");
        let response = self
            .http
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, &self.base_url))?;
        self.decode(path, response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!(path, "DELETE");
        let response = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, &self.base_url))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            tracing::warn!(path, status = status.as_u16(), "DELETE rejected");
            Err(ApiError::Status {
                status: status.as_u16(),
            })
        }
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        response.json::<T>().await.map_err(ApiError::from_decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_from_the_base_url() {
        let client = ApiClient::new("http://localhost:5034/api/");
        assert_eq!(client.base_url(), "http://localhost:5034/api");
        assert_eq!(client.url("Autores"), "http://localhost:5034/api/Autores");
    }

    #[test]
    fn entity_paths_append_ids_as_segments() {
        let client = ApiClient::new("http://localhost:5034/api");
        assert_eq!(
            client.url(&format!("Prestamos/{}", 12)),
            "http://localhost:5034/api/Prestamos/12"
        );
    }
}
