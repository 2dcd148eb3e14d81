// staff-client/src/client/http.rs
// HTTP client - network transport for the staff API

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiResponse;

/// HTTP client trait
///
/// Every call returns the decoded envelope; deciding what `success: false`
/// means is left to the caller.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, url: &str) -> ClientResult<ApiResponse<T>>;
    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        url: &str,
        query: &Q,
    ) -> ClientResult<ApiResponse<T>>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>>;
    async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: &str,
        form: Form,
    ) -> ClientResult<ApiResponse<T>>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>>;
    async fn delete<T: DeserializeOwned>(&self, url: &str) -> ClientResult<ApiResponse<T>>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let status = response.status();
        let url = response.url().to_string();
        let text = response.text().await?;
        tracing::debug!(%url, status = status.as_u16(), "API response received");

        // The server also reports most failures as an envelope with an error status
        let envelope = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text);
        if let Ok(envelope) = &envelope
            && !envelope.success
        {
            return Ok(ApiResponse::failure(envelope.message.clone()));
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let invalid = |e: serde_json::Error| {
            tracing::warn!(%url, error = %e, "Response is not a valid envelope");
            ClientError::InvalidResponse(e.to_string())
        };
        let envelope = envelope.map_err(invalid)?;
        // `result` is only decoded once the server reported success
        let result = envelope
            .result
            .map(serde_json::from_value)
            .transpose()
            .map_err(invalid)?;
        Ok(ApiResponse {
            success: envelope.success,
            message: envelope.message,
            result,
        })
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, url: &str) -> ClientResult<ApiResponse<T>> {
        tracing::debug!(method = "GET", %url, "API request");
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        url: &str,
        query: &Q,
    ) -> ClientResult<ApiResponse<T>> {
        tracing::debug!(method = "GET", %url, "API request with query");
        let response = self.client.get(url).query(query).send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        tracing::debug!(method = "POST", %url, "API request");
        let response = self.client.post(url).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: &str,
        form: Form,
    ) -> ClientResult<ApiResponse<T>> {
        tracing::debug!(method = "POST", %url, "API multipart request");
        let response = self.client.post(url).multipart(form).send().await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        tracing::debug!(method = "PUT", %url, "API request");
        let response = self.client.put(url).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, url: &str) -> ClientResult<ApiResponse<T>> {
        tracing::debug!(method = "DELETE", %url, "API request");
        let response = self.client.delete(url).send().await?;
        self.handle_response(response).await
    }
}
