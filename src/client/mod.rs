//! Typed SmartSuite operations over the relay. This is the only place where non-2xx replies
//! become [`ApiError`] values.

pub mod transport;

pub use transport::{HttpTransport, Transport, TransportError, TransportResponse, DEFAULT_RELAY_URL};

use crate::error::ApiError;
use crate::model::{ListParams, Record, RecordFields, RecordList, Solution, Table};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
}

impl ResourceClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        ResourceClient { transport }
    }

    /// Client talking to a relay at `base_url`, e.g. `http://localhost:3001/api/smartsuite`.
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpTransport::new(base_url)))
    }

    pub async fn list_solutions(&self) -> Result<Vec<Solution>, ApiError> {
        self.request(Method::GET, "/solutions/", None).await
    }

    pub async fn list_tables(&self) -> Result<Vec<Table>, ApiError> {
        self.request(Method::GET, "/applications/", None).await
    }

    pub async fn get_table(&self, table_id: &str) -> Result<Table, ApiError> {
        self.request(Method::GET, &format!("/applications/{}/", table_id), None)
            .await
    }

    /// Absent params send `{}`.
    pub async fn list_records(
        &self,
        table_id: &str,
        params: Option<&ListParams>,
    ) -> Result<RecordList, ApiError> {
        let body = match params {
            Some(p) => serde_json::to_value(p).map_err(ApiError::network)?,
            None => Value::Object(Default::default()),
        };
        self.request(
            Method::POST,
            &format!("/applications/{}/records/list/", table_id),
            Some(body),
        )
        .await
    }

    pub async fn get_record(&self, table_id: &str, record_id: &str) -> Result<Record, ApiError> {
        self.request(Method::GET, &record_path(table_id, record_id), None)
            .await
    }

    pub async fn create_record(
        &self,
        table_id: &str,
        fields: &RecordFields,
    ) -> Result<Record, ApiError> {
        self.request(
            Method::POST,
            &format!("/applications/{}/records/", table_id),
            Some(Value::Object(fields.clone())),
        )
        .await
    }

    /// Partial update: slugs absent from `fields` are left untouched upstream.
    pub async fn update_record(
        &self,
        table_id: &str,
        record_id: &str,
        fields: &RecordFields,
    ) -> Result<Record, ApiError> {
        self.request(
            Method::PATCH,
            &record_path(table_id, record_id),
            Some(Value::Object(fields.clone())),
        )
        .await
    }

    pub async fn delete_record(&self, table_id: &str, record_id: &str) -> Result<(), ApiError> {
        let _: Value = self
            .request(Method::DELETE, &record_path(table_id, record_id), None)
            .await?;
        Ok(())
    }

    pub async fn bulk_create_records(
        &self,
        table_id: &str,
        items: &[RecordFields],
    ) -> Result<Vec<Record>, ApiError> {
        let items: Vec<Value> = items.iter().cloned().map(Value::Object).collect();
        self.request(
            Method::POST,
            &format!("/applications/{}/records/bulk/", table_id),
            Some(serde_json::json!({ "items": items })),
        )
        .await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        tracing::debug!(method = %method, endpoint = %endpoint, "smartsuite request");
        let response = self
            .transport
            .send(method, endpoint, body)
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %endpoint, error = %e, "smartsuite transport failure");
                ApiError::network(e)
            })?;
        tracing::debug!(status = response.status, endpoint = %endpoint, "smartsuite response");

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::warn!(status = err.status, message = %err.message, "smartsuite api error");
            return Err(err);
        }
        decode(&response.body)
    }
}

fn record_path(table_id: &str, record_id: &str) -> String {
    format!("/applications/{}/records/{}/", table_id, record_id)
}

/// An empty success body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let parsed = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    parsed.map_err(|e| {
        tracing::error!(error = %e, "undecodable smartsuite response");
        ApiError::network(e)
    })
}
