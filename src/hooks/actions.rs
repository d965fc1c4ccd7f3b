//! Record mutations with shared `{loading, error}` state. Failures are stored and returned;
//! read queries are never refreshed from here.

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::hooks::{read_lock, write_lock};
use crate::model::{Record, RecordFields};
use std::future::Future;
use std::sync::RwLock;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionState {
    pub loading: bool,
    pub error: Option<ApiError>,
}

pub struct RecordActions {
    client: ResourceClient,
    state: RwLock<ActionState>,
}

impl RecordActions {
    pub fn new(client: &ResourceClient) -> Self {
        RecordActions {
            client: client.clone(),
            state: RwLock::new(ActionState::default()),
        }
    }

    pub fn state(&self) -> ActionState {
        read_lock(&self.state).clone()
    }

    pub fn is_loading(&self) -> bool {
        read_lock(&self.state).loading
    }

    pub fn error(&self) -> Option<ApiError> {
        read_lock(&self.state).error.clone()
    }

    pub async fn create_record(&self, table_id: &str, fields: &RecordFields) -> Result<Record, ApiError> {
        self.run(self.client.create_record(table_id, fields)).await
    }

    pub async fn update_record(
        &self,
        table_id: &str,
        record_id: &str,
        fields: &RecordFields,
    ) -> Result<Record, ApiError> {
        self.run(self.client.update_record(table_id, record_id, fields))
            .await
    }

    pub async fn delete_record(&self, table_id: &str, record_id: &str) -> Result<(), ApiError> {
        self.run(self.client.delete_record(table_id, record_id)).await
    }

    async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        *write_lock(&self.state) = ActionState {
            loading: true,
            error: None,
        };
        let result = op.await;
        let mut state = write_lock(&self.state);
        state.loading = false;
        if let Err(e) = &result {
            state.error = Some(e.clone());
        }
        result
    }
}
