//! Read queries: fetch on activation and key change, hold the latest snapshot, refetch on demand.

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::hooks::{read_lock, write_lock, HookState};
use crate::model::{ListParams, Record, Solution, Table};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

/// What a query fetches. A query whose key is `None` settles idle without calling the client.
#[async_trait]
pub trait QuerySource: Send + Sync {
    type Key: Clone + PartialEq + Send + Sync;
    type Output: Clone + Send + Sync;

    /// Whether a freshly created query reports `loading` before its first fetch.
    const STARTS_LOADING: bool = false;

    async fn fetch(&self, client: &ResourceClient, key: &Self::Key) -> Result<Self::Output, ApiError>;
}

pub struct Solutions;

#[async_trait]
impl QuerySource for Solutions {
    type Key = ();
    type Output = Vec<Solution>;
    const STARTS_LOADING: bool = true;

    async fn fetch(&self, client: &ResourceClient, _key: &()) -> Result<Vec<Solution>, ApiError> {
        client.list_solutions().await
    }
}

pub struct Tables;

#[async_trait]
impl QuerySource for Tables {
    type Key = ();
    type Output = Vec<Table>;
    const STARTS_LOADING: bool = true;

    async fn fetch(&self, client: &ResourceClient, _key: &()) -> Result<Vec<Table>, ApiError> {
        client.list_tables().await
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordsKey {
    pub table_id: String,
    pub params: Option<ListParams>,
}

pub struct Records;

#[async_trait]
impl QuerySource for Records {
    type Key = RecordsKey;
    type Output = Vec<Record>;

    async fn fetch(&self, client: &ResourceClient, key: &RecordsKey) -> Result<Vec<Record>, ApiError> {
        let list = client.list_records(&key.table_id, key.params.as_ref()).await?;
        Ok(list.items)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordKey {
    pub table_id: String,
    pub record_id: String,
}

pub struct SingleRecord;

#[async_trait]
impl QuerySource for SingleRecord {
    type Key = RecordKey;
    type Output = Record;

    async fn fetch(&self, client: &ResourceClient, key: &RecordKey) -> Result<Record, ApiError> {
        client.get_record(&key.table_id, &key.record_id).await
    }
}

/// State cell bound to one [`QuerySource`]. Every fetch gets a generation number; a result is
/// only stored if no newer fetch started meanwhile and the query was not disposed.
pub struct Query<S: QuerySource> {
    client: ResourceClient,
    source: S,
    key: RwLock<Option<S::Key>>,
    state: RwLock<HookState<S::Output>>,
    generation: AtomicU64,
    active: AtomicBool,
    disposed: AtomicBool,
}

impl<S: QuerySource> Query<S> {
    pub fn new(client: ResourceClient, source: S, key: Option<S::Key>) -> Self {
        let state = if S::STARTS_LOADING && key.is_some() {
            HookState::loading()
        } else {
            HookState::idle()
        };
        Query {
            client,
            source,
            key: RwLock::new(key),
            state: RwLock::new(state),
            generation: AtomicU64::new(0),
            active: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
        }
    }

    /// First activation: fetch with the current key.
    pub async fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
        self.refetch().await;
    }

    /// Replace the key. Refetches only when the key changed and the query is active.
    pub async fn set_key(&self, key: Option<S::Key>) {
        {
            let mut current = write_lock(&self.key);
            if *current == key {
                return;
            }
            *current = key;
        }
        if self.active.load(Ordering::SeqCst) {
            self.refetch().await;
        }
    }

    pub fn key(&self) -> Option<S::Key> {
        read_lock(&self.key).clone()
    }

    /// Re-run the fetch with the current key. The snapshot is replaced wholesale.
    pub async fn refetch(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let Some(key) = self.key() else {
            self.commit(generation, HookState::idle());
            return;
        };
        self.commit(generation, HookState::loading());
        let next = match self.source.fetch(&self.client, &key).await {
            Ok(data) => HookState::settled(data),
            Err(error) => HookState::failed(error),
        };
        self.commit(generation, next);
    }

    /// Stop accepting results; in-flight fetches still complete but are discarded.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn state(&self) -> HookState<S::Output> {
        read_lock(&self.state).clone()
    }

    pub fn data(&self) -> Option<S::Output> {
        read_lock(&self.state).data.clone()
    }

    pub fn is_loading(&self) -> bool {
        read_lock(&self.state).loading
    }

    pub fn error(&self) -> Option<ApiError> {
        read_lock(&self.state).error.clone()
    }

    fn commit(&self, generation: u64, next: HookState<S::Output>) -> bool {
        let mut state = write_lock(&self.state);
        if self.disposed.load(Ordering::SeqCst) {
            tracing::debug!(generation, "query disposed, result dropped");
            return false;
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "stale query result dropped");
            return false;
        }
        *state = next;
        true
    }
}

pub fn solutions(client: &ResourceClient) -> Query<Solutions> {
    Query::new(client.clone(), Solutions, Some(()))
}

pub fn tables(client: &ResourceClient) -> Query<Tables> {
    Query::new(client.clone(), Tables, Some(()))
}

/// Records of a table; without a table id the query stays idle.
pub fn records(client: &ResourceClient, table_id: Option<&str>, params: Option<ListParams>) -> Query<Records> {
    Query::new(client.clone(), Records, records_key(table_id, params))
}

/// One record; idle unless both ids are present.
pub fn record(client: &ResourceClient, table_id: Option<&str>, record_id: Option<&str>) -> Query<SingleRecord> {
    Query::new(client.clone(), SingleRecord, record_key(table_id, record_id))
}

pub fn records_key(table_id: Option<&str>, params: Option<ListParams>) -> Option<RecordsKey> {
    table_id.filter(|t| !t.is_empty()).map(|t| RecordsKey {
        table_id: t.to_string(),
        params,
    })
}

pub fn record_key(table_id: Option<&str>, record_id: Option<&str>) -> Option<RecordKey> {
    match (table_id, record_id) {
        (Some(t), Some(r)) if !t.is_empty() && !r.is_empty() => Some(RecordKey {
            table_id: t.to_string(),
            record_id: r.to_string(),
        }),
        _ => None,
    }
}
