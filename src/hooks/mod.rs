//! Refetchable state containers over the resource client.

pub mod actions;
pub mod query;

pub use actions::{ActionState, RecordActions};
pub use query::{
    record, record_key, records, records_key, solutions, tables, Query, QuerySource, RecordKey, Records,
    RecordsKey, SingleRecord, Solutions, Tables,
};

use crate::error::ApiError;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Snapshot of one read query. While a fetch is in flight `loading` is set and both `data`
/// and `error` are cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct HookState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> HookState<T> {
    pub fn idle() -> Self {
        HookState {
            data: None,
            loading: false,
            error: None,
        }
    }

    pub fn loading() -> Self {
        HookState {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn settled(data: T) -> Self {
        HookState {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    pub fn failed(error: ApiError) -> Self {
        HookState {
            data: None,
            loading: false,
            error: Some(error),
        }
    }
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

// State cells hold plain values, so a poisoned lock still holds a usable snapshot.
pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
