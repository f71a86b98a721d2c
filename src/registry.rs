use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::models::PendingRequest;

/// Requests opened by the device and waiting for the human half of the flow.
///
/// Entries are never evicted.
#[derive(Debug, Default)]
pub struct RequestRegistry {
    entries: RwLock<HashMap<String, PendingRequest>>,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the entry, returning the one it replaced.
    pub fn register(
        &self,
        request_id: impl Into<String>,
        pending: PendingRequest,
    ) -> Option<PendingRequest> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(request_id.into(), pending)
    }

    pub fn lookup(&self, request_id: &str) -> Option<PendingRequest> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(request_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
