//! In-memory task store with a bounded capacity policy

use crate::StoreError;
use grantflow_domain::{TaskId, TaskRecord, TaskStatus, TaskStore};
use std::collections::HashMap;

/// Default maximum number of records held at once
pub const DEFAULT_CAPACITY: usize = 10_000;

/// In-memory `TaskStore` backed by a HashMap
///
/// Insertion order is tracked separately so listing is stable and the
/// capacity policy can evict oldest-first. Eviction only ever removes
/// records in a terminal state; when the store is full of live tasks a new
/// insert is refused rather than dropping in-flight work.
#[derive(Debug)]
pub struct MemoryTaskStore {
    records: HashMap<TaskId, TaskRecord>,
    order: Vec<TaskId>,
    capacity: usize,
}

impl MemoryTaskStore {
    /// Create a store with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a store holding at most `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Evict the oldest terminal record, if any
    fn evict_one_terminal(&mut self) -> bool {
        let victim = self
            .order
            .iter()
            .copied()
            .find(|id| {
                self.records
                    .get(id)
                    .map(|r| r.status.is_terminal())
                    .unwrap_or(true)
            });

        match victim {
            Some(id) => {
                self.records.remove(&id);
                self.order.retain(|o| *o != id);
                true
            }
            None => false,
        }
    }

    fn record_mut(&mut self, id: TaskId) -> Result<&mut TaskRecord, StoreError> {
        self.records.get_mut(&id).ok_or(StoreError::NotFound(id))
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for MemoryTaskStore {
    type Error = StoreError;

    fn create(&mut self, record: TaskRecord) -> Result<TaskId, StoreError> {
        let id = record.id;
        if self.records.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }

        if self.records.len() >= self.capacity && !self.evict_one_terminal() {
            return Err(StoreError::CapacityExhausted(self.records.len()));
        }

        self.records.insert(id, record);
        self.order.push(id);
        Ok(id)
    }

    fn get(&self, id: TaskId) -> Result<Option<TaskRecord>, StoreError> {
        Ok(self.records.get(&id).cloned())
    }

    fn advance(
        &mut self,
        id: TaskId,
        status: TaskStatus,
        message: &str,
    ) -> Result<(), StoreError> {
        self.record_mut(id)?
            .advance(status, message)
            .map_err(|(from, to)| StoreError::InvalidTransition { from, to })
    }

    fn complete(&mut self, id: TaskId, result: &str, message: &str) -> Result<(), StoreError> {
        self.record_mut(id)?
            .complete(result, message)
            .map_err(|(from, to)| StoreError::InvalidTransition { from, to })
    }

    fn fail(&mut self, id: TaskId, error: &str) -> Result<(), StoreError> {
        self.record_mut(id)?
            .fail(error)
            .map_err(|(from, to)| StoreError::InvalidTransition { from, to })
    }

    fn list(&self) -> Result<Vec<TaskRecord>, StoreError> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(name: &str) -> TaskRecord {
        TaskRecord::new(TaskId::new(), name)
    }

    #[test]
    fn test_create_and_get() {
        let mut store = MemoryTaskStore::new();
        let record = pending("a.pdf");
        let id = store.create(record.clone()).unwrap();

        let fetched = store.get(id).unwrap().unwrap();
        assert_eq!(fetched, record);
        assert!(store.get(TaskId::new()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_refused() {
        let mut store = MemoryTaskStore::new();
        let record = pending("a.pdf");
        store.create(record.clone()).unwrap();
        assert_eq!(
            store.create(record.clone()),
            Err(StoreError::DuplicateId(record.id))
        );
    }

    #[test]
    fn test_lifecycle_through_store() {
        let mut store = MemoryTaskStore::new();
        let id = store.create(pending("a.pdf")).unwrap();

        store
            .advance(id, TaskStatus::Processing, "Extracting text from PDF")
            .unwrap();
        store
            .complete(id, "reply", "Processing completed successfully")
            .unwrap();

        let record = store.get(id).unwrap().unwrap();
        assert_eq!(record.status, TaskStatus::Completed);
        assert_eq!(record.result.as_deref(), Some("reply"));
    }

    #[test]
    fn test_terminal_state_is_final() {
        let mut store = MemoryTaskStore::new();
        let id = store.create(pending("a.pdf")).unwrap();
        store.fail(id, "extraction failed").unwrap();

        let err = store
            .advance(id, TaskStatus::Processing, "retry")
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidTransition {
                from: TaskStatus::Error,
                to: TaskStatus::Processing,
            }
        );
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut store = MemoryTaskStore::new();
        let a = store.create(pending("a.pdf")).unwrap();
        let b = store.create(pending("b.pdf")).unwrap();
        let c = store.create(pending("c.pdf")).unwrap();

        let ids: Vec<TaskId> = store.list().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_capacity_evicts_oldest_terminal() {
        let mut store = MemoryTaskStore::with_capacity(2);
        let a = store.create(pending("a.pdf")).unwrap();
        let b = store.create(pending("b.pdf")).unwrap();
        store.fail(a, "boom").unwrap();

        // Full, but `a` is terminal and gets evicted for the newcomer.
        let c = store.create(pending("c.pdf")).unwrap();
        assert!(store.get(a).unwrap().is_none());
        assert!(store.get(b).unwrap().is_some());
        assert!(store.get(c).unwrap().is_some());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_capacity_refuses_when_all_live() {
        let mut store = MemoryTaskStore::with_capacity(2);
        store.create(pending("a.pdf")).unwrap();
        store.create(pending("b.pdf")).unwrap();

        assert_eq!(
            store.create(pending("c.pdf")),
            Err(StoreError::CapacityExhausted(2))
        );
    }

    #[test]
    fn test_unknown_id_operations() {
        let mut store = MemoryTaskStore::new();
        let id = TaskId::new();
        assert_eq!(
            store.advance(id, TaskStatus::Processing, "x"),
            Err(StoreError::NotFound(id))
        );
        assert_eq!(store.fail(id, "x"), Err(StoreError::NotFound(id)));
    }
}
