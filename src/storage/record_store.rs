use std::collections::HashMap;
use parking_lot::Mutex;
use crate::core::types::BookRecord;

/// Keyed book storage shared between the loader and search workers.
///
/// Every call is atomic on its own; nothing is atomic across calls.
pub trait RecordStore: Send + Sync {
    /// Insert or replace the entry for `isbn`, returning the replaced record.
    fn put(&self, isbn: String, record: BookRecord) -> Option<BookRecord>;

    /// First record whose name equals `name` exactly, in the store's own iteration order.
    /// An empty `name` never matches.
    fn find_by_name(&self, name: &str) -> Option<BookRecord>;

    fn get(&self, isbn: &str) -> Option<BookRecord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// HashMap behind one coarse lock covering both writes and scans.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<String, BookRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        InMemoryRecordStore {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Copy of every record, in iteration order.
    pub fn snapshot(&self) -> Vec<BookRecord> {
        self.records.lock().values().cloned().collect()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn put(&self, isbn: String, record: BookRecord) -> Option<BookRecord> {
        self.records.lock().insert(isbn, record)
    }

    fn find_by_name(&self, name: &str) -> Option<BookRecord> {
        if name.is_empty() {
            return None;
        }
        let records = self.records.lock();
        records.values().find(|record| record.name == name).cloned()
    }

    fn get(&self, isbn: &str) -> Option<BookRecord> {
        self.records.lock().get(isbn).cloned()
    }

    fn len(&self) -> usize {
        self.records.lock().len()
    }
}
