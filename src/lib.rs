pub mod core;
pub mod storage;
pub mod query;
pub mod search;
pub mod parallel;
pub mod cli;

pub use crate::core::catalog::CatalogService;
pub use crate::core::config::{Config, OutputMode};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::stats::{LoadReport, SearchReport, WorkerReport};
pub use crate::core::types::{BookRecord, Command, Query};
pub use crate::parallel::workers::SearchWorkers;
pub use crate::search::results::SearchResult;
pub use crate::storage::record_store::{InMemoryRecordStore, RecordStore};

/*
┌──────────────────────────────── BOOKSHELF ARCHITECTURE ────────────────────────────────┐
│                                                                                        │
│   books file ──lines──▶ LineParser::parse_command ──▶ CatalogService::load (&mut)      │
│                                                          │                             │
│                                                          ▼ put(isbn, record)           │
│                                       ┌───────────────────────────────────────┐        │
│                                       │ InMemoryRecordStore                   │        │
│                                       │   Mutex<HashMap<isbn, BookRecord>>    │        │
│                                       └───────────────────────────────────────┘        │
│                                                          ▲ find_by_name(name)          │
│                                                          │                             │
│   queries file ──Vec<String>──▶ SearchWorkers::run ──┬── worker 0 ─▶ output.0.txt      │
│                                                      ├── worker 1 ─▶ output.1.txt      │
│                                                      └── worker N ─▶ output.N.txt      │
│                                                                                        │
│   Each worker: CatalogService::search(all queries) ──▶ one JSON line per answer        │
└────────────────────────────────────────────────────────────────────────────────────────┘
*/
