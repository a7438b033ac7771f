use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::core::error::Result;
use crate::core::stats::{LoadReport, SearchReport};
use crate::core::types::Command;
use crate::query::parser::{self, LineParser};
use crate::search::results::SearchResult;
use crate::storage::record_store::{InMemoryRecordStore, RecordStore};
use crate::storage::source;

/// Book catalog: a bulk loader and a name lookup over an injected record store.
///
/// Loading takes `&mut self`, searching takes `&self`, so a service shared across
/// search workers cannot be loaded at the same time. The store itself stays
/// consistent even when written through another handle.
pub struct CatalogService<S: RecordStore = InMemoryRecordStore> {
    store: Arc<S>,
    parser: LineParser,
}

impl CatalogService<InMemoryRecordStore> {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryRecordStore::new()))
    }
}

impl Default for CatalogService<InMemoryRecordStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RecordStore> CatalogService<S> {
    pub fn with_store(store: Arc<S>) -> Self {
        CatalogService {
            store,
            parser: LineParser::new(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Apply every command line from `reader`. Bad lines, including ones that
    /// are not UTF-8, are logged and skipped; only a failure to read the source
    /// itself is returned.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        for line in source::byte_lines(reader) {
            self.apply_command(&line?, &mut report);
        }
        log_load(&report);
        Ok(report)
    }

    pub fn load_lines<I, L>(&mut self, lines: I) -> LoadReport
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut report = LoadReport::default();
        for line in lines {
            self.apply_command(line.as_ref(), &mut report);
        }
        log_load(&report);
        report
    }

    pub fn load_file(&mut self, path: &Path) -> Result<LoadReport> {
        info!(path = %path.display(), "loading commands");
        self.load(source::open_lines(path)?)
    }

    fn apply_command(&self, line: &[u8], report: &mut LoadReport) {
        report.lines += 1;
        let line_no = report.lines;

        let command = parser::decode_line(line).and_then(|line| self.parser.parse_command(line));
        match command {
            Ok(Command::Insert(record)) => {
                if !record.is_storable() {
                    debug!(line = line_no, "dropping insert without isbn or name");
                    report.dropped += 1;
                    return;
                }
                let isbn = record.isbn.clone();
                if self.store.put(isbn, record).is_some() {
                    report.overwritten += 1;
                }
                report.inserted += 1;
            }
            Ok(Command::Ignored(operation)) => {
                debug!(line = line_no, operation = %operation, "ignoring unknown operation");
                report.ignored += 1;
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed command");
                report.malformed += 1;
            }
        }
    }

    /// Answer each query in order, one JSON line per answered query.
    /// Malformed queries and queries without a name produce no line.
    pub fn search<I, L, W>(&self, queries: I, sink: &mut W) -> Result<SearchReport>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
        W: Write,
    {
        let mut report = SearchReport::default();

        for line in queries {
            report.queries += 1;
            let parsed = parser::decode_line(line.as_ref())
                .and_then(|line| self.parser.parse_query(line));
            let query = match parsed {
                Ok(query) => query,
                Err(e) => {
                    warn!(query = report.queries, error = %e, "skipping malformed query");
                    report.malformed += 1;
                    continue;
                }
            };
            if query.is_empty() {
                report.skipped += 1;
                continue;
            }

            let result = SearchResult::from(self.store.find_by_name(&query.name));
            if result.is_found() {
                report.found += 1;
            } else {
                report.not_found += 1;
            }
            serde_json::to_writer(&mut *sink, &result)?;
            sink.write_all(b"\n")?;
        }

        sink.flush()?;
        Ok(report)
    }
}

fn log_load(report: &LoadReport) {
    info!(
        inserted = report.inserted,
        overwritten = report.overwritten,
        skipped = report.skipped(),
        malformed = report.malformed,
        dropped = report.dropped,
        ignored = report.ignored,
        "load complete"
    );
}
