use std::path::PathBuf;
use parking_lot::Mutex;
use tracing::{debug, info};
use crate::core::catalog::CatalogService;
use crate::core::config::{Config, OutputMode};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::WorkerReport;
use crate::storage::record_store::RecordStore;
use crate::storage::source;

/// Replicated search: every worker answers the full query list against the same
/// catalog and writes its own complete result file.
///
/// Thread count, destinations and output mode all come from one owned `Config`,
/// so they cannot disagree.
pub struct SearchWorkers<'a, S: RecordStore> {
    catalog: &'a CatalogService<S>,
    config: Config,
}

impl<'a, S: RecordStore> SearchWorkers<'a, S> {
    pub fn new(catalog: &'a CatalogService<S>, config: &Config) -> Self {
        SearchWorkers {
            catalog,
            config: config.clone(),
        }
    }

    /// `0` means one worker per CPU.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.config.output_mode = mode;
        self
    }

    pub fn workers(&self) -> usize {
        self.config.worker_count()
    }

    pub fn output_mode(&self) -> OutputMode {
        self.config.output_mode
    }

    /// Run all workers to completion. Reports come back in worker order.
    pub fn run<L>(&self, queries: &[L]) -> Result<Vec<WorkerReport>>
    where
        L: AsRef<[u8]> + Sync,
    {
        // Held for a worker's whole pass in shared mode, so files are replaced, never interleaved.
        let destination_lock = Mutex::new(());

        let catalog = self.catalog;
        let mode = self.output_mode();
        let workers = self.workers();
        let lock = &destination_lock;

        info!(workers, queries = queries.len(), "starting search workers");

        let reports = crossbeam::scope(|scope| -> Result<Vec<WorkerReport>> {
            let mut handles = Vec::with_capacity(workers);
            for worker in 0..workers {
                let destination = self.config.destination_for(worker);
                let handle = scope
                    .builder()
                    .name(format!("search-worker-{}", worker))
                    .spawn(move |_| run_worker(catalog, queries, worker, destination, mode, lock))?;
                handles.push(handle);
            }

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|_| Err(worker_panicked())))
                .collect()
        })
        .map_err(|_| worker_panicked())??;

        info!(workers = reports.len(), "search workers finished");
        Ok(reports)
    }
}

fn run_worker<S: RecordStore, L: AsRef<[u8]>>(
    catalog: &CatalogService<S>,
    queries: &[L],
    worker: usize,
    destination: PathBuf,
    mode: OutputMode,
    lock: &Mutex<()>,
) -> Result<WorkerReport> {
    let _guard = match mode {
        OutputMode::Shared => Some(lock.lock()),
        OutputMode::PerWorker => None,
    };

    let mut sink = source::create_sink(&destination)?;
    let report = catalog.search(queries, &mut sink)?;
    debug!(
        worker,
        destination = %destination.display(),
        found = report.found,
        not_found = report.not_found,
        "worker done"
    );

    Ok(WorkerReport {
        worker,
        destination,
        report,
    })
}

fn worker_panicked() -> Error {
    Error::new(ErrorKind::Internal, "search worker panicked".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn catalog() -> CatalogService {
        let mut catalog = CatalogService::new();
        catalog.load_lines([
            r#"INSERT;{"isbn":"1","name":"A","quantity":1}"#,
            r#"INSERT;{"isbn":"2","name":"B","quantity":2}"#,
        ]);
        catalog
    }

    fn queries() -> Vec<String> {
        [r#"{"name":"A"}"#, r#"{"name":"Z"}"#, r#"{"name":"B"}"#]
            .iter()
            .map(|q| q.to_string())
            .collect()
    }

    #[test]
    fn every_worker_writes_the_full_result_set() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_path: dir.path().join("output.txt"),
            workers: 4,
            ..Config::default()
        };
        let catalog = catalog();

        let reports = SearchWorkers::new(&catalog, &config).run(&queries()).unwrap();

        assert_eq!(reports.len(), 4);
        let destinations: HashSet<_> = reports.iter().map(|r| r.destination.clone()).collect();
        assert_eq!(destinations.len(), 4);

        let expected = std::fs::read_to_string(&reports[0].destination).unwrap();
        assert_eq!(expected.lines().count(), 3);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.worker, i);
            assert_eq!(report.report.found, 2);
            assert_eq!(report.report.not_found, 1);
            assert_eq!(std::fs::read_to_string(&report.destination).unwrap(), expected);
        }
    }

    #[test]
    fn shared_destination_is_never_interleaved() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_path: dir.path().join("shared.txt"),
            workers: 3,
            output_mode: OutputMode::Shared,
            ..Config::default()
        };
        let catalog = catalog();

        let reports = SearchWorkers::new(&catalog, &config).run(&queries()).unwrap();
        assert!(reports.iter().all(|r| r.destination == config.output_path));

        let mut single = Vec::new();
        catalog.search(&queries(), &mut single).unwrap();
        assert_eq!(
            std::fs::read_to_string(&config.output_path).unwrap(),
            String::from_utf8(single).unwrap()
        );
    }

    #[test]
    fn worker_override_drives_threads_and_destinations() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_path: dir.path().join("output.txt"),
            workers: 1,
            ..Config::default()
        };
        let catalog = catalog();

        let pool = SearchWorkers::new(&catalog, &config).with_workers(4);
        assert_eq!(pool.workers(), 4);
        let reports = pool.run(&queries()).unwrap();

        assert_eq!(reports.len(), 4);
        let destinations: HashSet<_> = reports.iter().map(|r| r.destination.clone()).collect();
        assert_eq!(destinations.len(), 4);
        assert!(!destinations.contains(&config.output_path));
        for report in &reports {
            let written = std::fs::read_to_string(&report.destination).unwrap();
            assert_eq!(written.lines().count(), 3);
        }
    }

    #[test]
    fn output_mode_override_shares_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_path: dir.path().join("output.txt"),
            workers: 3,
            ..Config::default()
        };
        let catalog = catalog();

        let reports = SearchWorkers::new(&catalog, &config)
            .with_output_mode(OutputMode::Shared)
            .run(&queries())
            .unwrap();

        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r.destination == config.output_path));
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_path: dir.path().join("missing").join("output.txt"),
            workers: 2,
            ..Config::default()
        };
        let catalog = catalog();

        let err = SearchWorkers::new(&catalog, &config).run(&queries()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }
}
