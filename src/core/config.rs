use std::path::{Path, PathBuf};
use crate::core::error::{Error, ErrorKind, Result};

/// How search workers share the configured output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Each worker writes `<stem>.<worker>.<ext>`.
    #[default]
    PerWorker,
    /// Every worker writes the configured path, one at a time.
    Shared,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub books_path: PathBuf,
    pub queries_path: PathBuf,
    pub output_path: PathBuf,

    pub workers: usize,             // 0 = one per logical CPU
    pub output_mode: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            books_path: PathBuf::from("lab01_books.csv"),
            queries_path: PathBuf::from("lab01_search.csv"),
            output_path: PathBuf::from("output.txt"),
            workers: 4,
            output_mode: OutputMode::PerWorker,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        for (label, path) in [
            ("books path", &self.books_path),
            ("queries path", &self.queries_path),
            ("output path", &self.output_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(Error::new(
                    ErrorKind::InvalidArgument,
                    format!("{} must not be empty", label),
                ));
            }
        }
        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }

    /// Output file for `worker`. A single worker, or shared mode, keeps the configured path.
    pub fn destination_for(&self, worker: usize) -> PathBuf {
        if self.output_mode == OutputMode::Shared || self.worker_count() == 1 {
            return self.output_path.clone();
        }
        indexed_path(&self.output_path, worker)
    }
}

fn indexed_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{}.{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}.{}", stem, index),
    };
    path.with_file_name(file_name)
}
