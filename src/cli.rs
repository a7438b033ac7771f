//! Command-line surface of the `bookshelf` binary.
//!
//! Every flag can also come from a `BOOKSHELF_*` environment variable.

use std::path::PathBuf;
use clap::Parser;
use crate::core::config::{Config, OutputMode};

/// Load a book catalog and answer title lookups with parallel workers.
#[derive(Debug, Parser)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Command file, one `OPERATION;<json>` per line.
    #[arg(long, env = "BOOKSHELF_BOOKS", default_value = "lab01_books.csv")]
    pub books: PathBuf,

    /// Query file, one `{"name": ...}` object per line.
    #[arg(long, env = "BOOKSHELF_QUERIES", default_value = "lab01_search.csv")]
    pub queries: PathBuf,

    /// Result file. Per-worker files insert the worker index before the extension.
    #[arg(long, env = "BOOKSHELF_OUTPUT", default_value = "output.txt")]
    pub output: PathBuf,

    /// Number of search workers; 0 means one per logical CPU.
    #[arg(long, env = "BOOKSHELF_WORKERS", default_value_t = 4)]
    pub workers: usize,

    /// Let every worker overwrite the same output file, one after another.
    #[arg(long, env = "BOOKSHELF_SHARED_OUTPUT")]
    pub shared_output: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            books_path: self.books.clone(),
            queries_path: self.queries.clone(),
            output_path: self.output.clone(),
            workers: self.workers,
            output_mode: if self.shared_output {
                OutputMode::Shared
            } else {
                OutputMode::PerWorker
            },
        }
    }
}
