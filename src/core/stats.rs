use std::path::PathBuf;
use serde::Serialize;

/// Outcome counters for one bulk load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub lines: usize,
    pub inserted: usize,
    pub overwritten: usize,   // subset of `inserted` that replaced an existing isbn
    pub malformed: usize,     // not UTF-8, not JSON, or not an object; blank lines included
    pub dropped: usize,       // INSERT with empty isbn or name
    pub ignored: usize,       // unrecognized operation tag
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.malformed + self.dropped + self.ignored
    }
}

/// Outcome counters for one search pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub queries: usize,
    pub found: usize,
    pub not_found: usize,
    pub malformed: usize,
    pub skipped: usize,       // empty or missing name
}

impl SearchReport {
    /// Number of lines written to the sink.
    pub fn emitted(&self) -> usize {
        self.found + self.not_found
    }
}

/// What one search worker did and where it wrote.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerReport {
    pub worker: usize,
    pub destination: PathBuf,
    pub report: SearchReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_report_skipped_sums_non_inserts() {
        let report = LoadReport {
            lines: 9,
            inserted: 3,
            overwritten: 1,
            malformed: 2,
            dropped: 1,
            ignored: 3,
        };
        assert_eq!(report.skipped(), 6);
        assert_eq!(report.inserted + report.skipped(), report.lines);
    }

    #[test]
    fn search_report_emitted_excludes_skips() {
        let report = SearchReport {
            queries: 5,
            found: 2,
            not_found: 1,
            malformed: 1,
            skipped: 1,
        };
        assert_eq!(report.emitted(), 3);
    }
}
