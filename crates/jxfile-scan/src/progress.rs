//! Locate progress reporting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Progress information while locating file objects.
#[derive(Debug, Clone, Default)]
pub struct LocateProgress {
    /// Number of regular files visited so far.
    pub files_seen: u64,
    /// Number of file objects created so far.
    pub objects_found: u64,
    /// Current path being visited.
    pub current_path: PathBuf,
    /// Number of warnings encountered.
    pub warnings_count: u64,
    /// Time elapsed since locating started.
    pub elapsed: Duration,
}

impl LocateProgress {
    /// Calculate the visit rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_seen as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Running counters that produce [`LocateProgress`] snapshots.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    files_seen: u64,
    objects_found: u64,
    warnings_count: u64,
}

impl ProgressTracker {
    /// Snapshot every this many files.
    pub const INTERVAL: u64 = 256;

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_seen: 0,
            objects_found: 0,
            warnings_count: 0,
        }
    }

    /// Record a visited file; returns `true` when a snapshot is due.
    pub fn record_file(&mut self) -> bool {
        self.files_seen += 1;
        self.files_seen % Self::INTERVAL == 0
    }

    pub fn record_object(&mut self) {
        self.objects_found += 1;
    }

    pub fn record_warning(&mut self) {
        self.warnings_count += 1;
    }

    pub fn snapshot(&self, current_path: PathBuf) -> LocateProgress {
        LocateProgress {
            files_seen: self.files_seen,
            objects_found: self.objects_found,
            current_path,
            warnings_count: self.warnings_count,
            elapsed: self.start_time.elapsed(),
        }
    }
}
