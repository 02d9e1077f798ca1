//! Operation counters, timing, and CSV reporting
//!
//! [`PerformanceTracker`] is an inert accumulator: heaps report comparisons,
//! swaps, element accesses, and buffer growth events into it, and a benchmark
//! driver brackets phases with [`PerformanceTracker::start_timing`] /
//! [`PerformanceTracker::stop_timing`] and captures named
//! [`MetricSnapshot`]s for later export.
//!
//! All counters use interior mutability so a single tracker behind an `Rc`
//! can be shared by several heaps. The tracker is not synchronized; parallel
//! benchmarking needs one tracker per thread.
//!
//! # Example
//!
//! ```rust
//! use instrumented_maxheap::PerformanceTracker;
//!
//! let tracker = PerformanceTracker::new();
//! tracker.start_timing();
//! tracker.add_comparisons(12);
//! tracker.add_swaps(4);
//! tracker.stop_timing();
//! tracker.record_snapshot(1000, "build-heap-random");
//!
//! tracker.reset();
//! assert_eq!(tracker.comparisons(), 0);
//! // Snapshots survive a reset.
//! assert_eq!(tracker.snapshots().len(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Directory that [`PerformanceTracker::export_csv`] writes into
pub const REPORTS_DIR: &str = "docs/performance-plots";

/// Error type for CSV export
#[derive(Debug)]
pub enum ExportError {
    /// The filename is empty or contains path separators or NUL characters
    InvalidFilename(String),
    /// The destination could not be created or written
    Io(io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::InvalidFilename(name) => {
                write!(
                    f,
                    "invalid export filename {:?}: must be non-empty and free of path separators",
                    name
                )
            }
            ExportError::Io(err) => write!(f, "failed to write report: {}", err),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::InvalidFilename(_) => None,
            ExportError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        ExportError::Io(err)
    }
}

/// Immutable record of the counters at a point in time
///
/// Snapshots persist across [`PerformanceTracker::reset`], so one tracker can
/// accumulate a whole benchmark matrix before exporting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    /// Size of the input the counters describe
    pub input_size: usize,
    /// Comparison count at capture time
    pub comparisons: u64,
    /// Swap count at capture time
    pub swaps: u64,
    /// Element-access count at capture time
    pub array_accesses: u64,
    /// Elapsed time between the start/stop marks, zero if timing was unset
    pub execution_time: Duration,
    /// Caller-supplied label, e.g. operation name plus input distribution
    pub label: String,
}

impl MetricSnapshot {
    /// Elapsed time in milliseconds, the unit used by the CSV report
    pub fn execution_time_millis(&self) -> f64 {
        self.execution_time.as_secs_f64() * 1_000.0
    }
}

/// Accumulator for comparisons, swaps, element accesses, and growth events
///
/// See the [module docs](self) for usage. Counters only ever increase until
/// [`reset`](Self::reset) is called.
#[derive(Debug, Default)]
pub struct PerformanceTracker {
    comparisons: Cell<u64>,
    swaps: Cell<u64>,
    array_accesses: Cell<u64>,
    memory_allocations: Cell<u64>,
    started: Cell<Option<Instant>>,
    stopped: Cell<Option<Instant>>,
    snapshots: RefCell<Vec<MetricSnapshot>>,
}

impl PerformanceTracker {
    /// Creates a tracker with all counters at zero and no snapshots
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes all counters and clears the timing marks
    ///
    /// Recorded snapshots are kept.
    pub fn reset(&self) {
        self.comparisons.set(0);
        self.swaps.set(0);
        self.array_accesses.set(0);
        self.memory_allocations.set(0);
        self.started.set(None);
        self.stopped.set(None);
    }

    /// Marks the start of a timed phase
    pub fn start_timing(&self) {
        self.started.set(Some(Instant::now()));
    }

    /// Marks the end of a timed phase
    ///
    /// Ordering is the caller's responsibility; [`elapsed`](Self::elapsed)
    /// guards against a missing or out-of-order stop mark.
    pub fn stop_timing(&self) {
        self.stopped.set(Some(Instant::now()));
    }

    /// Adds `count` comparisons
    pub fn add_comparisons(&self, count: u64) {
        self.comparisons
            .set(self.comparisons.get().saturating_add(count));
    }

    /// Adds `count` swaps
    pub fn add_swaps(&self, count: u64) {
        self.swaps.set(self.swaps.get().saturating_add(count));
    }

    /// Adds `count` element accesses
    pub fn add_array_accesses(&self, count: u64) {
        self.array_accesses
            .set(self.array_accesses.get().saturating_add(count));
    }

    /// Records one buffer-growth event
    pub fn add_memory_allocation(&self) {
        self.memory_allocations
            .set(self.memory_allocations.get().saturating_add(1));
    }

    /// Comparison count since the last reset
    pub fn comparisons(&self) -> u64 {
        self.comparisons.get()
    }

    /// Swap count since the last reset
    pub fn swaps(&self) -> u64 {
        self.swaps.get()
    }

    /// Element-access count since the last reset
    pub fn array_accesses(&self) -> u64 {
        self.array_accesses.get()
    }

    /// Buffer-growth event count since the last reset
    pub fn memory_allocations(&self) -> u64 {
        self.memory_allocations.get()
    }

    /// Elapsed time between the start and stop marks
    ///
    /// `None` unless both marks are set and stop does not precede start.
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.started.get()?;
        let stopped = self.stopped.get()?;
        stopped.checked_duration_since(started)
    }

    /// Elapsed time in milliseconds, zero when timing is unset
    pub fn execution_time_millis(&self) -> f64 {
        self.elapsed().unwrap_or(Duration::ZERO).as_secs_f64() * 1_000.0
    }

    /// Captures the current counters and elapsed time as a labeled snapshot
    pub fn record_snapshot(&self, input_size: usize, label: &str) {
        self.snapshots.borrow_mut().push(MetricSnapshot {
            input_size,
            comparisons: self.comparisons.get(),
            swaps: self.swaps.get(),
            array_accesses: self.array_accesses.get(),
            execution_time: self.elapsed().unwrap_or(Duration::ZERO),
            label: label.to_string(),
        });
    }

    /// Returns a copy of all recorded snapshots, oldest first
    pub fn snapshots(&self) -> Vec<MetricSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Appends all snapshots as CSV rows under [`REPORTS_DIR`]
    ///
    /// The directory is created if absent. A header row is written only when
    /// the file is new; exporting into an existing file appends data rows.
    /// Returns the path of the written file.
    ///
    /// # Errors
    /// [`ExportError::InvalidFilename`] if `filename` is empty or contains a
    /// path separator or NUL character, [`ExportError::Io`] if the file
    /// cannot be created or written.
    pub fn export_csv(&self, filename: &str) -> Result<PathBuf, ExportError> {
        self.export_csv_to(Path::new(REPORTS_DIR), filename)
    }

    /// Like [`export_csv`](Self::export_csv), but with an explicit directory
    pub fn export_csv_to(&self, dir: &Path, filename: &str) -> Result<PathBuf, ExportError> {
        if filename.trim().is_empty() || filename.contains(&['/', '\\', '\0'][..]) {
            return Err(ExportError::InvalidFilename(filename.to_string()));
        }

        fs::create_dir_all(dir)?;
        let target = dir.join(filename);
        let existed = target.exists();

        let file = OpenOptions::new().create(true).append(true).open(&target)?;
        let mut out = BufWriter::new(file);

        if !existed {
            writeln!(
                out,
                "InputSize,InputType,Comparisons,Swaps,ArrayAccesses,ExecutionTimeMs"
            )?;
        }
        for snapshot in self.snapshots.borrow().iter() {
            writeln!(
                out,
                "{},{},{},{},{},{:.3}",
                snapshot.input_size,
                snapshot.label,
                snapshot.comparisons,
                snapshot.swaps,
                snapshot.array_accesses,
                snapshot.execution_time_millis()
            )?;
        }
        out.flush()?;

        Ok(target)
    }

    /// Prints the live counters to stdout
    pub fn print_summary(&self) {
        println!("=== Performance Metrics ===");
        println!("Comparisons: {}", self.comparisons.get());
        println!("Swaps: {}", self.swaps.get());
        println!("Array Accesses: {}", self.array_accesses.get());
        println!("Memory Allocations: {}", self.memory_allocations.get());
        println!("Execution Time: {:.3} ms", self.execution_time_millis());
        println!("===========================");
    }

    /// Prints every recorded snapshot as an aligned table on stdout
    pub fn print_all_snapshots(&self) {
        println!("=== All Performance Snapshots ===");
        println!(
            "{:<10} {:<25} {:>14} {:>10} {:>14} {:>12}",
            "Size", "Type", "Comparisons", "Swaps", "Accesses", "Time (ms)"
        );
        for snapshot in self.snapshots.borrow().iter() {
            println!(
                "{:<10} {:<25} {:>14} {:>10} {:>14} {:>12.3}",
                snapshot.input_size,
                snapshot.label,
                snapshot.comparisons,
                snapshot.swaps,
                snapshot.array_accesses,
                snapshot.execution_time_millis()
            );
        }
        println!("=================================");
    }
}
