//! Instrumented binary max-heap for empirical algorithm analysis
//!
//! This crate provides an array-backed binary max-heap whose restructuring
//! algorithms (sift-up, sift-down, Floyd's linear-time bulk construction)
//! report every comparison, swap, and element access to an optional
//! [`PerformanceTracker`]. The tracker accumulates counters, measures elapsed
//! wall-clock time between explicit start/stop marks, and exports named
//! snapshots as CSV for plotting.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity         |
//! |----------------|--------------------|
//! | `insert`       | O(log n) amortized |
//! | `extract_max`  | O(log n)           |
//! | `peek`         | O(1)               |
//! | `increase_key` | O(log n)           |
//! | `from_slice`   | Θ(n)               |
//!
//! # Example
//!
//! ```rust
//! use instrumented_maxheap::MaxHeap;
//!
//! let mut heap = MaxHeap::from_slice(&[3, 1, 4, 1, 5, 9, 2, 6]);
//! assert_eq!(heap.len(), 8);
//! assert_eq!(heap.peek(), Ok(9));
//!
//! assert_eq!(heap.extract_max(), Ok(9));
//! assert_eq!(heap.extract_max(), Ok(6));
//! assert!(heap.is_valid_max_heap());
//! ```
//!
//! # Instrumented example
//!
//! ```rust
//! use std::rc::Rc;
//! use instrumented_maxheap::{MaxHeap, PerformanceTracker};
//!
//! let tracker = Rc::new(PerformanceTracker::new());
//! let mut heap = MaxHeap::with_capacity_and_tracker(4, Rc::clone(&tracker)).unwrap();
//!
//! tracker.start_timing();
//! for value in [5, 1, 9, 3, 7] {
//!     heap.insert(value);
//! }
//! tracker.stop_timing();
//!
//! assert!(tracker.comparisons() > 0);
//! // Capacity 4 doubled once to fit the fifth element.
//! assert_eq!(tracker.memory_allocations(), 1);
//! ```

pub mod max_heap;
pub mod tracker;

pub use max_heap::{HeapError, MaxHeap};
pub use tracker::{ExportError, MetricSnapshot, PerformanceTracker};
