//! Array-backed binary max-heap with optional operation counting
//!
//! The heap owns a growable contiguous buffer of `i32` keys. Every comparison,
//! swap, and element access performed by the restructuring algorithms is
//! reported to an attached [`PerformanceTracker`], if any, so that operation
//! counts can be compared against theoretical bounds. The tracker hooks are
//! no-ops when no tracker is attached and never change the algorithms'
//! asymptotic behavior.
//!
//! Tie-breaking is strict throughout: equal keys never trigger a swap, so
//! elements that do not move keep their relative order.
//!
//! # Example
//!
//! ```rust
//! use instrumented_maxheap::MaxHeap;
//!
//! let mut heap = MaxHeap::with_capacity(8).unwrap();
//! heap.insert(3);
//! heap.insert(7);
//! heap.insert(5);
//!
//! assert_eq!(heap.peek(), Ok(7));
//! assert_eq!(heap.extract_max(), Ok(7));
//! assert_eq!(heap.extract_max(), Ok(5));
//! assert_eq!(heap.extract_max(), Ok(3));
//! assert!(heap.is_empty());
//! ```

use std::fmt;
use std::rc::Rc;

use crate::tracker::PerformanceTracker;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// A heap was requested with zero capacity
    InvalidCapacity,
    /// The heap contains no elements
    Empty,
    /// The index is outside the live range `[0, size)`
    IndexOutOfBounds {
        /// The offending index
        index: usize,
        /// Number of live elements at the time of the call
        size: usize,
    },
    /// `increase_key` was asked to lower a key
    KeyNotIncreased {
        /// Key currently stored at the index
        current: i32,
        /// The rejected replacement key
        requested: i32,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidCapacity => write!(f, "capacity must be positive"),
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::IndexOutOfBounds { index, size } => {
                write!(f, "index {} out of bounds for heap of size {}", index, size)
            }
            HeapError::KeyNotIncreased { current, requested } => {
                write!(
                    f,
                    "new value {} must not be less than current value {}",
                    requested, current
                )
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// An array-backed binary max-heap over `i32` keys
///
/// The buffer is exclusively owned by the heap; [`MaxHeap::to_vec`] always
/// returns a fresh copy. Logical size and physical capacity are tracked
/// separately, and capacity doubles whenever an insert finds the buffer full.
/// Each doubling is reported to the attached tracker as one allocation event.
///
/// An optional [`PerformanceTracker`] can be attached at construction time.
/// The tracker is shared (`Rc`), so a single tracker may observe several
/// heaps across benchmark phases. Single-threaded use only.
#[derive(Debug)]
pub struct MaxHeap {
    /// Live elements in heap order; `data.len()` is the logical size
    data: Vec<i32>,
    /// Allocated slots; always >= `data.len()`
    capacity: usize,
    tracker: Option<Rc<PerformanceTracker>>,
}

impl MaxHeap {
    /// Creates an empty heap with `capacity` pre-allocated slots
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, HeapError> {
        if capacity == 0 {
            return Err(HeapError::InvalidCapacity);
        }
        Ok(Self {
            data: Vec::with_capacity(capacity),
            capacity,
            tracker: None,
        })
    }

    /// Creates an empty heap with an attached performance tracker
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity_and_tracker(
        capacity: usize,
        tracker: Rc<PerformanceTracker>,
    ) -> Result<Self, HeapError> {
        let mut heap = Self::with_capacity(capacity)?;
        heap.tracker = Some(tracker);
        Ok(heap)
    }

    /// Builds a heap from a slice in Θ(n) using Floyd's bottom-up method
    ///
    /// Capacity is `max(values.len(), 1)` so that an empty input still yields
    /// a usable heap. Repeated insertion would cost Θ(n log n); sifting down
    /// from the last internal node instead is linear because the number of
    /// nodes at height h shrinks geometrically while sift cost grows only
    /// linearly with height.
    pub fn from_slice(values: &[i32]) -> Self {
        Self::build_from(values, None)
    }

    /// Builds a heap from a slice with an attached performance tracker
    ///
    /// The tracker observes the comparisons and swaps of the bulk
    /// construction itself.
    pub fn from_slice_with_tracker(values: &[i32], tracker: Rc<PerformanceTracker>) -> Self {
        Self::build_from(values, Some(tracker))
    }

    fn build_from(values: &[i32], tracker: Option<Rc<PerformanceTracker>>) -> Self {
        let capacity = values.len().max(1);
        let mut data = Vec::with_capacity(capacity);
        data.extend_from_slice(values);
        let mut heap = Self {
            data,
            capacity,
            tracker,
        };
        if !heap.data.is_empty() {
            heap.build_heap();
        }
        heap
    }

    /// Inserts a value, growing the buffer if it is full
    ///
    /// Amortized O(log n); a growth step additionally copies all elements.
    pub fn insert(&mut self, value: i32) {
        if self.data.len() == self.capacity {
            self.grow();
        }
        if let Some(t) = self.tracker() {
            t.add_array_accesses(1);
        }
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes and returns the maximum element
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    pub fn extract_max(&mut self) -> Result<i32, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::Empty);
        }
        if let Some(t) = self.tracker() {
            t.add_array_accesses(2);
        }
        // Replaces the root with the last element and shrinks by one.
        let max = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(max)
    }

    /// Returns the maximum element without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    pub fn peek(&self) -> Result<i32, HeapError> {
        let &max = self.data.first().ok_or(HeapError::Empty)?;
        if let Some(t) = self.tracker() {
            t.add_array_accesses(1);
        }
        Ok(max)
    }

    /// Raises the key at `index` to `new_value` and restores the heap property
    ///
    /// Equal values are accepted; the sift-up then terminates immediately.
    /// All validation happens before any mutation, so a failed call leaves
    /// the heap untouched.
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfBounds`] if `index >= self.len()`, and
    /// [`HeapError::KeyNotIncreased`] if `new_value` is less than the current
    /// key. Lowering a key must be rejected, never clamped.
    pub fn increase_key(&mut self, index: usize, new_value: i32) -> Result<(), HeapError> {
        let size = self.data.len();
        let current = *self
            .data
            .get(index)
            .ok_or(HeapError::IndexOutOfBounds { index, size })?;

        if let Some(t) = self.tracker() {
            t.add_comparisons(1);
            t.add_array_accesses(1);
        }
        if new_value < current {
            return Err(HeapError::KeyNotIncreased {
                current,
                requested: new_value,
            });
        }

        if let Some(t) = self.tracker() {
            t.add_array_accesses(1);
        }
        self.data[index] = new_value;
        self.sift_up(index);
        Ok(())
    }

    /// Verifies the max-heap property over the whole buffer
    ///
    /// Diagnostic query for tests; the engine never relies on it internally.
    /// Iterates over the internal nodes rather than recursing.
    pub fn is_valid_max_heap(&self) -> bool {
        let size = self.data.len();
        for i in 0..size / 2 {
            let left = Self::left(i);
            let right = Self::right(i);
            if left < size && self.data[i] < self.data[left] {
                return false;
            }
            if right < size && self.data[i] < self.data[right] {
                return false;
            }
        }
        true
    }

    /// Returns a defensive copy of the live elements in heap order
    ///
    /// Successive calls return independent vectors; mutating one never
    /// affects the heap or another copy.
    pub fn to_vec(&self) -> Vec<i32> {
        self.data.clone()
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated slots; always >= `len()`
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn tracker(&self) -> Option<&PerformanceTracker> {
        self.tracker.as_deref()
    }

    fn parent(index: usize) -> usize {
        (index - 1) / 2
    }

    fn left(index: usize) -> usize {
        2 * index + 1
    }

    fn right(index: usize) -> usize {
        2 * index + 2
    }

    /// Sift-down every internal node, from the last one up to the root
    fn build_heap(&mut self) {
        for i in (0..self.data.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    /// Move the element at `index` up until its parent is at least as large
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = Self::parent(index);
            if let Some(t) = self.tracker() {
                t.add_comparisons(1);
                t.add_array_accesses(1);
            }
            if self.data[index] > self.data[parent] {
                self.swap_entries(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move the element at `index` down until both children are no larger
    ///
    /// Picks the larger of the two children before comparing against the
    /// node itself; checking the larger child first avoids a redundant
    /// comparison against the smaller one.
    fn sift_down(&mut self, mut index: usize) {
        let size = self.data.len();
        loop {
            let mut largest = index;
            let left = Self::left(index);
            let right = Self::right(index);

            if left < size {
                if let Some(t) = self.tracker() {
                    t.add_comparisons(1);
                    t.add_array_accesses(2);
                }
                if self.data[left] > self.data[largest] {
                    largest = left;
                }
            }

            if right < size {
                if let Some(t) = self.tracker() {
                    t.add_comparisons(1);
                    t.add_array_accesses(2);
                }
                if self.data[right] > self.data[largest] {
                    largest = right;
                }
            }

            if largest == index {
                break;
            }
            self.swap_entries(index, largest);
            index = largest;
        }
    }

    fn swap_entries(&mut self, i: usize, j: usize) {
        if let Some(t) = self.tracker() {
            t.add_swaps(1);
            t.add_array_accesses(1);
        }
        self.data.swap(i, j);
    }

    /// Doubles capacity, preserving all elements in place
    ///
    /// The reservation either fully succeeds or aborts the process; the heap
    /// is never observable in a partially resized state.
    fn grow(&mut self) {
        self.capacity *= 2;
        if let Some(t) = self.tracker() {
            t.add_memory_allocation();
        }
        self.data.reserve_exact(self.capacity - self.data.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            MaxHeap::with_capacity(0).unwrap_err(),
            HeapError::InvalidCapacity
        );
    }

    #[test]
    fn from_slice_of_empty_input_yields_usable_heap() {
        let mut heap = MaxHeap::from_slice(&[]);
        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), 1);
        heap.insert(7);
        assert_eq!(heap.peek(), Ok(7));
    }

    #[test]
    fn sift_up_stops_at_equal_parent() {
        // Equal keys must not swap; the later duplicate stays below.
        let mut heap = MaxHeap::with_capacity(4).unwrap();
        heap.insert(5);
        heap.insert(5);
        assert_eq!(heap.to_vec(), vec![5, 5]);
    }

    #[test]
    fn grow_doubles_capacity_and_keeps_elements() {
        let mut heap = MaxHeap::with_capacity(2).unwrap();
        heap.insert(1);
        heap.insert(2);
        assert_eq!(heap.capacity(), 2);
        heap.insert(3);
        assert_eq!(heap.capacity(), 4);
        assert_eq!(heap.len(), 3);
        assert!(heap.is_valid_max_heap());
    }

    #[test]
    fn extract_max_restores_heap_property() {
        let mut heap = MaxHeap::from_slice(&[10, 8, 9, 4, 7, 6, 5]);
        assert_eq!(heap.extract_max(), Ok(10));
        assert!(heap.is_valid_max_heap());
        assert_eq!(heap.peek(), Ok(9));
    }

    #[test]
    fn failed_increase_key_leaves_heap_untouched() {
        let mut heap = MaxHeap::from_slice(&[10, 3, 7]);
        let before = heap.to_vec();
        assert_eq!(
            heap.increase_key(0, 5),
            Err(HeapError::KeyNotIncreased {
                current: 10,
                requested: 5
            })
        );
        assert_eq!(heap.to_vec(), before);
        assert_eq!(
            heap.increase_key(3, 99),
            Err(HeapError::IndexOutOfBounds { index: 3, size: 3 })
        );
        assert_eq!(heap.to_vec(), before);
    }

    #[test]
    fn increase_key_to_equal_value_succeeds() {
        let mut heap = MaxHeap::from_slice(&[5]);
        assert_eq!(heap.increase_key(0, 5), Ok(()));
        assert_eq!(heap.peek(), Ok(5));
        assert!(heap.is_valid_max_heap());
    }

    #[test]
    fn error_messages_name_the_violation() {
        let err = HeapError::KeyNotIncreased {
            current: 10,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "new value 5 must not be less than current value 10"
        );
        let err = HeapError::IndexOutOfBounds { index: 9, size: 4 };
        assert_eq!(err.to_string(), "index 9 out of bounds for heap of size 4");
    }
}
