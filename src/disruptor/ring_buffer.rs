//! Fixed-capacity, power-of-two-sized slot storage.
//!
//! `RingBuffer<T>` is deliberately dumb: it owns a contiguous array of `T`
//! and maps sequence numbers to slots by masking, nothing more. All
//! ordering guarantees (who may read or write a given slot, and when) are
//! provided externally by a [`crate::disruptor::sequencer::Sequencer`];
//! the buffer itself performs no synchronisation.

use std::cell::UnsafeCell;

use crate::error::{Result, SequencerError};

/// Contiguous, power-of-two-sized slot storage indexed by sequence
/// number modulo capacity.
///
/// Indexing never panics on sequence overflow in the way a `Vec` index
/// would: `slot(s)` accepts any non-negative `s` and maps it to
/// `s & (capacity - 1)`, so `slot(s)` and `slot(s + k * capacity)` alias
/// the same storage for every `k >= 0`. Callers are responsible for only
/// accessing a slot when the claim/publish protocol guarantees they have
/// exclusive access to it.
pub struct RingBuffer<T> {
    buffer: Box<[UnsafeCell<T>]>,
    mask: usize,
}

// SAFETY: access is never actually concurrent on the same slot — the
// owning Sequencer's claim/publish protocol guarantees that at any
// instant a given slot is owned by exactly one producer or the consumer,
// never both. `T: Send` is still required since slots cross threads.
unsafe impl<T: Send> Sync for RingBuffer<T> {}

impl<T: Default> RingBuffer<T> {
    /// Construct a ring buffer with the given capacity, which must be a
    /// positive power of two. Every slot is value-initialised with
    /// `T::default()`.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 || !capacity.is_power_of_two() {
            return Err(SequencerError::config(
                "ring buffer capacity must be a positive power of two",
            ));
        }
        let buffer: Box<[UnsafeCell<T>]> = (0..capacity)
            .map(|_| UnsafeCell::new(T::default()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Self {
            buffer,
            mask: capacity - 1,
        })
    }
}

impl<T> RingBuffer<T> {
    /// Total number of slots.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Obtain a mutable reference to the slot for sequence `s`.
    ///
    /// # Safety
    /// The caller must hold exclusive access to this slot per the
    /// claim/publish protocol (i.e. it has claimed `s` from a
    /// `Sequencer` and has not yet published it, or it is the consumer
    /// reading a published, not-yet-recycled slot). Calling this
    /// concurrently for the same `s` from two threads is undefined
    /// behaviour.
    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn slot(&self, s: i64) -> &mut T {
        let idx = (s as u64 as usize) & self.mask;
        &mut *self.buffer[idx].get()
    }
}
