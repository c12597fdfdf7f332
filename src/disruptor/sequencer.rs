//! The multi-producer coordinator: claim, publish, gap detection and
//! backpressure.
//!
//! This is the hot path of the whole crate. Producers race via
//! compare-and-swap on a shared cursor to claim disjoint sequence ranges;
//! the single consumer advances only across contiguous published ranges,
//! so ordering is preserved even when publication completes out of claim
//! order (see [`Sequencer::get_highest_published`]).

use std::sync::atomic::{AtomicBool, Ordering};

use crate::disruptor::sequence::Sequence;
use crate::disruptor::wait_strategy::WaitStrategy;
use crate::error::{Result, SequencerError};

/// Multi-producer, single-consumer sequence coordinator for a ring
/// buffer of `buffer_size` slots.
///
/// `Sequencer` owns no slot storage itself — it only tracks which
/// sequence numbers have been claimed, published, and released for
/// reuse. It is generic over its wait strategy so that the hot path
/// (`next`/`publish`) is monomorphised rather than going through a
/// vtable.
pub struct Sequencer<W: WaitStrategy> {
    buffer_size: usize,
    index_mask: usize,
    cursor: Sequence,
    gating_sequence: Sequence,
    available: Box<[AtomicBool]>,
    wait_strategy: W,
}

impl<W: WaitStrategy> Sequencer<W> {
    /// Construct a sequencer for a ring buffer of `buffer_size` slots
    /// (must be a positive power of two), starting from `initial_cursor`
    /// (normally `-1`, meaning "nothing claimed yet").
    pub fn new(buffer_size: usize, wait_strategy: W, initial_cursor: i64) -> Result<Self> {
        if buffer_size == 0 || !buffer_size.is_power_of_two() {
            return Err(SequencerError::config(
                "buffer size must be a positive power of two",
            ));
        }
        let available = (0..buffer_size)
            .map(|_| AtomicBool::new(false))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Self {
            buffer_size,
            index_mask: buffer_size - 1,
            cursor: Sequence::new(initial_cursor),
            gating_sequence: Sequence::new(initial_cursor),
            available,
            wait_strategy,
        })
    }

    #[inline(always)]
    fn index_of(&self, sequence: i64) -> usize {
        (sequence as u64 as usize) & self.index_mask
    }

    /// Claim the next sequence number, blocking (with a yielding spin)
    /// until there is room. Never fails; the only way out is for the
    /// consumer to make progress.
    pub fn next(&self) -> i64 {
        self.next_batch(1)
    }

    /// Claim a contiguous batch of `n` sequence numbers, returning the
    /// first one in the range `[first, first + n - 1]`.
    pub fn next_batch(&self, n: i64) -> i64 {
        let mut current = self.cursor.get();
        loop {
            let next = current + n;
            let wrap_point = next - self.buffer_size as i64;
            let mut gating = self.gating_sequence.get();

            if wrap_point > gating {
                tracing::trace!(wrap_point, gating, "producer blocked on backpressure");
                while wrap_point > gating {
                    gating = self.gating_sequence.get();
                    std::thread::yield_now();
                }
            }

            let mut expected = current;
            if self.cursor.compare_and_set(&mut expected, next) {
                return current + 1;
            }
            current = expected;
        }
    }

    /// Non-blocking single-shot claim: if the wrap check fails or the
    /// CAS races, return `-1` immediately rather than retrying. Used by
    /// admission-control callers willing to drop instead of backing up.
    pub fn try_next(&self) -> i64 {
        let current = self.cursor.get();
        let next = current + 1;
        let wrap_point = next - self.buffer_size as i64;

        if wrap_point > self.gating_sequence.get() {
            return -1;
        }

        let mut expected = current;
        if self.cursor.compare_and_set(&mut expected, next) {
            next
        } else {
            -1
        }
    }

    /// Mark `sequence` as published (visible to the consumer) and
    /// signal waiters. The release store here pairs with the acquire
    /// load in [`Sequencer::is_available`]/[`Sequencer::get_highest_published`],
    /// making the producer's slot write visible to the consumer.
    ///
    /// Callers must have already written the slot; this is a caller
    /// obligation, not something this method can check.
    pub fn publish(&self, sequence: i64) {
        debug_assert!(
            sequence <= self.cursor.get(),
            "publish called with a sequence that was never claimed"
        );
        self.available[self.index_of(sequence)].store(true, Ordering::Release);
        self.wait_strategy.signal();
    }

    /// Publish every sequence in `[lo, hi]` and signal waiters exactly
    /// once.
    pub fn publish_batch(&self, lo: i64, hi: i64) {
        debug_assert!(
            hi <= self.cursor.get(),
            "publish_batch called with a sequence that was never claimed"
        );
        for sequence in lo..=hi {
            self.available[self.index_of(sequence)].store(true, Ordering::Release);
        }
        self.wait_strategy.signal();
    }

    /// Returns the highest sequence `h` such that every sequence in
    /// `[lower_bound, h]` is observed published. Scanning stops at the
    /// first gap; `lower_bound - 1` is returned if `lower_bound` itself
    /// is not yet available (for `lower_bound == 0` this is `-1`, which
    /// must not be coerced to an unsigned type by callers).
    pub fn get_highest_published(&self, lower_bound: i64, available_sequence: i64) -> i64 {
        let mut sequence = lower_bound;
        while sequence <= available_sequence {
            if !self.available[self.index_of(sequence)].load(Ordering::Acquire) {
                return sequence - 1;
            }
            sequence += 1;
        }
        available_sequence
    }

    /// Whether `sequence` has been published and not yet consumed.
    pub fn is_available(&self, sequence: i64) -> bool {
        self.available[self.index_of(sequence)].load(Ordering::Acquire)
    }

    /// Clear the availability flag for `sequence` after the consumer has
    /// processed it, so a future producer reusing the same slot is not
    /// mistaken for already-published data.
    pub fn mark_consumed(&self, sequence: i64) {
        self.available[self.index_of(sequence)].store(false, Ordering::Release);
    }

    /// Publish the consumer's progress so producers can advance past
    /// backpressure. Call at most once per processed batch, after every
    /// `mark_consumed` call in that batch.
    pub fn update_gating_sequence(&self, sequence: i64) {
        self.gating_sequence.set(sequence);
    }

    /// Highest sequence ever claimed by any producer.
    pub fn get_cursor(&self) -> i64 {
        self.cursor.get()
    }

    /// Highest sequence the consumer has released for reuse.
    pub fn get_gating_sequence(&self) -> i64 {
        self.gating_sequence.get()
    }

    /// Number of sequences that can be claimed without a producer
    /// blocking on backpressure right now.
    pub fn remaining_capacity(&self) -> i64 {
        self.buffer_size as i64 - (self.cursor.get() - self.gating_sequence.get())
    }

    /// Block the calling (consumer) thread until `target` is published,
    /// per the sequencer's wait strategy.
    pub fn wait_for(&self, target: i64) -> i64 {
        self.wait_strategy.wait_for(target, &self.cursor)
    }

    /// Wake every waiter on this sequencer's wait strategy (used for
    /// orderly shutdown).
    pub fn signal_all(&self) {
        self.wait_strategy.signal_all();
    }

    /// Total capacity of the ring this sequencer coordinates.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}
