//! Thin consumer handle over a [`crate::disruptor::Disruptor`].
//!
//! `Consumer` owns the single logical consume loop: wait for new
//! sequences to be published, drain the contiguous batch that is ready,
//! and release it back to producers. All the ordering/backpressure logic
//! lives in [`crate::disruptor::Sequencer`]; this wrapper only sequences
//! the four calls spec.md §2 describes (wait, scan, mark_consumed,
//! update_gating_sequence) into a single `poll()`.

use std::sync::Arc;

use crate::disruptor::wait_strategy::WaitStrategy;
use crate::disruptor::Disruptor;

/// Consumer handle: the only thread that may call [`Consumer::poll`] on
/// a given [`Disruptor`] at a time, per spec.md §5's single-logical-
/// consumer model.
pub struct Consumer<T, W: WaitStrategy> {
    disruptor: Arc<Disruptor<T, W>>,
    next_sequence: i64,
}

impl<T, W: WaitStrategy> Consumer<T, W> {
    pub(crate) fn new(disruptor: Arc<Disruptor<T, W>>) -> Self {
        Self {
            disruptor,
            next_sequence: 0,
        }
    }

    /// Highest sequence this consumer has fully processed and released.
    pub fn last_consumed(&self) -> i64 {
        self.next_sequence - 1
    }
}

impl<T: Clone, W: WaitStrategy> Consumer<T, W> {
    /// Wait for at least one new sequence, then drain and return every
    /// contiguously published slot starting at this consumer's current
    /// position. Clears each slot's availability flag and advances the
    /// gating sequence exactly once, after the batch has been read.
    pub fn poll(&mut self) -> Vec<T> {
        let sequencer = self.disruptor.sequencer();
        let available = sequencer.wait_for(self.next_sequence);
        let highest = sequencer.get_highest_published(self.next_sequence, available);
        if highest < self.next_sequence {
            return Vec::new();
        }

        let ring_buffer = self.disruptor.ring_buffer();
        let mut batch = Vec::with_capacity((highest - self.next_sequence + 1) as usize);
        for sequence in self.next_sequence..=highest {
            // SAFETY: `sequence` was observed published by
            // `get_highest_published`, and this consumer is the sole
            // reader per the single-consumer model.
            let value = unsafe { ring_buffer.slot(sequence) }.clone();
            batch.push(value);
            sequencer.mark_consumed(sequence);
        }
        sequencer.update_gating_sequence(highest);
        self.next_sequence = highest + 1;
        batch
    }
}
