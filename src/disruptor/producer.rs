//! Thin producer handle over a [`crate::disruptor::Disruptor`].
//!
//! `Producer` adds nothing to the claim/write/publish protocol beyond a
//! closure-based ergonomic wrapper — all the actual coordination is the
//! [`crate::disruptor::Sequencer`]'s. Cloning a `Producer` is cheap (it
//! only clones the shared `Arc`) and safe: the sequencer's CAS loop is
//! exactly what makes concurrent producers correct.

use std::sync::Arc;

use crate::disruptor::wait_strategy::WaitStrategy;
use crate::disruptor::Disruptor;

/// Producer handle: claims a sequence, lets the caller write into the
/// slot via a closure, then publishes.
pub struct Producer<T, W: WaitStrategy> {
    disruptor: Arc<Disruptor<T, W>>,
}

impl<T, W: WaitStrategy> Producer<T, W> {
    pub(crate) fn new(disruptor: Arc<Disruptor<T, W>>) -> Self {
        Self { disruptor }
    }

    /// Claim one sequence (blocking on backpressure if necessary), hand
    /// the slot to `writer`, then publish.
    pub fn publish(&mut self, writer: impl FnOnce(&mut T)) -> i64 {
        let sequencer = self.disruptor.sequencer();
        let seq = sequencer.next();
        // SAFETY: we hold exclusive access to `seq` until `publish` below.
        writer(unsafe { self.disruptor.ring_buffer().slot(seq) });
        sequencer.publish(seq);
        seq
    }

    /// Non-blocking variant of [`Producer::publish`]: returns `None`
    /// instead of blocking if the buffer has no room right now.
    pub fn try_publish(&mut self, writer: impl FnOnce(&mut T)) -> Option<i64> {
        let sequencer = self.disruptor.sequencer();
        let seq = sequencer.try_next();
        if seq == -1 {
            return None;
        }
        writer(unsafe { self.disruptor.ring_buffer().slot(seq) });
        sequencer.publish(seq);
        Some(seq)
    }

    /// Claim and publish `count` sequences as a single batch, calling
    /// `writer(i, slot)` for each of the `count` slots.
    pub fn publish_batch(&mut self, count: i64, mut writer: impl FnMut(i64, &mut T)) -> (i64, i64) {
        let sequencer = self.disruptor.sequencer();
        let first = sequencer.next_batch(count);
        let last = first + count - 1;
        for (i, seq) in (first..=last).enumerate() {
            writer(i as i64, unsafe { self.disruptor.ring_buffer().slot(seq) });
        }
        sequencer.publish_batch(first, last);
        (first, last)
    }
}

impl<T, W: WaitStrategy> Clone for Producer<T, W> {
    fn clone(&self) -> Self {
        Self {
            disruptor: self.disruptor.clone(),
        }
    }
}
