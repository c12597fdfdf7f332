//! LMAX Disruptor-style lock-free ring buffer.
//!
//! A bounded, multi-producer / single-consumer ring buffer that
//! guarantees total sequence order across all producers: producers race
//! via compare-and-swap to claim sequence numbers, write into a fixed
//! pre-allocated slot array, then publish; the consumer advances only
//! across contiguous published ranges, so ordering holds even when
//! publication order differs from claim order.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use flux_disruptor::disruptor::{Disruptor, SequencerConfig};
//! use flux_disruptor::disruptor::wait_strategy::YieldingWaitStrategy;
//!
//! let config = SequencerConfig::new(1024).unwrap();
//! let disruptor: Arc<Disruptor<u64, _>> =
//!     Arc::new(Disruptor::new(config, YieldingWaitStrategy::new()).unwrap());
//!
//! let mut producer = disruptor.clone().producer();
//! producer.publish(|slot| *slot = 42);
//!
//! let mut consumer = disruptor.consumer();
//! let batch = consumer.poll();
//! assert_eq!(batch, vec![42]);
//! ```

pub mod consumer;
pub mod producer;
pub mod ring_buffer;
pub mod sequence;
pub mod sequencer;
pub mod wait_strategy;

pub use consumer::Consumer;
pub use producer::Producer;
pub use ring_buffer::RingBuffer;
pub use sequence::Sequence;
pub use sequencer::Sequencer;
pub use wait_strategy::{
    BlockingWaitStrategy, BusySpinWaitStrategy, TimeoutBlockingWaitStrategy, WaitStrategy,
    YieldingWaitStrategy,
};

use std::sync::Arc;

use crate::error::Result;

/// Builder-style configuration for a [`Disruptor`]/[`Sequencer`] pair,
/// validated when actually constructing one rather than on the hot path.
#[derive(Clone, Copy, Debug)]
pub struct SequencerConfig {
    buffer_size: usize,
    initial_cursor: i64,
}

impl SequencerConfig {
    /// Start a config for a ring of `buffer_size` slots. Power-of-two
    /// validation happens in [`Disruptor::new`] / [`Sequencer::new`], so
    /// that builder chaining itself never fails.
    pub fn new(buffer_size: usize) -> Result<Self> {
        Ok(Self {
            buffer_size,
            initial_cursor: -1,
        })
    }

    /// Override the starting cursor/gating value (default `-1`, meaning
    /// "nothing claimed yet").
    pub fn with_initial_cursor(mut self, initial_cursor: i64) -> Self {
        self.initial_cursor = initial_cursor;
        self
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

/// Simple non-cyclic aggregate of a [`RingBuffer`] and the [`Sequencer`]
/// that coordinates access to it. [`Producer`]/[`Consumer`] handles hold
/// only a shared, non-owning `Arc` reference to it — neither is modeled
/// as a child of the other.
pub struct Disruptor<T, W: WaitStrategy> {
    ring_buffer: RingBuffer<T>,
    sequencer: Sequencer<W>,
}

impl<T: Default, W: WaitStrategy> Disruptor<T, W> {
    /// Construct a disruptor from a validated config and a wait
    /// strategy instance.
    pub fn new(config: SequencerConfig, wait_strategy: W) -> Result<Self> {
        let ring_buffer = RingBuffer::new(config.buffer_size)?;
        let sequencer = Sequencer::new(config.buffer_size, wait_strategy, config.initial_cursor)?;
        Ok(Self {
            ring_buffer,
            sequencer,
        })
    }
}

impl<T, W: WaitStrategy> Disruptor<T, W> {
    pub fn ring_buffer(&self) -> &RingBuffer<T> {
        &self.ring_buffer
    }

    pub fn sequencer(&self) -> &Sequencer<W> {
        &self.sequencer
    }

    /// Wake every consumer waiting on this disruptor's wait strategy.
    /// Combined with a shared "running" flag checked by the consumer's
    /// own loop, this is how orderly shutdown unblocks a parked
    /// consumer — the core itself defines no shutdown state machine.
    pub fn shutdown(&self) {
        self.sequencer.signal_all();
    }

    /// Obtain a thin producer handle sharing this disruptor.
    pub fn producer(self: Arc<Self>) -> Producer<T, W> {
        Producer::new(self)
    }

    /// Obtain a thin consumer handle sharing this disruptor.
    pub fn consumer(self: Arc<Self>) -> Consumer<T, W> {
        Consumer::new(self)
    }
}
