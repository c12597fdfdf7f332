//! `flux_disruptor` — a bounded, lock-free, multi-producer / single-consumer
//! ring buffer guaranteeing total sequence order across all producers.
//!
//! See [`disruptor`] for the four core components (`Sequence`,
//! `WaitStrategy`, `RingBuffer`, `Sequencer`) and the [`disruptor::Disruptor`]
//! façade that aggregates a ring buffer with its sequencer.

pub mod constants;
pub mod disruptor;
pub mod error;

pub use disruptor::{
    BlockingWaitStrategy, BusySpinWaitStrategy, Consumer, Disruptor, Producer, RingBuffer,
    Sequence, Sequencer, SequencerConfig, TimeoutBlockingWaitStrategy, WaitStrategy,
    YieldingWaitStrategy,
};
pub use error::{Result, SequencerError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
