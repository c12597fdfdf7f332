//! Cache-line-isolated atomic sequence counter.
//!
//! `Sequence` is the single primitive the rest of the disruptor composes
//! on: the producer cursor, the consumer's gating sequence, and (should a
//! caller need one) any dependent-sequence bookkeeping are all plain
//! `Sequence` values.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::constants::CACHE_LINE_SIZE;

/// A monotonically-movable 64-bit counter padded to occupy exactly one
/// cache line, so that no two `Sequence`s ever share a line and suffer
/// false sharing under concurrent access.
///
/// Sequence numbers are signed and start at `-1` ("nothing yet"); the
/// first value ever produced is `0`. Wrap-around of the counter itself is
/// out of scope — at realistic throughputs it would take centuries.
#[repr(align(64))]
pub struct Sequence {
    value: AtomicI64,
    _padding: [u8; CACHE_LINE_SIZE - std::mem::size_of::<AtomicI64>()],
}

impl Sequence {
    /// Construct a new sequence with the given initial value.
    pub fn new(initial: i64) -> Self {
        Self {
            value: AtomicI64::new(initial),
            _padding: [0; CACHE_LINE_SIZE - std::mem::size_of::<AtomicI64>()],
        }
    }

    /// Current value, acquire-ordered.
    #[inline(always)]
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Acquire)
    }

    /// Store a new value, release-ordered.
    #[inline(always)]
    pub fn set(&self, new_value: i64) {
        self.value.store(new_value, Ordering::Release);
    }

    /// Atomically add one and return the new value; acq_rel.
    #[inline(always)]
    pub fn increment_and_get(&self) -> i64 {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Atomically add `delta` and return the new value; acq_rel.
    #[inline(always)]
    pub fn add_and_get(&self, delta: i64) -> i64 {
        self.value.fetch_add(delta, Ordering::AcqRel) + delta
    }

    /// Compare-and-set: if the current value equals `*expected`, store
    /// `desired` and return `true`. Otherwise write the actual observed
    /// value into `*expected` and return `false`.
    ///
    /// Success uses acq_rel ordering, failure uses acquire, matching the
    /// original's `compare_exchange_weak(expected, desired, acq_rel,
    /// acquire)`.
    #[inline(always)]
    pub fn compare_and_set(&self, expected: &mut i64, desired: i64) -> bool {
        match self
            .value
            .compare_exchange_weak(*expected, desired, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => true,
            Err(actual) => {
                *expected = actual;
                false
            }
        }
    }

    /// Relaxed load, for diagnostics only.
    #[inline(always)]
    pub fn get_relaxed(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl Default for Sequence {
    /// "Nothing claimed yet".
    fn default() -> Self {
        Self::new(-1)
    }
}

static_assertions::const_assert_eq!(std::mem::size_of::<Sequence>(), CACHE_LINE_SIZE);
static_assertions::const_assert_eq!(std::mem::align_of::<Sequence>(), CACHE_LINE_SIZE);
