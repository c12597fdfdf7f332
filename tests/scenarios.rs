//! End-to-end scenarios S1-S6 (spec.md §8), all against `N = 8` rings.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use flux_disruptor::{
    BlockingWaitStrategy, BusySpinWaitStrategy, Disruptor, Sequence, SequencerConfig,
    WaitStrategy,
};

fn disruptor_of(size: usize) -> Arc<Disruptor<u64, BusySpinWaitStrategy>> {
    let config = SequencerConfig::new(size).unwrap();
    Arc::new(Disruptor::new(config, BusySpinWaitStrategy::new()).unwrap())
}

/// S1 - single producer, in order.
#[test]
fn s1_single_producer_in_order() {
    let d = disruptor_of(8);
    let sequencer = d.sequencer();
    let ring = d.ring_buffer();

    for i in 0..8i64 {
        let s = sequencer.next();
        assert_eq!(s, i);
        unsafe { *ring.slot(s) = i as u64 };
        sequencer.publish(s);
    }

    let mut consumed = Vec::new();
    for s in 0..8 {
        consumed.push(unsafe { *ring.slot(s) });
        sequencer.mark_consumed(s);
    }
    sequencer.update_gating_sequence(7);

    assert_eq!(consumed, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(sequencer.get_cursor(), 7);
    assert_eq!(sequencer.get_gating_sequence(), 7);
}

/// S2 - two producers, publish reversed.
#[test]
fn s2_two_producers_publish_reversed() {
    let d = disruptor_of(8);
    let sequencer = d.sequencer();
    let ring = d.ring_buffer();

    let a = sequencer.next(); // 0
    let b = sequencer.next(); // 1
    unsafe {
        *ring.slot(a) = 100;
        *ring.slot(b) = 200;
    }

    sequencer.publish(b);
    assert_eq!(sequencer.get_highest_published(0, 1), -1);

    sequencer.publish(a);
    assert_eq!(sequencer.get_highest_published(0, 1), 1);
}

/// S3 - four producers x 1000 items, N = 1024.
#[test]
fn s3_four_producers_thousand_items_each() {
    let d = disruptor_of(1024);
    let sequencer = d.sequencer();
    let ring = d.ring_buffer();

    // Encode producer id in the high bits, per-producer counter in the low bits,
    // so we can verify each producer contributed exactly 1000 sequences.
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4u64)
        .map(|producer_id| {
            let d = d.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..1000u64 {
                    let s = d.sequencer().next();
                    unsafe { *d.ring_buffer().slot(s) = (producer_id << 32) | i };
                    d.sequencer().publish(s);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(sequencer.get_cursor(), 3999);
    assert_eq!(sequencer.get_highest_published(0, 3999), 3999);

    let mut per_producer_counts = [0u64; 4];
    for s in 0..=3999 {
        let value = unsafe { *ring.slot(s) };
        let producer_id = (value >> 32) as usize;
        per_producer_counts[producer_id] += 1;
    }
    assert_eq!(per_producer_counts, [1000, 1000, 1000, 1000]);
}

/// S4 - backpressure: a ninth claim blocks until the consumer releases slot 0.
#[test]
fn s4_backpressure_blocks_until_gating_advances() {
    let d = disruptor_of(8);
    let sequencer = d.sequencer();
    for _ in 0..8 {
        let s = sequencer.next();
        sequencer.publish(s);
    }

    let d2 = d.clone();
    let handle = thread::spawn(move || d2.sequencer().next());

    thread::sleep(Duration::from_millis(30));
    assert!(!handle.is_finished(), "ninth claim should still be blocked");

    sequencer.update_gating_sequence(0);
    assert_eq!(handle.join().unwrap(), 8);
}

/// S5 - try_next saturation: same setup as S4, non-blocking variant.
#[test]
fn s5_try_next_saturation() {
    let d = disruptor_of(8);
    let sequencer = d.sequencer();
    for _ in 0..8 {
        let s = sequencer.next();
        sequencer.publish(s);
    }

    assert_eq!(sequencer.try_next(), -1);
    sequencer.update_gating_sequence(0);
    assert_eq!(sequencer.try_next(), 8);
}

/// S6 - BlockingWaitStrategy wakeup within a bounded time.
#[test]
fn s6_blocking_strategy_wakeup() {
    let cursor = Arc::new(Sequence::new(0));
    let strategy = Arc::new(BlockingWaitStrategy::new());
    let woken = Arc::new(AtomicUsize::new(0));

    let producer_cursor = cursor.clone();
    let producer_strategy = strategy.clone();
    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        producer_cursor.set(10);
        producer_strategy.signal();
    });

    let start = Instant::now();
    let observed = strategy.wait_for(10, &cursor);
    woken.fetch_add(1, Ordering::SeqCst);

    assert_eq!(observed, 10);
    assert!(start.elapsed() < Duration::from_millis(100));
    assert_eq!(woken.load(Ordering::SeqCst), 1);

    producer.join().unwrap();
}
