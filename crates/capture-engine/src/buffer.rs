//! Bounded drop-oldest hand-off between the capture thread and the viewer.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Default number of frames held between producer and consumer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 30;

/// Fixed-capacity ring that keeps the freshest `capacity` items.
///
/// `push` never blocks and never grows the buffer: when full it evicts the
/// single oldest item first. `poll` never blocks and returns `None` when
/// nothing is queued. Items come out in insertion order.
#[derive(Debug)]
pub struct FrameBuffer<T> {
    ring: Mutex<Ring<T>>,
    pushed: AtomicU64,
    dropped: AtomicU64,
}

#[derive(Debug)]
struct Ring<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

/// Counters for a [`FrameBuffer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferStats {
    /// Items inserted since creation.
    pub pushed: u64,
    /// Items evicted to make room.
    pub dropped: u64,
}

impl<T> FrameBuffer<T> {
    /// Create a buffer with room for `capacity` items (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ring: Mutex::new(Ring {
                slots: (0..capacity).map(|_| None).collect(),
                head: 0,
                len: 0,
            }),
            pushed: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Insert an item, returning the evicted oldest item if the buffer was full.
    pub fn push(&self, item: T) -> Option<T> {
        let mut ring = self.ring.lock();
        let capacity = ring.slots.len();

        let evicted = if ring.len == capacity {
            let head = ring.head;
            let old = ring.slots[head].take();
            ring.head = (head + 1) % capacity;
            ring.len -= 1;
            self.dropped.fetch_add(1, Ordering::Relaxed);
            old
        } else {
            None
        };

        let tail = (ring.head + ring.len) % capacity;
        ring.slots[tail] = Some(item);
        ring.len += 1;
        self.pushed.fetch_add(1, Ordering::Relaxed);
        evicted
    }

    /// Take the oldest queued item, if any.
    pub fn poll(&self) -> Option<T> {
        let mut ring = self.ring.lock();
        if ring.len == 0 {
            return None;
        }
        let head = ring.head;
        let item = ring.slots[head].take();
        ring.head = (head + 1) % ring.slots.len();
        ring.len -= 1;
        item
    }

    pub fn len(&self) -> usize {
        self.ring.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.ring.lock().slots.len()
    }

    pub fn stats(&self) -> BufferStats {
        BufferStats {
            pushed: self.pushed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

impl<T> Default for FrameBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_poll_on_empty_returns_none() {
        let buffer: FrameBuffer<u32> = FrameBuffer::new(4);
        assert!(buffer.is_empty());
        assert_eq!(buffer.poll(), None);
    }

    #[test]
    fn test_fifo_order_below_capacity() {
        let buffer = FrameBuffer::new(4);
        for i in 0..3 {
            assert_eq!(buffer.push(i), None);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.poll(), Some(0));
        assert_eq!(buffer.poll(), Some(1));
        assert_eq!(buffer.poll(), Some(2));
        assert_eq!(buffer.poll(), None);
    }

    #[test]
    fn test_overflow_evicts_single_oldest() {
        let buffer = FrameBuffer::new(30);
        for i in 0..30 {
            buffer.push(i);
        }
        assert_eq!(buffer.push(30), Some(0));
        assert_eq!(buffer.len(), 30);

        let drained: Vec<_> = std::iter::from_fn(|| buffer.poll()).collect();
        assert_eq!(drained, (1..=30).collect::<Vec<_>>());
        assert_eq!(
            buffer.stats(),
            BufferStats {
                pushed: 31,
                dropped: 1
            }
        );
    }

    #[test]
    fn test_wraparound_after_partial_drain() {
        let buffer = FrameBuffer::new(3);
        buffer.push('a');
        buffer.push('b');
        assert_eq!(buffer.poll(), Some('a'));
        buffer.push('c');
        buffer.push('d');
        assert_eq!(buffer.push('e'), Some('b'));
        assert_eq!(buffer.poll(), Some('c'));
        assert_eq!(buffer.poll(), Some('d'));
        assert_eq!(buffer.poll(), Some('e'));
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let buffer = FrameBuffer::new(0);
        assert_eq!(buffer.capacity(), 1);
        buffer.push(1);
        assert_eq!(buffer.push(2), Some(1));
        assert_eq!(buffer.poll(), Some(2));
    }

    #[test]
    fn test_concurrent_producer_never_exceeds_capacity() {
        let buffer = Arc::new(FrameBuffer::new(8));
        let producer = {
            let buffer = buffer.clone();
            std::thread::spawn(move || {
                for i in 0..10_000u32 {
                    buffer.push(i);
                }
            })
        };

        let mut last = None;
        while !producer.is_finished() || !buffer.is_empty() {
            assert!(buffer.len() <= 8);
            if let Some(value) = buffer.poll() {
                if let Some(prev) = last {
                    assert!(value > prev, "frames must come out in order");
                }
                last = Some(value);
            }
        }
        producer.join().unwrap();

        let stats = buffer.stats();
        assert_eq!(stats.pushed, 10_000);
    }
}
