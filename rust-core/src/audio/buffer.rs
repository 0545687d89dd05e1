//! Lock-free ring buffer for audio data
//!
//! Carries captured samples from the device callback thread to the source
//! that owns the consumer end.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Single-producer single-consumer audio ring buffer
pub struct AudioRingBuffer {
    producer: HeapProducer<f64>,
    consumer: HeapConsumer<f64>,
}

impl AudioRingBuffer {
    /// Create new ring buffer with given capacity in samples
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<f64>::new(capacity);
        let (producer, consumer) = rb.split();

        Self { producer, consumer }
    }

    /// Split into producer and consumer ends
    pub fn split(self) -> (AudioProducer, AudioConsumer) {
        let dropped = Arc::new(AtomicUsize::new(0));
        (
            AudioProducer {
                producer: self.producer,
                dropped: Arc::clone(&dropped),
            },
            AudioConsumer {
                consumer: self.consumer,
                dropped,
            },
        )
    }
}

/// Producer end, owned by the device callback
pub struct AudioProducer {
    producer: HeapProducer<f64>,
    dropped: Arc<AtomicUsize>,
}

impl AudioProducer {
    /// Write every `stride`-th sample starting at `offset`
    ///
    /// Used to keep a single channel of an interleaved device buffer.
    /// Samples that do not fit are counted as dropped.
    ///
    /// # Returns
    /// Number of samples actually written
    pub fn write_strided(&mut self, samples: &[f32], offset: usize, stride: usize) -> usize {
        let stride = stride.max(1);
        let mut written = 0;
        let mut dropped = 0;

        for &sample in samples.iter().skip(offset).step_by(stride) {
            if self.producer.push(sample as f64).is_ok() {
                written += 1;
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            self.dropped.fetch_add(dropped, Ordering::Relaxed);
        }
        written
    }
}

/// Consumer end, owned by the audio source
pub struct AudioConsumer {
    consumer: HeapConsumer<f64>,
    dropped: Arc<AtomicUsize>,
}

impl AudioConsumer {
    /// Read samples into `buffer`
    ///
    /// # Returns
    /// Number of samples actually read
    pub fn read(&mut self, buffer: &mut [f64]) -> usize {
        self.consumer.pop_slice(buffer)
    }

    /// Samples dropped by the producer since the last call
    pub fn take_dropped(&self) -> usize {
        self.dropped.swap(0, Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }
}
