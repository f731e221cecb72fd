//! Adapter between the strategies and an external benchmarking harness.
//!
//! A harness drives [`VectorBenchmark`] the same way for every strategy: `setup`
//! once per measured iteration, `run` the strategy any number of times, then
//! `cleanup`. Timing, warm-up, statistics and result ordering stay in the harness.

use log::debug;

use crate::buffer::PinnedBuffer;
use crate::error::{validation_error, Result};
use crate::strategy::Strategy;

/// Holds the buffer shared by the strategy operations between setup and cleanup.
#[derive(Debug)]
pub struct VectorBenchmark {
    items_count: usize,
    buffer: Option<PinnedBuffer>,
}

impl VectorBenchmark {
    pub fn new(items_count: usize) -> Self {
        Self {
            items_count,
            buffer: None,
        }
    }

    pub fn items_count(&self) -> usize {
        self.items_count
    }

    /// Allocates and pins a fresh zero-filled buffer, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Allocation failures are returned unchanged; the harness treats them as a
    /// failed iteration.
    pub fn setup(&mut self) -> Result<()> {
        self.buffer = None;
        self.buffer = Some(PinnedBuffer::new(self.items_count)?);
        debug!("iteration setup: {} items", self.items_count);
        Ok(())
    }

    /// Releases the buffer. Calling it without a prior setup is a no-op.
    pub fn cleanup(&mut self) {
        if self.buffer.take().is_some() {
            debug!("iteration cleanup");
        }
    }

    /// Runs `strategy` over the current buffer.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no buffer is set up.
    pub fn run(&mut self, strategy: Strategy) -> Result<()> {
        let buffer = self
            .buffer
            .as_mut()
            .ok_or_else(|| validation_error(format!("{strategy} ran before setup()")))?;

        strategy.apply(buffer);
        Ok(())
    }

    pub fn buffer(&self) -> Option<&PinnedBuffer> {
        self.buffer.as_ref()
    }

    pub fn buffer_mut(&mut self) -> Option<&mut PinnedBuffer> {
        self.buffer.as_mut()
    }

    /// Sets up a buffer and returns a guard that cleans it up when dropped,
    /// including on early return or unwinding.
    pub fn iteration(&mut self) -> Result<IterationGuard<'_>> {
        self.setup()?;
        Ok(IterationGuard { bench: self })
    }
}

/// Scoped setup/cleanup pair returned by [`VectorBenchmark::iteration`].
#[derive(Debug)]
pub struct IterationGuard<'a> {
    bench: &'a mut VectorBenchmark,
}

impl IterationGuard<'_> {
    pub fn run(&mut self, strategy: Strategy) -> Result<()> {
        self.bench.run(strategy)
    }

    pub fn buffer_mut(&mut self) -> &mut PinnedBuffer {
        // setup() succeeded before the guard was built and only Drop clears the buffer.
        match self.bench.buffer.as_mut() {
            Some(buffer) => buffer,
            None => unreachable!("iteration guard without a buffer"),
        }
    }
}

impl Drop for IterationGuard<'_> {
    fn drop(&mut self) {
        self.bench.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DoublerError;

    #[test]
    fn test_run_before_setup_is_rejected() {
        let mut bench = VectorBenchmark::new(16);
        let err = bench.run(Strategy::Traditional).unwrap_err();
        assert!(matches!(err, DoublerError::ValidationError { .. }));
        assert!(err.to_string().contains("Traditional"));
    }

    #[test]
    fn test_setup_run_cleanup() {
        let mut bench = VectorBenchmark::new(10);
        bench.setup().unwrap();
        bench.buffer_mut().unwrap().fill_with(|i| i as i32);
        bench.run(Strategy::VectorSize256X4ReorderedAligned).unwrap();

        let expected: Vec<i32> = (0..10).map(|i| 2 * i).collect();
        assert_eq!(&bench.buffer().unwrap()[..], &expected[..]);

        bench.cleanup();
        assert!(bench.buffer().is_none());
        bench.cleanup();
    }

    #[test]
    fn test_failed_setup_leaves_no_buffer() {
        let mut bench = VectorBenchmark::new(1 << 58);
        let err = bench.setup().unwrap_err();
        assert!(matches!(err, DoublerError::AllocationError { .. }));
        assert!(bench.buffer().is_none());
        assert!(bench.iteration().is_err());
        assert!(matches!(
            bench.run(Strategy::Traditional),
            Err(DoublerError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_setup_replaces_previous_buffer() {
        let mut bench = VectorBenchmark::new(4);
        bench.setup().unwrap();
        bench.buffer_mut().unwrap().fill_with(|_| 9);
        bench.setup().unwrap();
        assert!(bench.buffer().unwrap().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_guard_releases_buffer() {
        let mut bench = VectorBenchmark::new(8);
        {
            let mut guard = bench.iteration().unwrap();
            guard.buffer_mut().fill_with(|i| i as i32 - 4);
            guard.run(Strategy::RawPointers).unwrap();
            assert_eq!(&guard.buffer_mut()[..], &[-8, -6, -4, -2, 0, 2, 4, 6]);
        }
        assert!(bench.buffer().is_none());
    }

    #[test]
    fn test_guard_releases_buffer_on_panic() {
        let mut bench = VectorBenchmark::new(8);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = bench.iteration().unwrap();
            panic!("strategy failed");
        }));
        assert!(result.is_err());
        assert!(bench.buffer().is_none());
    }
}
