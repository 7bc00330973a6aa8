use std::thread;

use once_cell::sync::Lazy;

use crate::error::{Result, SortError};
use crate::partition::VectorBackend;
use crate::pivot::PivotSum;

/// Ranges with fewer elements than this are sorted by plain recursion instead of new tasks.
pub const DEFAULT_CUTOFF: usize = 1000;

static AVAILABLE_THREADS: Lazy<usize> =
    Lazy::new(|| thread::available_parallelism().map_or(1, |n| n.get()));

/// Which partition kernel the drivers call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kernel {
    Scalar,
    #[default]
    Vector,
}

/// Parameters of one sort call.
///
/// Nothing in the sort reads process-wide state, every knob travels through this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// Size of the worker pool. `1` runs the sequential driver without a pool.
    pub threads: usize,
    /// See [`DEFAULT_CUTOFF`].
    pub cutoff: usize,
    pub kernel: Kernel,
    /// `None` picks the best backend the CPU supports.
    pub backend: Option<VectorBackend>,
    pub pivot_sum: PivotSum,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            threads: *AVAILABLE_THREADS,
            cutoff: DEFAULT_CUTOFF,
            kernel: Kernel::default(),
            backend: None,
            pivot_sum: PivotSum::default(),
        }
    }
}

impl SortConfig {
    pub fn sequential() -> Self {
        Self::default().with_threads(1)
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn with_backend(mut self, backend: VectorBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_pivot_sum(mut self, pivot_sum: PivotSum) -> Self {
        self.pivot_sum = pivot_sum;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(SortError::ZeroThreads);
        }

        if let Some(backend) = self.backend {
            if !backend.is_available() {
                return Err(SortError::BackendUnavailable(backend));
            }
        }

        Ok(())
    }

    /// The backend the vector kernel will use.
    pub fn resolved_backend(&self) -> VectorBackend {
        self.backend.unwrap_or_else(VectorBackend::detect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SortConfig::default();

        assert!(config.threads >= 1);
        assert_eq!(config.cutoff, 1000);
        assert_eq!(config.kernel, Kernel::Vector);
        assert_eq!(config.pivot_sum, PivotSum::Widened);
        assert!(config.validate().is_ok());
        assert!(config.resolved_backend().is_available());
    }

    #[test]
    fn rejects_zero_threads() {
        let config = SortConfig::default().with_threads(0);

        assert!(matches!(config.validate(), Err(SortError::ZeroThreads)));
    }

    #[test]
    fn builder() {
        let config = SortConfig::sequential()
            .with_cutoff(10)
            .with_kernel(Kernel::Scalar)
            .with_backend(VectorBackend::Portable)
            .with_pivot_sum(PivotSum::Wrapping);

        assert_eq!(config.threads, 1);
        assert_eq!(config.cutoff, 10);
        assert_eq!(config.kernel, Kernel::Scalar);
        assert_eq!(config.resolved_backend(), VectorBackend::Portable);
        assert_eq!(config.pivot_sum, PivotSum::Wrapping);
    }
}
