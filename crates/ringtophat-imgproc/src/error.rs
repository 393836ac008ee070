/// An error type for the ring and tophat operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RingTophatError {
    /// The radius is negative or not a finite number.
    #[error("Radius must be a finite non-negative number, got {0}")]
    InvalidRadius(f64),

    /// The inner radius of a ring is larger than its outer radius.
    #[error("Inner radius ({inner}) is larger than outer radius ({outer})")]
    InvertedRing {
        /// The requested inner radius.
        inner: usize,
        /// The requested outer radius.
        outer: usize,
    },

    /// The on region reaches into the off region.
    #[error("On region radius ({on}) must be smaller than the off region inner radius ({off_inner})")]
    OverlappingRegions {
        /// The on region radius.
        on: usize,
        /// The off region inner radius.
        off_inner: usize,
    },

    /// The provided kernel has no elements.
    #[error("Kernel is empty")]
    EmptyKernel,

    /// The kernel must have odd dimensions.
    #[error("Kernel must have odd dimensions, got {0}x{1}")]
    EvenSizedKernel(usize, usize),

    /// The kernel must be square.
    #[error("Kernel must be square, got {0}x{1}")]
    NonSquareKernel(usize, usize),

    /// The requested thread count is invalid.
    #[error("Thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The thread pool failed to build.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),

    /// Error when the array shape is not valid.
    #[error("Invalid shape")]
    InvalidShape(#[from] ndarray::ShapeError),
}
