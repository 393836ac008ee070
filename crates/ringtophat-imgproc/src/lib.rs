#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// pixelation area correction module.
pub mod correction;

/// error types module.
pub mod error;
pub use error::RingTophatError;

/// image correlation module.
pub mod filter;

/// binary structuring elements module.
pub mod morphology;

/// image border handling module.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;

/// ring background and significance module.
pub mod significance;

/// synthetic test images module.
pub mod synthetic;

/// tophat and ring correlation module.
pub mod tophat;
