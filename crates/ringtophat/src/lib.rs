#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use ringtophat_imgproc as imgproc;

pub use ringtophat_imgproc::correction::{disk_pixel_correction, ring_pixel_correction};
pub use ringtophat_imgproc::morphology::{disk, ring, StructuringElement};
pub use ringtophat_imgproc::padding::BoundaryMode;
pub use ringtophat_imgproc::tophat::{ring_correlate, tophat_correlate};
pub use ringtophat_imgproc::RingTophatError;
