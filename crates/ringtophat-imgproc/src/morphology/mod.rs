//! Binary structuring elements for ring and tophat correlations.

mod element;
pub use element::{disk, index_grid, ring, Run, StructuringElement};

mod radius;
pub use radius::Radius;
