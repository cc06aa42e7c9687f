//! Frame-driven animations.

mod shimmer;

pub use shimmer::Shimmer;
