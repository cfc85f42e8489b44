//! Core functionality used across the crate.

pub mod bin;
pub mod reference_point;

pub use bin::BinPosition;
pub use bin::BinRange;
pub use reference_point::ReferencePoint;
