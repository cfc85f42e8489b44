//! The read-only contract a contact matrix must satisfy.
//!
//! The viewpoint pipeline does not own or construct contact matrices; it
//! only needs a small capability set from whatever engine stores them:
//! mapping bin indices to genomic spans, mapping genomic regions to bin
//! index ranges, and looking up individual contact counts. Any storage
//! engine (dense array, sparse triplet store, file-backed store) that
//! implements [`ContactMatrix`] is interchangeable.
//!
//! A simple in-memory implementation is provided in [`dense`].

use crate::core::BinPosition;
use crate::core::BinRange;

pub mod dense;

pub use dense::Dense;

/// A read-only, binned genomic contact matrix.
///
/// Bins are contiguous, non-overlapping, and increase with genomic
/// coordinate; each bin is addressed by a single `usize` index shared by
/// both matrix axes.
pub trait ContactMatrix {
    /// Gets the genomic span covered by the bin at `index`, or [`None`] if
    /// no such bin exists.
    fn bin_position(&self, index: usize) -> Option<BinPosition>;

    /// Gets the range of bin indices overlapped by a genomic region, or
    /// [`None`] if the chromosome is unknown or no bin overlaps the region.
    ///
    /// The query is half-open (`start` inclusive, `end` exclusive), except
    /// that a zero-width query (`start == end`) addresses the single bin
    /// containing `start`.
    fn region_bin_range(&self, chrom: &str, start: u64, end: u64) -> Option<BinRange>;

    /// Gets the bin index range covered by a chromosome as
    /// `(start, end)` with `start` inclusive and `end` exclusive, or
    /// [`None`] if the chromosome is unknown.
    fn chromosome_bin_range(&self, chrom: &str) -> Option<(usize, usize)>;

    /// Gets the contact count between the bins at `row` and `column`.
    ///
    /// Implementations may panic if either index is out of bounds; callers
    /// are expected to derive indices from the matrix's own bin ranges.
    fn contact(&self, row: usize, column: usize) -> f64;
}
