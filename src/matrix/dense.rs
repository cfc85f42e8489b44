//! A dense, in-memory contact matrix.
//!
//! [`Dense`] is a symmetric reference implementation of the
//! [`ContactMatrix`] contract intended for small matrices, fixtures, and
//! tests. It is not a parser for any on-disk Hi-C format.

use std::collections::HashMap;

use nonempty::NonEmpty;
use rust_lapper as lapper;

use crate::core::BinPosition;
use crate::core::BinRange;
use crate::matrix::ContactMatrix;

pub mod builder;

pub use builder::Builder;

/// A dense, symmetric, in-memory contact matrix.
///
/// Generally, you will want to use a [`Builder`] to construct one of these.
#[derive(Debug)]
pub struct Dense {
    /// The genomic span of every bin, in index order.
    bins: NonEmpty<BinPosition>,

    /// The bin index range covered by each chromosome (start inclusive,
    /// end exclusive).
    chromosomes: HashMap<String, (usize, usize)>,

    /// Per-chromosome interval lookup from genomic position to bin index.
    lookup: HashMap<String, lapper::Lapper<u64, usize>>,

    /// The contact counts, row-major, `bin_count() * bin_count()` entries.
    counts: Vec<f64>,
}

impl Dense {
    /// Creates a [`Builder`] for a [`Dense`] matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::matrix::Dense;
    ///
    /// let matrix = Dense::builder()
    ///     .bin("chr1", 0, 100)
    ///     .bin("chr1", 100, 200)
    ///     .contact(0, 1, 5.0)
    ///     .try_build()?;
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Gets the total number of bins in the matrix.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }
}

impl ContactMatrix for Dense {
    fn bin_position(&self, index: usize) -> Option<BinPosition> {
        self.bins.get(index).cloned()
    }

    fn region_bin_range(&self, chrom: &str, start: u64, end: u64) -> Option<BinRange> {
        let lookup = self.lookup.get(chrom)?;

        // A zero-width query addresses the single bin containing `start`.
        let stop = if end > start {
            end
        } else {
            start.saturating_add(1)
        };

        let mut indices = lookup.find(start, stop).map(|interval| interval.val);

        let first = indices.next()?;
        let last = indices.last().unwrap_or(first);

        // SAFETY: lapper results are ordered by start position, and bins
        // are indexed in genomic order, so `first <= last` always holds.
        Some(BinRange::try_new(first, last).unwrap_or_else(|_| {
            unreachable!("bin indices increase with genomic coordinate")
        }))
    }

    fn chromosome_bin_range(&self, chrom: &str) -> Option<(usize, usize)> {
        self.chromosomes.get(chrom).copied()
    }

    /// Gets the contact count between the bins at `row` and `column`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    fn contact(&self, row: usize, column: usize) -> f64 {
        let n = self.bins.len();
        assert!(row < n && column < n, "bin index out of bounds");

        self.counts[row * n + column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Dense {
        Dense::builder()
            .bin("chr1", 0, 100)
            .bin("chr1", 100, 200)
            .bin("chr1", 200, 300)
            .bin("chr2", 0, 100)
            .contact(0, 1, 5.0)
            .contact(1, 1, 9.0)
            .contact(1, 2, 3.0)
            .try_build()
            .unwrap()
    }

    #[test]
    fn test_bin_position() {
        let matrix = matrix();

        assert_eq!(matrix.bin_count(), 4);
        assert_eq!(
            matrix.bin_position(1),
            Some(BinPosition::new("chr1", 100, 200))
        );
        assert_eq!(
            matrix.bin_position(3),
            Some(BinPosition::new("chr2", 0, 100))
        );
        assert_eq!(matrix.bin_position(4), None);
    }

    #[test]
    fn test_region_bin_range() {
        let matrix = matrix();

        // A half-open query ending exactly at a bin boundary does not pick
        // up the following bin.
        assert_eq!(
            matrix.region_bin_range("chr1", 100, 200),
            Some(BinRange::try_new(1, 1).unwrap())
        );
        assert_eq!(
            matrix.region_bin_range("chr1", 0, 300),
            Some(BinRange::try_new(0, 2).unwrap())
        );
        assert_eq!(
            matrix.region_bin_range("chr1", 50, 250),
            Some(BinRange::try_new(0, 2).unwrap())
        );

        // A zero-width query addresses the bin containing the position.
        assert_eq!(
            matrix.region_bin_range("chr1", 150, 150),
            Some(BinRange::try_new(1, 1).unwrap())
        );

        assert_eq!(matrix.region_bin_range("chr3", 0, 100), None);
        assert_eq!(matrix.region_bin_range("chr1", 300, 400), None);
    }

    #[test]
    fn test_chromosome_bin_range() {
        let matrix = matrix();

        assert_eq!(matrix.chromosome_bin_range("chr1"), Some((0, 3)));
        assert_eq!(matrix.chromosome_bin_range("chr2"), Some((3, 4)));
        assert_eq!(matrix.chromosome_bin_range("chr3"), None);
    }

    #[test]
    fn test_contact_is_symmetric() {
        let matrix = matrix();

        assert_eq!(matrix.contact(0, 1), 5.0);
        assert_eq!(matrix.contact(1, 0), 5.0);
        assert_eq!(matrix.contact(1, 1), 9.0);
        assert_eq!(matrix.contact(1, 2), 3.0);
        assert_eq!(matrix.contact(2, 1), 3.0);
        assert_eq!(matrix.contact(0, 3), 0.0);
    }

    #[test]
    #[should_panic(expected = "bin index out of bounds")]
    fn test_contact_out_of_bounds() {
        matrix().contact(0, 4);
    }
}
