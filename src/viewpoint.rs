//! Computation of viewpoint (virtual 4C) profiles.
//!
//! A viewpoint profile is a one-dimensional slice of a two-dimensional
//! contact matrix: for an anchor locus and a genomic window around it, the
//! contact counts between every anchor bin and every window bin are summed,
//! and the (possibly multi-bin) anchor is collapsed into a single value.
//! The profile can then be smoothed ([`smooth()`]), rescaled to relative
//! units ([`normalize()`]), and addressed genomically as interaction
//! [`Record`](record::Record)s.
//!
//! All state other than the borrowed matrix is passed per call, so a single
//! matrix may back many independent viewpoint computations.

use nonempty::NonEmpty;

use crate::core::BinPosition;
use crate::core::BinRange;
use crate::core::ReferencePoint;
use crate::matrix::ContactMatrix;

pub mod normalize;
pub mod record;
pub mod smooth;

pub use normalize::normalize;
pub use record::Record;
pub use smooth::smooth;

/// An error related to computing a viewpoint.
#[derive(Debug)]
pub enum Error {
    /// The matrix does not know the given chromosome.
    UnknownChromosome(String),

    /// A genomic region that maps to no matrix bins.
    UnresolvableRegion {
        /// The name of the chromosome of the region.
        chrom: String,

        /// The genomic start position of the region.
        start: u64,

        /// The genomic end position of the region.
        end: u64,
    },

    /// The matrix returned no position for a bin index it reported.
    UnknownBin(usize),

    /// The requested window does not fully contain the anchor span.
    WindowTooSmall {
        /// The resolved anchor bin range.
        anchor: BinRange,

        /// The resolved window bin range.
        window: BinRange,
    },

    /// The supplied value vector does not match the number of positions in
    /// the collapsed window.
    ValueCountMismatch {
        /// The number of values the window calls for.
        expected: usize,

        /// The number of values supplied.
        found: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownChromosome(chrom) => {
                write!(f, "unknown chromosome: {chrom}")
            }
            Error::UnresolvableRegion { chrom, start, end } => {
                write!(f, "region maps to no bins: {chrom}:{start}-{end}")
            }
            Error::UnknownBin(index) => write!(f, "unknown bin index: {index}"),
            Error::WindowTooSmall { anchor, window } => write!(
                f,
                "window bins {window} do not fully contain anchor bins {anchor}"
            ),
            Error::ValueCountMismatch { expected, found } => write!(
                f,
                "expected {expected} interaction values, found {found}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A viewpoint computation over a borrowed, read-only contact matrix.
#[derive(Debug)]
pub struct Viewpoint<'a, M> {
    /// The contact matrix the viewpoint is computed from.
    matrix: &'a M,
}

impl<'a, M> Viewpoint<'a, M>
where
    M: ContactMatrix,
{
    /// Creates a new [`Viewpoint`] over the provided matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::Viewpoint;
    /// use virtual4c::matrix::Dense;
    ///
    /// let matrix = Dense::builder().bin("chr1", 0, 100).try_build()?;
    /// let viewpoint = Viewpoint::new(&matrix);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(matrix: &'a M) -> Self {
        Self { matrix }
    }

    /// Gets a reference to the underlying matrix.
    pub fn matrix(&self) -> &M {
        self.matrix
    }

    /// Resolves the anchor locus to its matrix bin range.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::Viewpoint;
    /// use virtual4c::core::ReferencePoint;
    /// use virtual4c::matrix::Dense;
    ///
    /// let matrix = Dense::builder()
    ///     .bin("chr1", 0, 100)
    ///     .bin("chr1", 100, 200)
    ///     .try_build()?;
    /// let viewpoint = Viewpoint::new(&matrix);
    ///
    /// let point = ReferencePoint::new("chr1", 100, 200);
    /// let anchor = viewpoint.anchor_bin_range(&point)?;
    ///
    /// assert_eq!(anchor.start(), 1);
    /// assert_eq!(anchor.end(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn anchor_bin_range(&self, point: &ReferencePoint) -> Result<BinRange> {
        self.region(point.chrom(), point.start(), point.end())
    }

    /// Resolves a genomic window to its matrix bin range.
    pub fn window_bin_range(&self, chrom: &str, start: u64, end: u64) -> Result<BinRange> {
        self.region(chrom, start, end)
    }

    /// Expands the anchor locus by upstream and downstream extents into a
    /// genomic window clipped to the chromosome.
    ///
    /// The window starts at `point.start() - upstream` (clipped to zero)
    /// and ends at `point.end() + downstream` (clipped to the last genomic
    /// position of the chromosome's final bin).
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::Viewpoint;
    /// use virtual4c::core::ReferencePoint;
    /// use virtual4c::matrix::Dense;
    ///
    /// let matrix = Dense::builder()
    ///     .bin("chr1", 0, 100)
    ///     .bin("chr1", 100, 200)
    ///     .bin("chr1", 200, 300)
    ///     .try_build()?;
    /// let viewpoint = Viewpoint::new(&matrix);
    ///
    /// let point = ReferencePoint::new("chr1", 150, 150);
    /// assert_eq!(viewpoint.expand(&point, 100, 100)?, (50, 250));
    /// assert_eq!(viewpoint.expand(&point, 500, 500)?, (0, 299));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn expand(&self, point: &ReferencePoint, upstream: u64, downstream: u64) -> Result<(u64, u64)> {
        let (_, end) = self
            .matrix
            .chromosome_bin_range(point.chrom())
            .ok_or_else(|| Error::UnknownChromosome(point.chrom().to_string()))?;

        let chrom_length = self.bin(end - 1)?.end();

        let region_start = point.start().saturating_sub(upstream);
        let region_end = point
            .end()
            .saturating_add(downstream)
            .min(chrom_length - 1);

        Ok((region_start, region_end))
    }

    /// Computes the aggregated viewpoint profile over a window on the
    /// anchor's chromosome.
    ///
    /// Contact counts between each anchor bin and each window bin are
    /// accumulated per window bin; multi-bin anchors contribute additively.
    /// The anchor span is then collapsed into a single summed value, so the
    /// returned vector holds `windowBins - anchorBins + 1` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::Viewpoint;
    /// use virtual4c::core::ReferencePoint;
    /// use virtual4c::matrix::Dense;
    ///
    /// let matrix = Dense::builder()
    ///     .bin("chr1", 0, 100)
    ///     .bin("chr1", 100, 200)
    ///     .bin("chr1", 200, 300)
    ///     .contact(1, 0, 5.0)
    ///     .contact(1, 1, 9.0)
    ///     .contact(1, 2, 3.0)
    ///     .try_build()?;
    /// let viewpoint = Viewpoint::new(&matrix);
    ///
    /// let point = ReferencePoint::new("chr1", 100, 200);
    /// let profile = viewpoint.profile(&point, 0, 300)?;
    ///
    /// assert_eq!(profile, [5.0, 9.0, 3.0]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn profile(&self, point: &ReferencePoint, window_start: u64, window_end: u64) -> Result<Vec<f64>> {
        let (anchor, window) = self.resolve(point, window_start, window_end)?;

        let mut raw = vec![0.0; window.count()];

        for row in anchor.start()..=anchor.end() {
            for (offset, column) in (window.start()..=window.end()).enumerate() {
                raw[offset] += self.matrix.contact(row, column);
            }
        }

        let before = anchor.start() - window.start();
        let span = anchor.count();

        let mut collapsed = Vec::with_capacity(raw.len() - span + 1);
        collapsed.extend_from_slice(&raw[..before]);
        collapsed.push(raw[before..before + span].iter().sum());
        collapsed.extend_from_slice(&raw[before + span..]);

        Ok(collapsed)
    }

    /// Builds genomically addressed interaction records for a collapsed
    /// profile over a window on the anchor's chromosome.
    ///
    /// Records are ordered by genomic position: every window bin strictly
    /// before the anchor, then the collapsed anchor (its target locus is
    /// the anchor's first bin), then every window bin strictly after it.
    /// The anchor locus spans from the first anchor bin's start to the last
    /// anchor bin's end.
    ///
    /// Relative positions reproduce the established convention of virtual
    /// 4C files: the first record carries `target.start - anchor.start`,
    /// and every subsequent record carries `target.end - anchor.end`. Each
    /// is recomputed from the bin's absolute coordinates, so offsets are
    /// negative upstream, near zero at the anchor, and positive downstream.
    ///
    /// `values` must hold exactly one value per record, i.e. the output of
    /// [`Viewpoint::profile`] for the same anchor and window (possibly
    /// smoothed or normalized).
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::Viewpoint;
    /// use virtual4c::core::ReferencePoint;
    /// use virtual4c::matrix::Dense;
    ///
    /// let matrix = Dense::builder()
    ///     .bin("chr1", 0, 100)
    ///     .bin("chr1", 100, 200)
    ///     .bin("chr1", 200, 300)
    ///     .contact(1, 0, 5.0)
    ///     .contact(1, 1, 9.0)
    ///     .contact(1, 2, 3.0)
    ///     .try_build()?;
    /// let viewpoint = Viewpoint::new(&matrix);
    ///
    /// let point = ReferencePoint::new("chr1", 100, 200);
    /// let profile = viewpoint.profile(&point, 0, 300)?;
    /// let records = viewpoint.records(&point, 0, 300, &profile)?;
    ///
    /// assert_eq!(records.len(), 3);
    /// assert_eq!(records.first().relative_position(), -100);
    /// assert_eq!(records.last().relative_position(), 100);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(
        &self,
        point: &ReferencePoint,
        window_start: u64,
        window_end: u64,
        values: &[f64],
    ) -> Result<NonEmpty<Record>> {
        let (anchor, window) = self.resolve(point, window_start, window_end)?;

        let expected = window.count() - anchor.count() + 1;
        if values.len() != expected {
            return Err(Error::ValueCountMismatch {
                expected,
                found: values.len(),
            });
        }

        let first = self.bin(anchor.start())?;
        let last = self.bin(anchor.end())?;
        let anchor_locus = BinPosition::new(first.chrom(), first.start(), last.end());

        let positions = (window.start()..anchor.start())
            .chain(std::iter::once(anchor.start()))
            .chain(anchor.end() + 1..=window.end());

        let mut records = Vec::with_capacity(expected);

        for (j, index) in positions.enumerate() {
            let target = self.bin(index)?;

            let relative_position = if j == 0 {
                target.start() as i64 - anchor_locus.start() as i64
            } else {
                target.end() as i64 - anchor_locus.end() as i64
            };

            records.push(Record::new(
                anchor_locus.clone(),
                target,
                relative_position,
                values[j],
            ));
        }

        // SAFETY: the window contains the anchor, so the anchor record
        // always exists.
        Ok(NonEmpty::from_vec(records)
            .unwrap_or_else(|| unreachable!("the anchor record is always present")))
    }

    /// Resolves the anchor and the window and checks that the window fully
    /// contains the anchor span.
    fn resolve(&self, point: &ReferencePoint, window_start: u64, window_end: u64) -> Result<(BinRange, BinRange)> {
        let anchor = self.anchor_bin_range(point)?;
        let window = self.window_bin_range(point.chrom(), window_start, window_end)?;

        if !window.contains(&anchor) {
            return Err(Error::WindowTooSmall { anchor, window });
        }

        Ok((anchor, window))
    }

    /// Resolves a genomic region through the matrix contract.
    fn region(&self, chrom: &str, start: u64, end: u64) -> Result<BinRange> {
        self.matrix
            .region_bin_range(chrom, start, end)
            .ok_or_else(|| Error::UnresolvableRegion {
                chrom: chrom.to_string(),
                start,
                end,
            })
    }

    /// Looks up the genomic span of a bin through the matrix contract.
    fn bin(&self, index: usize) -> Result<BinPosition> {
        self.matrix
            .bin_position(index)
            .ok_or(Error::UnknownBin(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Dense;

    fn single_bin_anchor_matrix() -> Dense {
        Dense::builder()
            .bin("chr1", 0, 100)
            .bin("chr1", 100, 200)
            .bin("chr1", 200, 300)
            .contact(1, 0, 5.0)
            .contact(1, 1, 9.0)
            .contact(1, 2, 3.0)
            .try_build()
            .unwrap()
    }

    // Rows 1 and 2 form the anchor; row 1 is [1, 2, 3, 4] and row 2 is
    // [5, 3, 6, 7] (the (1, 2) and (2, 1) cells coincide by symmetry).
    fn multi_bin_anchor_matrix() -> Dense {
        Dense::builder()
            .bin("chr1", 0, 100)
            .bin("chr1", 100, 200)
            .bin("chr1", 200, 300)
            .bin("chr1", 300, 400)
            .contact(1, 0, 1.0)
            .contact(1, 1, 2.0)
            .contact(1, 2, 3.0)
            .contact(1, 3, 4.0)
            .contact(2, 0, 5.0)
            .contact(2, 2, 6.0)
            .contact(2, 3, 7.0)
            .try_build()
            .unwrap()
    }

    #[test]
    fn test_single_bin_anchor_profile() {
        let matrix = single_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);
        let point = ReferencePoint::new("chr1", 100, 200);

        let profile = viewpoint.profile(&point, 0, 300).unwrap();

        // No merge happens for a single-bin anchor: the profile length
        // equals the window's bin count.
        assert_eq!(profile, [5.0, 9.0, 3.0]);
    }

    #[test]
    fn test_multi_bin_anchor_profile() {
        let matrix = multi_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);
        let point = ReferencePoint::new("chr1", 100, 300);

        let profile = viewpoint.profile(&point, 0, 400).unwrap();

        // Raw accumulation is [6, 5, 9, 11]; the two anchor bins collapse
        // into 5 + 9 = 14.
        assert_eq!(profile, [6.0, 14.0, 11.0]);

        // Collapsing conserves the total of the raw contributions.
        assert_eq!(profile.iter().sum::<f64>(), 31.0);
    }

    #[test]
    fn test_profile_length_for_k_bin_anchor() {
        let matrix = multi_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);
        let point = ReferencePoint::new("chr1", 100, 300);

        let window = viewpoint.window_bin_range("chr1", 0, 400).unwrap();
        let anchor = viewpoint.anchor_bin_range(&point).unwrap();
        let profile = viewpoint.profile(&point, 0, 400).unwrap();

        assert_eq!(profile.len(), window.count() - anchor.count() + 1);
    }

    #[test]
    fn test_records_for_single_bin_anchor() {
        let matrix = single_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);
        let point = ReferencePoint::new("chr1", 100, 200);

        let profile = viewpoint.profile(&point, 0, 300).unwrap();
        let records = viewpoint.records(&point, 0, 300, &profile).unwrap();

        let records = records.iter().collect::<Vec<_>>();
        assert_eq!(records.len(), 3);

        // First record: start-based offset.
        assert_eq!(records[0].target().start(), 0);
        assert_eq!(records[0].relative_position(), -100);
        assert_eq!(records[0].value(), 5.0);

        // All subsequent records: end-based offsets.
        assert_eq!(records[1].target().start(), 100);
        assert_eq!(records[1].relative_position(), 0);
        assert_eq!(records[1].value(), 9.0);

        assert_eq!(records[2].target().start(), 200);
        assert_eq!(records[2].relative_position(), 100);
        assert_eq!(records[2].value(), 3.0);

        for record in &records {
            assert_eq!(record.anchor().chrom(), "chr1");
            assert_eq!(record.anchor().start(), 100);
            assert_eq!(record.anchor().end(), 200);
        }
    }

    #[test]
    fn test_records_for_multi_bin_anchor() {
        let matrix = multi_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);
        let point = ReferencePoint::new("chr1", 100, 300);

        let profile = viewpoint.profile(&point, 0, 400).unwrap();
        let records = viewpoint.records(&point, 0, 400, &profile).unwrap();

        let records = records.iter().collect::<Vec<_>>();
        assert_eq!(records.len(), 3);

        // The merged anchor locus spans both anchor bins.
        assert_eq!(records[0].anchor().start(), 100);
        assert_eq!(records[0].anchor().end(), 300);

        // The collapsed anchor record targets the anchor's first bin, and
        // its end-based offset is measured against the merged locus end.
        assert_eq!(records[1].target().start(), 100);
        assert_eq!(records[1].target().end(), 200);
        assert_eq!(records[1].relative_position(), -100);
        assert_eq!(records[1].value(), 14.0);

        assert_eq!(records[0].relative_position(), -100);
        assert_eq!(records[2].relative_position(), 100);
        assert_eq!(records[2].value(), 11.0);
    }

    #[test]
    fn test_window_too_small() {
        let matrix = multi_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);
        let point = ReferencePoint::new("chr1", 100, 300);

        let err = viewpoint.profile(&point, 0, 150).unwrap_err();
        assert_eq!(
            err.to_string(),
            "window bins [0, 1] do not fully contain anchor bins [1, 2]"
        );

        // A window entirely upstream of the anchor fails the same way.
        let err = viewpoint.profile(&point, 0, 100).unwrap_err();
        assert!(matches!(err, Error::WindowTooSmall { .. }));
    }

    #[test]
    fn test_value_count_mismatch() {
        let matrix = single_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);
        let point = ReferencePoint::new("chr1", 100, 200);

        let err = viewpoint.records(&point, 0, 300, &[1.0, 2.0]).unwrap_err();
        assert_eq!(err.to_string(), "expected 3 interaction values, found 2");
    }

    #[test]
    fn test_unresolvable_region() {
        let matrix = single_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);

        let point = ReferencePoint::new("chr7", 100, 200);
        let err = viewpoint.profile(&point, 0, 300).unwrap_err();
        assert_eq!(err.to_string(), "region maps to no bins: chr7:100-200");
    }

    #[test]
    fn test_expand_is_clipped_to_the_chromosome() {
        let matrix = single_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);

        let point = ReferencePoint::new("chr1", 150, 150);
        assert_eq!(viewpoint.expand(&point, 100, 100).unwrap(), (50, 250));
        assert_eq!(viewpoint.expand(&point, 200, 500).unwrap(), (0, 299));

        let point = ReferencePoint::new("chrM", 150, 150);
        let err = viewpoint.expand(&point, 100, 100).unwrap_err();
        assert_eq!(err.to_string(), "unknown chromosome: chrM");
    }

    #[test]
    fn test_expanded_window_resolves_every_bin() {
        let matrix = single_bin_anchor_matrix();
        let viewpoint = Viewpoint::new(&matrix);
        let point = ReferencePoint::new("chr1", 150, 150);

        let (start, end) = viewpoint.expand(&point, 500, 500).unwrap();
        let window = viewpoint.window_bin_range("chr1", start, end).unwrap();

        assert_eq!(window.start(), 0);
        assert_eq!(window.end(), 2);
    }
}
