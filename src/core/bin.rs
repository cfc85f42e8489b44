//! Matrix bins and ranges of matrix bins.
//!
//! A contact matrix partitions each chromosome into contiguous,
//! non-overlapping genomic bins. Bins are addressed by a single `usize`
//! index that increases with genomic coordinate. A [`BinRange`] addresses a
//! run of consecutive bins by its first and last index (both inclusive),
//! while a [`BinPosition`] describes the genomic span covered by one bin.

/// An error related to a [`BinRange`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The start index is greater than the end index.
    StartGreaterThanEnd(usize, usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StartGreaterThanEnd(start, end) => write!(
                f,
                "start bin index ({start}) is greater than end bin index ({end})"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// An inclusive range of consecutive matrix bin indices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BinRange {
    /// The first bin index in the range.
    start: usize,

    /// The last bin index in the range.
    end: usize,
}

impl BinRange {
    /// Attempts to create a new [`BinRange`].
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::core::bin::BinRange;
    ///
    /// let range = BinRange::try_new(2, 5)?;
    /// assert_eq!(range.start(), 2);
    /// assert_eq!(range.end(), 5);
    ///
    /// assert!(BinRange::try_new(5, 2).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: usize, end: usize) -> Result<Self, Error> {
        if start > end {
            return Err(Error::StartGreaterThanEnd(start, end));
        }

        Ok(Self { start, end })
    }

    /// Gets the first bin index in the range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Gets the last bin index in the range.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Gets the number of bins in the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::core::bin::BinRange;
    ///
    /// assert_eq!(BinRange::try_new(2, 5)?.count(), 4);
    /// assert_eq!(BinRange::try_new(3, 3)?.count(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Returns whether the provided range falls entirely within this range.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::core::bin::BinRange;
    ///
    /// let outer = BinRange::try_new(0, 9)?;
    /// let inner = BinRange::try_new(3, 4)?;
    ///
    /// assert!(outer.contains(&inner));
    /// assert!(!inner.contains(&outer));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn contains(&self, other: &BinRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl std::fmt::Display for BinRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// The genomic span covered by a single matrix bin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinPosition {
    /// The name of the chromosome the bin falls on.
    chrom: String,

    /// The genomic start position of the bin (inclusive).
    start: u64,

    /// The genomic end position of the bin (exclusive).
    end: u64,
}

impl BinPosition {
    /// Creates a new [`BinPosition`].
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::core::bin::BinPosition;
    ///
    /// let bin = BinPosition::new("chr1", 0, 10_000);
    /// assert_eq!(bin.chrom(), "chr1");
    /// assert_eq!(bin.start(), 0);
    /// assert_eq!(bin.end(), 10_000);
    /// ```
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Gets the name of the chromosome the bin falls on.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Gets the genomic start position of the bin (inclusive).
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Gets the genomic end position of the bin (exclusive).
    pub fn end(&self) -> u64 {
        self.end
    }
}

impl std::fmt::Display for BinPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bin_range() {
        let range = BinRange::try_new(1, 4).unwrap();
        assert_eq!(range.start(), 1);
        assert_eq!(range.end(), 4);
        assert_eq!(range.count(), 4);
        assert_eq!(range.to_string(), "[1, 4]");
    }

    #[test]
    fn test_invalid_bin_range() {
        let err = BinRange::try_new(4, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "start bin index (4) is greater than end bin index (1)"
        );
    }

    #[test]
    fn test_containment() {
        let outer = BinRange::try_new(2, 8).unwrap();

        assert!(outer.contains(&BinRange::try_new(2, 8).unwrap()));
        assert!(outer.contains(&BinRange::try_new(4, 4).unwrap()));
        assert!(!outer.contains(&BinRange::try_new(1, 4).unwrap()));
        assert!(!outer.contains(&BinRange::try_new(4, 9).unwrap()));
    }

    #[test]
    fn test_bin_position_display() {
        let bin = BinPosition::new("chr2", 5_000, 10_000);
        assert_eq!(bin.to_string(), "chr2:5000-10000");
    }
}
