//! Genomically addressed interaction records.

use crate::core::BinPosition;

/// The delimiter between fields of a rendered record.
pub const FIELD_DELIMITER: char = '\t';

/// The number of decimal places interaction values are rendered with.
pub const VALUE_PRECISION: usize = 12;

/// One position of a viewpoint profile, addressed genomically.
///
/// A record pairs the anchor locus (with a multi-bin anchor merged into a
/// single span) with one target bin of the window, the signed relative
/// offset between the two, and the aggregated interaction value at that
/// position.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The merged anchor locus.
    anchor: BinPosition,

    /// The target bin.
    target: BinPosition,

    /// The signed genomic offset of the target from the anchor.
    relative_position: i64,

    /// The aggregated interaction value at the target.
    value: f64,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::core::bin::BinPosition;
    /// use virtual4c::viewpoint::Record;
    ///
    /// let record = Record::new(
    ///     BinPosition::new("chr1", 100, 200),
    ///     BinPosition::new("chr1", 0, 100),
    ///     -100,
    ///     5.0,
    /// );
    ///
    /// assert_eq!(record.relative_position(), -100);
    /// ```
    pub fn new(anchor: BinPosition, target: BinPosition, relative_position: i64, value: f64) -> Self {
        Self {
            anchor,
            target,
            relative_position,
            value,
        }
    }

    /// Gets the merged anchor locus.
    pub fn anchor(&self) -> &BinPosition {
        &self.anchor
    }

    /// Gets the target bin.
    pub fn target(&self) -> &BinPosition {
        &self.target
    }

    /// Gets the signed genomic offset of the target from the anchor.
    pub fn relative_position(&self) -> i64 {
        self.relative_position
    }

    /// Gets the aggregated interaction value at the target.
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{:.p$}",
            self.anchor.chrom(),
            self.anchor.start(),
            self.anchor.end(),
            self.target.chrom(),
            self.target.start(),
            self.target.end(),
            self.relative_position,
            self.value,
            d = FIELD_DELIMITER,
            p = VALUE_PRECISION
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let record = Record::new(
            BinPosition::new("chr1", 100, 200),
            BinPosition::new("chr1", 200, 300),
            100,
            3.5,
        );

        assert_eq!(
            record.to_string(),
            "chr1\t100\t200\tchr1\t200\t300\t100\t3.500000000000"
        );
    }
}
