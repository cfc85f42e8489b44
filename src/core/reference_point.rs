//! Reference points: the anchor loci that viewpoints are computed from.
//!
//! A reference point is commonly read from a tab-separated file where each
//! line carries either two fields (`chrom`, `position`) or three fields
//! (`chrom`, `start`, `end`). The two-field form describes a single
//! position, which is represented as a zero-width locus with
//! `start == end`.

use std::num::ParseIntError;
use std::str::FromStr;

/// The delimiter between fields of a reference point line.
pub const FIELD_DELIMITER: char = '\t';

/// An error associated with parsing a reference point.
#[derive(Debug)]
pub enum ParseError {
    /// The line held neither two nor three fields.
    InvalidNumberOfFields(usize),

    /// An invalid start position.
    InvalidStart(ParseIntError),

    /// An invalid end position.
    InvalidEnd(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidNumberOfFields(n) => write!(
                f,
                "invalid number of fields in reference point: expected 2 or 3 \
                 fields, found {n} fields"
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {err}"),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An anchor locus from which a viewpoint profile is computed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferencePoint {
    /// The name of the chromosome the locus falls on.
    chrom: String,

    /// The genomic start position of the locus.
    start: u64,

    /// The genomic end position of the locus.
    end: u64,
}

impl ReferencePoint {
    /// Creates a new [`ReferencePoint`].
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::core::ReferencePoint;
    ///
    /// let point = ReferencePoint::new("chr1", 100, 200);
    /// assert_eq!(point.chrom(), "chr1");
    /// assert_eq!(point.start(), 100);
    /// assert_eq!(point.end(), 200);
    /// ```
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Gets the name of the chromosome the locus falls on.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Gets the genomic start position of the locus.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Gets the genomic end position of the locus.
    pub fn end(&self) -> u64 {
        self.end
    }
}

impl std::fmt::Display for ReferencePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.chrom, FIELD_DELIMITER, self.start, FIELD_DELIMITER, self.end
        )
    }
}

impl FromStr for ReferencePoint {
    type Err = ParseError;

    /// Parses a [`ReferencePoint`] from a tab-separated line.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::core::ReferencePoint;
    ///
    /// let point = "chr1\t500".parse::<ReferencePoint>()?;
    /// assert_eq!(point.start(), 500);
    /// assert_eq!(point.end(), 500);
    ///
    /// let point = "chr1\t400\t600".parse::<ReferencePoint>()?;
    /// assert_eq!(point.start(), 400);
    /// assert_eq!(point.end(), 600);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split(FIELD_DELIMITER).collect::<Vec<_>>();

        let (chrom, start, end) = match fields[..] {
            [chrom, pos] => (chrom, pos, pos),
            [chrom, start, end] => (chrom, start, end),
            _ => return Err(ParseError::InvalidNumberOfFields(fields.len())),
        };

        let start = start.parse::<u64>().map_err(ParseError::InvalidStart)?;
        let end = end.parse::<u64>().map_err(ParseError::InvalidEnd)?;

        Ok(Self::new(chrom, start, end))
    }
}
