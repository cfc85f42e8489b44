//! A builder for a [`Dense`] matrix.

use std::collections::HashMap;

use nonempty::NonEmpty;
use rust_lapper as lapper;

use crate::core::BinPosition;
use crate::matrix::Dense;

/// The inner value of the bin lookup data structure.
type Iv = lapper::Interval<u64, usize>;

/// An error related to building a [`Dense`] matrix.
#[derive(Debug)]
pub enum Error {
    /// No bins were provided to the builder.
    Empty,

    /// A bin with a start position at or beyond its end position.
    EmptyBin(BinPosition),

    /// A bin that does not start at or after the end of the previous bin
    /// on the same chromosome.
    OutOfOrderBin(BinPosition),

    /// A chromosome whose bins are not laid out in one contiguous run of
    /// indices.
    FragmentedChromosome(String),

    /// A contact count was registered against a bin index that does not
    /// exist.
    ContactOutOfBounds {
        /// The row index of the contact.
        row: usize,

        /// The column index of the contact.
        column: usize,

        /// The number of bins in the matrix.
        bins: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Empty => write!(f, "no bins were provided"),
            Error::EmptyBin(bin) => write!(f, "bin covers no positions: {bin}"),
            Error::OutOfOrderBin(bin) => {
                write!(f, "bin overlaps or precedes the previous bin: {bin}")
            }
            Error::FragmentedChromosome(chrom) => {
                write!(f, "bins for chromosome {chrom} are not contiguous")
            }
            Error::ContactOutOfBounds { row, column, bins } => write!(
                f,
                "contact ({row}, {column}) falls outside of the {bins} \
                 registered bins"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Dense`] matrix.
///
/// Bins are appended in genomic order, grouped by chromosome; contact
/// counts are registered by bin index pair and mirrored across the
/// diagonal. Validation happens in [`Builder::try_build`].
#[derive(Debug, Default)]
pub struct Builder {
    /// The genomic span of every bin, in index order.
    bins: Vec<BinPosition>,

    /// The registered contact counts.
    contacts: Vec<(usize, usize, f64)>,
}

impl Builder {
    /// Appends a bin covering `[start, end)` of `chrom`.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::matrix::dense::Builder;
    ///
    /// let builder = Builder::default().bin("chr1", 0, 100).bin("chr1", 100, 200);
    /// ```
    pub fn bin(mut self, chrom: impl Into<String>, start: u64, end: u64) -> Self {
        self.bins.push(BinPosition::new(chrom, start, end));
        self
    }

    /// Registers a contact count between the bins at `row` and `column`.
    ///
    /// The count is mirrored to `(column, row)`. Registering the same pair
    /// twice keeps the last count.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::matrix::dense::Builder;
    ///
    /// let builder = Builder::default()
    ///     .bin("chr1", 0, 100)
    ///     .bin("chr1", 100, 200)
    ///     .contact(0, 1, 5.0);
    /// ```
    pub fn contact(mut self, row: usize, column: usize, count: f64) -> Self {
        self.contacts.push((row, column, count));
        self
    }

    /// Consumes `self` and attempts to build a [`Dense`] matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::matrix::dense::Builder;
    ///
    /// let matrix = Builder::default()
    ///     .bin("chr1", 0, 100)
    ///     .bin("chr1", 100, 200)
    ///     .contact(0, 1, 5.0)
    ///     .try_build()?;
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build(self) -> Result<Dense> {
        let bins = NonEmpty::from_vec(self.bins).ok_or(Error::Empty)?;
        let n = bins.len();

        let mut chromosomes = HashMap::<String, (usize, usize)>::new();
        let mut intervals = HashMap::<String, Vec<Iv>>::new();

        let mut current: Option<(String, usize)> = None;

        for (index, bin) in bins.iter().enumerate() {
            if bin.start() >= bin.end() {
                return Err(Error::EmptyBin(bin.clone()));
            }

            match current {
                Some((ref chrom, start)) if chrom.as_str() == bin.chrom() => {
                    // SAFETY: every index after the first is preceded by a
                    // bin, so indexing at `index - 1` always succeeds.
                    let previous = bins.get(index - 1).unwrap_or_else(|| {
                        unreachable!("a continued chromosome run has a previous bin")
                    });

                    if bin.start() < previous.end() {
                        return Err(Error::OutOfOrderBin(bin.clone()));
                    }

                    chromosomes.insert(chrom.clone(), (start, index + 1));
                }
                _ => {
                    if chromosomes.contains_key(bin.chrom()) {
                        return Err(Error::FragmentedChromosome(bin.chrom().to_string()));
                    }

                    chromosomes.insert(bin.chrom().to_string(), (index, index + 1));
                    current = Some((bin.chrom().to_string(), index));
                }
            }

            intervals.entry(bin.chrom().to_string()).or_default().push(Iv {
                start: bin.start(),
                stop: bin.end(),
                val: index,
            });
        }

        let mut counts = vec![0.0; n * n];

        for (row, column, count) in self.contacts {
            if row >= n || column >= n {
                return Err(Error::ContactOutOfBounds {
                    row,
                    column,
                    bins: n,
                });
            }

            counts[row * n + column] = count;
            counts[column * n + row] = count;
        }

        let mut lookup = HashMap::<String, lapper::Lapper<u64, usize>>::new();

        for (chrom, intervals) in intervals.into_iter() {
            lookup.insert(chrom, lapper::Lapper::new(intervals));
        }

        Ok(Dense {
            bins,
            chromosomes,
            lookup,
            counts,
        })
    }
}
