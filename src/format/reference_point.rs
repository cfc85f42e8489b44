//! A reference point file reader.
//!
//! Reference point files carry one anchor locus per line, tab-separated,
//! with either two fields (`chrom`, `position`) or three fields (`chrom`,
//! `start`, `end`).

use std::io;
use std::io::BufRead;
use std::iter;

use crate::core::reference_point;
use crate::core::ReferencePoint;
use crate::format;

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An invalid reference point line.
    Parse(reference_point::ParseError, String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(err, line) => {
                write!(f, "invalid reference point: {err}\n\nline: {line}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A reference point file reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a reference point file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::format::reference_point::Reader;
    ///
    /// let data = b"chr1\t500\nchr2\t400\t600\n";
    /// let reader = Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Consumes `self` and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Attempts to read the next [`ReferencePoint`], skipping blank and
    /// comment lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::format::reference_point::Reader;
    ///
    /// let data = b"# anchors\nchr1\t500\n\nchr2\t400\t600\n";
    /// let mut reader = Reader::new(&data[..]);
    /// let mut buffer = String::new();
    ///
    /// let point = reader.read_point(&mut buffer)?.unwrap();
    /// assert_eq!(point.chrom(), "chr1");
    ///
    /// let point = reader.read_point(&mut buffer)?.unwrap();
    /// assert_eq!(point.chrom(), "chr2");
    ///
    /// assert!(reader.read_point(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_point(&mut self, buffer: &mut String) -> Result<Option<ReferencePoint>, Error> {
        loop {
            let read = format::read_line(&mut self.0, buffer).map_err(Error::Io)?;

            if read == 0 {
                return Ok(None);
            }

            if format::is_skippable(buffer) {
                continue;
            }

            return buffer
                .parse::<ReferencePoint>()
                .map(Some)
                .map_err(|e| Error::Parse(e, buffer.clone()));
        }
    }

    /// Returns an iterator over the reference points in the underlying
    /// reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::format::reference_point::Reader;
    ///
    /// let data = b"chr1\t500\nchr2\t400\t600\n";
    /// let mut reader = Reader::new(&data[..]);
    ///
    /// let points = reader
    ///     .points()
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(points.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn points(&mut self) -> impl Iterator<Item = Result<ReferencePoint, Error>> + '_ {
        let mut buffer = String::new();

        iter::from_fn(move || self.read_point(&mut buffer).transpose())
    }
}
