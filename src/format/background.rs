//! A background model file reader.
//!
//! Background files carry one line per relative position, tab-separated:
//! the signed relative position, the mean interaction value at that
//! offset, and its standard deviation. Additional trailing columns are
//! ignored. The records are typically collected into a map from relative
//! position to record.

use std::io;
use std::io::BufRead;
use std::iter;
use std::num::ParseFloatError;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::format;

/// The delimiter between fields of a background line.
pub const FIELD_DELIMITER: char = '\t';

/// The number of required fields in a background line.
pub const NUM_REQUIRED_FIELDS: usize = 3;

/// An error associated with parsing a background record.
#[derive(Debug)]
pub enum ParseError {
    /// Fewer fields than required.
    IncorrectNumberOfFields(usize),

    /// An invalid relative position.
    InvalidRelativePosition(ParseIntError),

    /// An invalid mean.
    InvalidMean(ParseFloatError),

    /// An invalid standard deviation.
    InvalidStdDev(ParseFloatError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in background record: expected at \
                 least {NUM_REQUIRED_FIELDS} fields, found {n} fields"
            ),
            ParseError::InvalidRelativePosition(err) => {
                write!(f, "invalid relative position: {err}")
            }
            ParseError::InvalidMean(err) => write!(f, "invalid mean: {err}"),
            ParseError::InvalidStdDev(err) => {
                write!(f, "invalid standard deviation: {err}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// One relative position of a background model.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The signed relative position the record describes.
    relative_position: i64,

    /// The mean interaction value at the relative position.
    mean: f64,

    /// The standard deviation of the interaction value.
    std_dev: f64,
}

impl Record {
    /// Gets the signed relative position the record describes.
    pub fn relative_position(&self) -> i64 {
        self.relative_position
    }

    /// Gets the mean interaction value at the relative position.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Gets the standard deviation of the interaction value.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl FromStr for Record {
    type Err = ParseError;

    /// Parses a [`Record`] from a tab-separated line.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::format::background::Record;
    ///
    /// let record = "-10000\t1.5\t0.25".parse::<Record>()?;
    ///
    /// assert_eq!(record.relative_position(), -10000);
    /// assert_eq!(record.mean(), 1.5);
    /// assert_eq!(record.std_dev(), 0.25);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(FIELD_DELIMITER);

        let mut next = |n: usize| {
            fields
                .next()
                .ok_or(ParseError::IncorrectNumberOfFields(n))
        };

        let relative_position = next(0)?
            .parse::<i64>()
            .map_err(ParseError::InvalidRelativePosition)?;
        let mean = next(1)?.parse::<f64>().map_err(ParseError::InvalidMean)?;
        let std_dev = next(2)?.parse::<f64>().map_err(ParseError::InvalidStdDev)?;

        Ok(Self {
            relative_position,
            mean,
            std_dev,
        })
    }
}

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An invalid background line.
    Parse(ParseError, String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(err, line) => {
                write!(f, "invalid background record: {err}\n\nline: {line}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A background model file reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a background model file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::format::background::Reader;
    ///
    /// let data = b"-10000\t1.5\t0.25\n0\t20.0\t4.0\n";
    /// let reader = Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Attempts to read the next [`Record`], skipping blank and comment
    /// lines.
    pub fn read_record(&mut self, buffer: &mut String) -> Result<Option<Record>, Error> {
        loop {
            let read = format::read_line(&mut self.0, buffer).map_err(Error::Io)?;

            if read == 0 {
                return Ok(None);
            }

            if format::is_skippable(buffer) {
                continue;
            }

            return buffer
                .parse::<Record>()
                .map(Some)
                .map_err(|e| Error::Parse(e, buffer.clone()));
        }
    }

    /// Returns an iterator over the records in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use virtual4c::format::background::Reader;
    ///
    /// let data = b"-10000\t1.5\t0.25\n0\t20.0\t4.0\n";
    /// let mut reader = Reader::new(&data[..]);
    ///
    /// let model = reader
    ///     .records()
    ///     .map(|result| result.map(|record| (record.relative_position(), record)))
    ///     .collect::<Result<HashMap<_, _>, _>>()?;
    ///
    /// assert_eq!(model.len(), 2);
    /// assert_eq!(model[&0].mean(), 20.0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record, Error>> + '_ {
        let mut buffer = String::new();

        iter::from_fn(move || self.read_record(&mut buffer).transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() {
        let record = "5000\t2.5\t0.5".parse::<Record>().unwrap();
        assert_eq!(record.relative_position(), 5000);
        assert_eq!(record.mean(), 2.5);
        assert_eq!(record.std_dev(), 0.5);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let record = "5000\t2.5\t0.5\textra".parse::<Record>().unwrap();
        assert_eq!(record.std_dev(), 0.5);
    }

    #[test]
    fn test_too_few_fields() {
        let err = "5000\t2.5".parse::<Record>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of fields in background record: expected at \
             least 3 fields, found 2 fields"
        );
    }

    #[test]
    fn test_invalid_numbers() {
        let err = "abc\t2.5\t0.5".parse::<Record>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidRelativePosition(_)));

        let err = "0\tx\t0.5".parse::<Record>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidMean(_)));

        let err = "0\t2.5\ty".parse::<Record>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidStdDev(_)));
    }

    #[test]
    fn test_reading_a_model() {
        let data = b"# background\n-1000\t1.0\t0.1\n0\t10.0\t2.0\n1000\t1.5\t0.2\n";
        let mut reader = Reader::new(&data[..]);

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].relative_position(), 0);
        assert_eq!(records[1].mean(), 10.0);
    }
}
