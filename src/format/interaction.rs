//! An interaction file reader and writer.
//!
//! An interaction file carries the genomically addressed records of one
//! computed viewpoint. The first line is a header (conventionally prefixed
//! with `#`); each subsequent data line is tab-separated, and the *last
//! three* columns are the signed relative position, the interaction value,
//! and a z-score. Any earlier columns are locus fields that this module
//! carries through opaquely.
//!
//! On the write side, [`Writer`] produces the canonical nine-column layout:
//! the anchor locus, the target locus, the relative position, and the
//! interaction value and z-score rendered with twelve decimal places.

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufWriter;
use std::io::Write;
use std::iter;
use std::num::ParseFloatError;
use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;

use crate::format;
use crate::viewpoint;

/// The delimiter between fields of an interaction line.
pub const FIELD_DELIMITER: char = '\t';

/// The number of required trailing fields in an interaction line.
pub const NUM_REQUIRED_FIELDS: usize = 3;

/// The extension appended to output file prefixes.
pub const OUTPUT_EXTENSION: &str = ".bed";

/// The number of decimal places values and z-scores are written with.
pub const VALUE_PRECISION: usize = 12;

/// An error associated with parsing an interaction record.
#[derive(Debug)]
pub enum ParseError {
    /// Fewer fields than required.
    IncorrectNumberOfFields(usize),

    /// An invalid relative position.
    InvalidRelativePosition(ParseIntError),

    /// An invalid interaction value.
    InvalidValue(ParseFloatError),

    /// An invalid z-score.
    InvalidZScore(ParseFloatError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in interaction record: expected at \
                 least {NUM_REQUIRED_FIELDS} fields, found {n} fields"
            ),
            ParseError::InvalidRelativePosition(err) => {
                write!(f, "invalid relative position: {err}")
            }
            ParseError::InvalidValue(err) => write!(f, "invalid value: {err}"),
            ParseError::InvalidZScore(err) => write!(f, "invalid z-score: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// One data line of an interaction file.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The locus fields preceding the three required columns, carried
    /// through opaquely.
    locus: Vec<String>,

    /// The signed relative position of the target from the anchor.
    relative_position: i64,

    /// The interaction value.
    value: f64,

    /// The z-score of the interaction value.
    z_score: f64,
}

impl Record {
    /// Gets the opaque locus fields of the record.
    pub fn locus(&self) -> &[String] {
        &self.locus
    }

    /// Gets the signed relative position of the target from the anchor.
    pub fn relative_position(&self) -> i64 {
        self.relative_position
    }

    /// Gets the interaction value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Gets the z-score of the interaction value.
    pub fn z_score(&self) -> f64 {
        self.z_score
    }
}

impl FromStr for Record {
    type Err = ParseError;

    /// Parses a [`Record`] from a tab-separated line, taking the relative
    /// position, value, and z-score from the last three columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::format::interaction::Record;
    ///
    /// let line = "chr1\t100\t200\tchr1\t0\t100\t-100\t5.0\t1.25";
    /// let record = line.parse::<Record>()?;
    ///
    /// assert_eq!(record.locus().len(), 6);
    /// assert_eq!(record.relative_position(), -100);
    /// assert_eq!(record.value(), 5.0);
    /// assert_eq!(record.z_score(), 1.25);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split(FIELD_DELIMITER).collect::<Vec<_>>();

        if fields.len() < NUM_REQUIRED_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(fields.len()));
        }

        let (locus, required) = fields.split_at(fields.len() - NUM_REQUIRED_FIELDS);

        let relative_position = required[0]
            .parse::<i64>()
            .map_err(ParseError::InvalidRelativePosition)?;
        let value = required[1].parse::<f64>().map_err(ParseError::InvalidValue)?;
        let z_score = required[2]
            .parse::<f64>()
            .map_err(ParseError::InvalidZScore)?;

        Ok(Self {
            locus: locus.iter().map(|field| field.to_string()).collect(),
            relative_position,
            value,
            z_score,
        })
    }
}

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An invalid interaction line.
    Parse(ParseError, String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(err, line) => {
                write!(f, "invalid interaction record: {err}\n\nline: {line}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// An interaction file reader.
///
/// The first line of the file is consumed as the header before any record
/// is read; a leading `#` is stripped from it.
#[derive(Clone, Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The header line, once consumed.
    header: Option<String>,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates an interaction file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::format::interaction::Reader;
    ///
    /// let data = b"#viewpoint chr1:100-200\nchr1\t100\t200\tchr1\t0\t100\t-100\t5.0\t1.25\n";
    /// let reader = Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            header: None,
        }
    }

    /// Gets the header line, consuming it from the underlying reader if it
    /// has not been read yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::format::interaction::Reader;
    ///
    /// let data = b"#viewpoint chr1:100-200\n";
    /// let mut reader = Reader::new(&data[..]);
    ///
    /// assert_eq!(reader.header()?, "viewpoint chr1:100-200");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn header(&mut self) -> Result<&str, Error> {
        self.ensure_header()?;

        // SAFETY: `ensure_header` always leaves the header set.
        Ok(self
            .header
            .as_deref()
            .unwrap_or_else(|| unreachable!("header was just ensured")))
    }

    /// Attempts to read the next [`Record`], skipping blank and comment
    /// lines. The header is consumed first if it has not been yet.
    pub fn read_record(&mut self, buffer: &mut String) -> Result<Option<Record>, Error> {
        self.ensure_header()?;

        loop {
            let read = format::read_line(&mut self.inner, buffer).map_err(Error::Io)?;

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
    /// use virtual4c::format::interaction::Reader;
    ///
    /// let data = b"#header\nchr1\t100\t200\tchr1\t0\t100\t-100\t5.0\t1.25\n";
    /// let mut reader = Reader::new(&data[..]);
    ///
    /// let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(records.len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record, Error>> + '_ {
        let mut buffer = String::new();

        iter::from_fn(move || self.read_record(&mut buffer).transpose())
    }

    /// Consumes the header line if it has not been consumed yet.
    fn ensure_header(&mut self) -> Result<(), Error> {
        if self.header.is_some() {
            return Ok(());
        }

        let mut buffer = String::new();
        format::read_line(&mut self.inner, &mut buffer).map_err(Error::Io)?;

        let header = buffer
            .strip_prefix(format::COMMENT_PREFIX)
            .unwrap_or(&buffer)
            .to_string();

        self.header = Some(header);
        Ok(())
    }
}

/// An interaction file writer.
#[derive(Debug)]
pub struct Writer<T>(T)
where
    T: Write;

impl Writer<BufWriter<File>> {
    /// Creates a file-backed writer, appending `.bed` to the provided
    /// path prefix.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use virtual4c::format::interaction::Writer;
    ///
    /// let writer = Writer::create("chr1_500")?;
    ///
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn create(prefix: impl AsRef<Path>) -> io::Result<Self> {
        let mut path = prefix.as_ref().as_os_str().to_os_string();
        path.push(OUTPUT_EXTENSION);

        Ok(Self(BufWriter::new(File::create(path)?)))
    }
}

impl<T> Writer<T>
where
    T: Write,
{
    /// Creates an interaction file writer.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::format::interaction::Writer;
    ///
    /// let mut writer = Writer::new(Vec::new());
    /// ```
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Consumes `self` and returns the inner writer.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Writes the header line, prefixed with `#`.
    pub fn write_header(&mut self, header: &str) -> io::Result<()> {
        writeln!(self.0, "{}{}", format::COMMENT_PREFIX, header)
    }

    /// Writes one viewpoint record together with its z-score.
    ///
    /// # Examples
    ///
    /// ```
    /// use virtual4c::core::bin::BinPosition;
    /// use virtual4c::format::interaction::Writer;
    /// use virtual4c::viewpoint::Record;
    ///
    /// let record = Record::new(
    ///     BinPosition::new("chr1", 100, 200),
    ///     BinPosition::new("chr1", 0, 100),
    ///     -100,
    ///     5.0,
    /// );
    ///
    /// let mut writer = Writer::new(Vec::new());
    /// writer.write_header("viewpoint chr1:100-200")?;
    /// writer.write_record(&record, 1.25)?;
    ///
    /// let written = String::from_utf8(writer.into_inner())?;
    /// assert_eq!(
    ///     written,
    ///     "#viewpoint chr1:100-200\n\
    ///      chr1\t100\t200\tchr1\t0\t100\t-100\t5.000000000000\t1.250000000000\n"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_record(&mut self, record: &viewpoint::Record, z_score: f64) -> io::Result<()> {
        writeln!(
            self.0,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{:.p$}{d}{:.p$}",
            record.anchor().chrom(),
            record.anchor().start(),
            record.anchor().end(),
            record.target().chrom(),
            record.target().start(),
            record.target().end(),
            record.relative_position(),
            record.value(),
            z_score,
            d = FIELD_DELIMITER,
            p = VALUE_PRECISION
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::core::BinPosition;

    use super::*;

    #[test]
    fn test_record_parsing_uses_the_last_three_columns() {
        let line = "chr1\t100\t200\tchr1\t200\t300\t100\t3.0\t0.5";
        let record = line.parse::<Record>().unwrap();

        assert_eq!(
            record.locus(),
            ["chr1", "100", "200", "chr1", "200", "300"]
        );
        assert_eq!(record.relative_position(), 100);
        assert_eq!(record.value(), 3.0);
        assert_eq!(record.z_score(), 0.5);
    }

    #[test]
    fn test_bare_record_with_no_locus_fields() {
        let record = "-100\t5.0\t1.0".parse::<Record>().unwrap();
        assert!(record.locus().is_empty());
        assert_eq!(record.relative_position(), -100);
    }

    #[test]
    fn test_too_few_fields() {
        let err = "1\t2.0".parse::<Record>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of fields in interaction record: expected at \
             least 3 fields, found 2 fields"
        );
    }

    #[test]
    fn test_header_is_consumed_before_records() {
        let data = b"#my header\n# a comment\nchr1\t0\t100\t-100\t5.0\t1.0\n";
        let mut reader = Reader::new(&data[..]);

        let records = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(reader.header().unwrap(), "my header");
    }

    #[test]
    fn test_create_appends_the_bed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("chr1_500");

        let mut writer = Writer::create(&prefix).unwrap();
        writer.write_header("viewpoint chr1:500").unwrap();
        drop(writer);

        assert!(dir.path().join("chr1_500.bed").exists());
    }

    #[test]
    fn test_round_trip_preserves_twelve_decimals() {
        let anchor = BinPosition::new("chr1", 100, 200);

        let records = vec![
            viewpoint::Record::new(anchor.clone(), BinPosition::new("chr1", 0, 100), -100, 5.0),
            viewpoint::Record::new(anchor.clone(), BinPosition::new("chr1", 100, 200), 0, 9.5),
            viewpoint::Record::new(anchor, BinPosition::new("chr1", 200, 300), 100, 3.25),
        ];
        let z_scores = [1.5, -0.25, 0.125];

        let mut writer = Writer::new(Vec::new());
        writer.write_header("viewpoint chr1:100-200").unwrap();

        for (record, z_score) in records.iter().zip(z_scores) {
            writer.write_record(record, z_score).unwrap();
        }

        let written = writer.into_inner();
        let mut reader = Reader::new(&written[..]);

        assert_eq!(reader.header().unwrap(), "viewpoint chr1:100-200");

        let read = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(read.len(), records.len());

        for ((read, record), z_score) in read.iter().zip(&records).zip(z_scores) {
            assert_eq!(read.relative_position(), record.relative_position());
            assert_eq!(read.value(), record.value());
            assert_eq!(read.z_score(), z_score);
        }
    }
}
