//! A binary to rescale the values of an existing viewpoint interaction
//! file without recomputing it from a contact matrix.
//!
//! ```shell
//! cargo run --release --bin=rescale-viewpoint --features=binaries -- \
//!     viewpoint.bed rescaled --smooth 5 --relative
//! ```
//!
//! It achieves this by carrying out the following:
//!
//! * Reading every record of the input interaction file (gzipped input is
//!   supported).
//! * Optionally smoothing the interaction values with a moving average
//!   and/or rescaling them to relative (sum-to-one) units.
//! * Writing the records back out with their locus columns and z-scores
//!   untouched and the values replaced.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use flate2::read::GzDecoder;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;
use virtual4c::format::interaction;
use virtual4c::viewpoint::normalize;
use virtual4c::viewpoint::smooth;

#[derive(Parser)]
struct Args {
    /// The interaction file to rescale (`.gz` inputs are decompressed on
    /// the fly).
    input: PathBuf,

    /// The output path prefix; `.bed` is appended.
    output: PathBuf,

    /// If desired, a moving-average window to smooth the values with.
    #[arg(short, long)]
    smooth: Option<usize>,

    /// Rescale the values to relative (sum-to-one) units.
    #[arg(short, long, default_value_t = false)]
    relative: bool,

    #[command(flatten)]
    verbose: Verbosity,
}

/// Opens a possibly gzipped interaction file for buffered reading.
fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file =
        File::open(path).with_context(|| format!("opening {}", path.display()))?;

    match path.extension().map(|ext| ext == "gz").unwrap_or(false) {
        true => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        false => Ok(Box::new(BufReader::new(file))),
    }
}

fn run(args: &Args) -> Result<()> {
    let mut reader = interaction::Reader::new(open(&args.input)?);

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .context("reading interaction records")?;
    let header = reader.header().context("reading the header")?.to_string();

    if records.is_empty() {
        bail!("no interaction records in {}", args.input.display());
    }

    info!("read {} interaction records", records.len());

    let mut values = records
        .iter()
        .map(|record| record.value())
        .collect::<Vec<_>>();

    if let Some(window_size) = args.smooth {
        values = smooth(&values, window_size).context("smoothing the values")?;
        info!("smoothed with a window of {window_size}");
    }

    if args.relative {
        let sum = values.iter().sum::<f64>();
        if sum == 0.0 {
            bail!("the values sum to zero and cannot be rescaled");
        }

        values = normalize(&values);
        info!("rescaled to relative units");
    }

    let mut path = args.output.as_os_str().to_os_string();
    path.push(interaction::OUTPUT_EXTENSION);
    let mut writer = BufWriter::new(
        File::create(&path).with_context(|| format!("creating {}", path.to_string_lossy()))?,
    );

    writeln!(writer, "#{header}")?;

    for (record, value) in records.iter().zip(values) {
        for field in record.locus() {
            write!(writer, "{field}{}", interaction::FIELD_DELIMITER)?;
        }

        writeln!(
            writer,
            "{}{d}{:.p$}{d}{:.p$}",
            record.relative_position(),
            value,
            record.z_score(),
            d = interaction::FIELD_DELIMITER,
            p = interaction::VALUE_PRECISION
        )?;
    }

    info!("wrote {}", path.to_string_lossy());

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    run(&args)
}
