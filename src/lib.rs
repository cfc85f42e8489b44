//! `virtual4c` is a crate for deriving one-dimensional viewpoint
//! (virtual 4C) profiles from two-dimensional genomic contact matrices.
//!
//! The crate provides two main points of entry:
//!
//! - Computing viewpoint profiles from a contact matrix.
//! - Reading and writing the plain-text files that surround such a
//!   computation.
//!
//! ## Computing viewpoints
//!
//! A viewpoint is anchored at a reference locus
//! ([`core::ReferencePoint`]) and computed over a genomic window around
//! it. The computation never owns the matrix: any engine implementing the
//! read-only [`matrix::ContactMatrix`] contract can back it, and the
//! bundled [`matrix::Dense`] implementation covers in-memory use. Since
//! the matrix is borrowed immutably and all other state is per-call, one
//! matrix can back many independent viewpoint computations.
//!
//! The pipeline is:
//!
//! 1. [`Viewpoint::expand`] grows the anchor by upstream/downstream
//!    extents into a window clipped to the chromosome.
//! 2. [`Viewpoint::profile`] sums the contacts between every anchor bin
//!    and every window bin and collapses the anchor span into one value.
//! 3. Optionally, [`viewpoint::smooth()`] applies a moving average and
//!    [`viewpoint::normalize()`] rescales the profile to sum-to-one units.
//! 4. [`Viewpoint::records`] addresses each profile position genomically,
//!    with signed offsets relative to the anchor.
//!
//! ```
//! use virtual4c::Viewpoint;
//! use virtual4c::core::ReferencePoint;
//! use virtual4c::matrix::Dense;
//! use virtual4c::viewpoint::normalize;
//! use virtual4c::viewpoint::smooth;
//!
//! let matrix = Dense::builder()
//!     .bin("chr1", 0, 100)
//!     .bin("chr1", 100, 200)
//!     .bin("chr1", 200, 300)
//!     .contact(1, 0, 5.0)
//!     .contact(1, 1, 9.0)
//!     .contact(1, 2, 3.0)
//!     .try_build()?;
//!
//! let viewpoint = Viewpoint::new(&matrix);
//! let point = ReferencePoint::new("chr1", 100, 200);
//!
//! let (start, end) = viewpoint.expand(&point, 100, 100)?;
//! let profile = viewpoint.profile(&point, start, end)?;
//! assert_eq!(profile, [5.0, 9.0, 3.0]);
//!
//! let relative = normalize(&smooth(&profile, 1)?);
//! let records = viewpoint.records(&point, start, end, &relative)?;
//!
//! for record in records.iter() {
//!     println!("{record}");
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reading and writing viewpoint files
//!
//! The [`format`] module covers the three tab-separated formats of the
//! surrounding tool chain: reference point files
//! ([`format::reference_point`]), interaction files
//! ([`format::interaction`], read and write), and background models
//! ([`format::background`]). All readers work over any
//! [`BufRead`](std::io::BufRead).
//!
//! ```
//! use virtual4c::format::reference_point;
//!
//! let data = b"chr1\t500\nchr2\t400\t600\n";
//! let mut reader = reference_point::Reader::new(&data[..]);
//!
//! for result in reader.points() {
//!     let point = result?;
//!     println!("{point}");
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod core;
pub mod format;
pub mod matrix;
pub mod viewpoint;

pub use matrix::ContactMatrix;
pub use viewpoint::Viewpoint;
