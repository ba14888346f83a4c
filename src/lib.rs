//! `peaks2bedgraph` is a crate for turning per-peak signal tables into
//! BEDGRAPH tracks.
//!
//! The input is a pair of tab-delimited files:
//!
//! - A [value table](crate::table::ValueTable) with a header line. The
//!   `peak_id` column names each peak and every other column holds one value
//!   per peak for a single sample or stage.
//! - A headerless [annotation table](crate::table::AnnotationTable) with
//!   four columns (chromosome, start, end, peak id) placing each peak on the
//!   genome.
//!
//! Each value column is [inner-joined](crate::join::inner_join) against the
//! annotation on the peak id and [written](crate::emit::column_to_bedgraph)
//! as its own `<column>.bedgraph` track. Peaks without an annotation are
//! dropped from the tracks and reported back to the caller.
//!
//! ```
//! use peaks2bedgraph::emit;
//! use peaks2bedgraph::table::AnnotationTable;
//! use peaks2bedgraph::table::ValueTable;
//! use peaks2bedgraph::Reader;
//!
//! let values = b"peak_id\tstageA\tstageB\np1\t10\t20\np2\t30\t40\n";
//! let values = ValueTable::read_from(&mut Reader::new(&values[..]))?;
//!
//! let annotation = b"chr1\t100\t200\tp1\nchr1\t300\t400\tp2\n";
//! let annotation = AnnotationTable::read_from(&mut Reader::new(&annotation[..]))?;
//!
//! let column = values.column("stageA").unwrap();
//! let join = peaks2bedgraph::join::inner_join(column, &annotation);
//!
//! let mut writer = emit::Writer::new(Vec::new());
//! for record in join.records() {
//!     writer.write_record(record)?;
//! }
//!
//! assert_eq!(
//!     String::from_utf8(writer.into_inner())?,
//!     "chr1\t100\t200\t10\nchr1\t300\t400\t30\n"
//! );
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod emit;
pub mod input;
pub mod join;
pub mod reader;
pub mod record;
pub mod table;

pub use self::reader::Reader;
