//! Opening input tables from disk.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;

use crate::table::annotation;
use crate::table::value;
use crate::table::AnnotationTable;
use crate::table::ValueTable;
use crate::Reader;

/// The extension that marks a gzip-compressed input.
const GZIP_EXTENSION: &str = "gz";

/// An error related to loading an input table.
#[derive(Debug)]
pub enum Error {
    /// The input path does not exist.
    InputNotFound(PathBuf),

    /// The input path exists but could not be opened.
    Open(PathBuf, io::Error),

    /// The value table could not be read.
    ValueTable(PathBuf, value::Error),

    /// The annotation table could not be read.
    AnnotationTable(PathBuf, annotation::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InputNotFound(path) => write!(f, "input not found: {}", path.display()),
            Error::Open(path, err) => write!(f, "unable to open {}: {err}", path.display()),
            Error::ValueTable(path, err) => {
                write!(f, "invalid value table {}: {err}", path.display())
            }
            Error::AnnotationTable(path, err) => {
                write!(f, "invalid annotation table {}: {err}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Opens a file for reading as a [`Reader`].
///
/// Files ending in `.gz` are decompressed on the fly.
pub fn open(path: &Path) -> Result<Reader<Box<dyn BufRead>>> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::Open(path.to_path_buf(), err),
    })?;

    let inner: Box<dyn BufRead> = match path.extension() {
        Some(ext) if ext == GZIP_EXTENSION => Box::new(BufReader::new(GzDecoder::new(file))),
        _ => Box::new(BufReader::new(file)),
    };

    Ok(Reader::new(inner))
}

/// Loads a [`ValueTable`] from a path.
pub fn read_value_table(path: &Path) -> Result<ValueTable> {
    let mut reader = open(path)?;
    ValueTable::read_from(&mut reader).map_err(|err| Error::ValueTable(path.to_path_buf(), err))
}

/// Loads an [`AnnotationTable`] from a path.
pub fn read_annotation_table(path: &Path) -> Result<AnnotationTable> {
    let mut reader = open(path)?;
    AnnotationTable::read_from(&mut reader)
        .map_err(|err| Error::AnnotationTable(path.to_path_buf(), err))
}
