//! The peak annotation table.

use std::collections::HashMap;
use std::io::BufRead;
use std::io::{self};

use crate::record::annotation;
use crate::record::AnnotationRecord;
use crate::Reader;

/// An error related to reading an [`AnnotationTable`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An invalid annotation record on the given line.
    Parse(usize, annotation::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(line_no, err) => write!(f, "parse error: {err}: line {line_no}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A table mapping peak identifiers to genomic intervals.
///
/// Records are kept in file order. Peak identifiers are expected to be
/// unique but this is not enforced: a repeated identifier keeps every one of
/// its records.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AnnotationTable {
    /// The records in file order.
    records: Vec<AnnotationRecord>,

    /// A lookup from peak identifier to the positions of its records.
    index: HashMap<String, Vec<usize>>,
}

impl AnnotationTable {
    /// Reads an annotation table from a [`Reader`].
    ///
    /// The input has no header. Blank lines are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::table::AnnotationTable;
    /// use peaks2bedgraph::Reader;
    ///
    /// let data = b"chr1\t100\t200\tp1\nchr1\t300\t400\tp2\n";
    /// let table = AnnotationTable::read_from(&mut Reader::new(&data[..]))?;
    ///
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.get("p2").next().unwrap().start(), 300);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_from<T>(reader: &mut Reader<T>) -> Result<Self>
    where
        T: BufRead,
    {
        let mut table = Self::default();

        for result in reader.lines() {
            let line = result.map_err(Error::Io)?;
            let record = line
                .text()
                .parse::<AnnotationRecord>()
                .map_err(|err| Error::Parse(line.number(), err))?;

            table.push(record);
        }

        Ok(table)
    }

    /// Appends a record to the table.
    pub fn push(&mut self, record: AnnotationRecord) {
        self.index
            .entry(record.peak_id().to_string())
            .or_default()
            .push(self.records.len());
        self.records.push(record);
    }

    /// Gets every record for a peak identifier in file order.
    ///
    /// The iterator is empty when the identifier is not annotated.
    pub fn get<'a>(&'a self, peak_id: &str) -> impl Iterator<Item = &'a AnnotationRecord> + 'a {
        self.index
            .get(peak_id)
            .into_iter()
            .flatten()
            .map(|i| &self.records[*i])
    }

    /// Returns whether a peak identifier is annotated.
    pub fn contains(&self, peak_id: &str) -> bool {
        self.index.contains_key(peak_id)
    }

    /// Gets the records in file order.
    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    /// Gets the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<AnnotationRecord> for AnnotationTable {
    fn from_iter<I: IntoIterator<Item = AnnotationRecord>>(iter: I) -> Self {
        let mut table = Self::default();

        for record in iter {
            table.push(record);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(data: &[u8]) -> Result<AnnotationTable> {
        AnnotationTable::read_from(&mut Reader::new(data))
    }

    #[test]
    fn test_read_annotation_table() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let table = read(b"chr1\t100\t200\tp1\n\nchr2\t300\t400\tp2\r\n")?;

        assert_eq!(table.len(), 2);
        assert!(table.contains("p1"));
        assert!(!table.contains("p3"));
        assert_eq!(table.records()[1], AnnotationRecord::new("chr2", 300, 400, "p2"));
        assert_eq!(table.get("p3").count(), 0);

        Ok(())
    }

    #[test]
    fn test_duplicate_peak_ids_are_kept_in_order() {
        let table = [
            AnnotationRecord::new("chr1", 1, 2, "p1"),
            AnnotationRecord::new("chr2", 3, 4, "p2"),
            AnnotationRecord::new("chr3", 5, 6, "p1"),
        ]
        .into_iter()
        .collect::<AnnotationTable>();

        let chromosomes = table
            .get("p1")
            .map(|record| record.chromosome())
            .collect::<Vec<_>>();
        assert_eq!(chromosomes, vec!["chr1", "chr3"]);
    }

    #[test]
    fn test_empty_input() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert!(read(b"")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let err = read(b"chr1\t100\t200\tp1\nChromosome\tStart\tEnd\tpeak_id\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error: invalid start: invalid digit found in string: line 2"
        );
    }

    #[test]
    fn test_wrong_number_of_fields() {
        let err = read(b"chr1\t100\t200\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(1, annotation::ParseError::IncorrectNumberOfFields(3))
        ));
    }
}
