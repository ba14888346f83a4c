//! Joining a value column against the peak annotation.

use crate::record::BedGraphRecord;
use crate::table::AnnotationTable;
use crate::table::Column;

/// The result of an inner join between a value column and an
/// [`AnnotationTable`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Join<'a> {
    /// The joined records.
    records: Vec<BedGraphRecord<'a>>,

    /// The peak identifiers (in row order) that had no annotation.
    unmatched: Vec<&'a str>,
}

impl<'a> Join<'a> {
    /// Gets the joined records.
    pub fn records(&self) -> &[BedGraphRecord<'a>] {
        &self.records
    }

    /// Gets the peak identifiers that were dropped because they had no
    /// annotation.
    pub fn unmatched(&self) -> &[&'a str] {
        &self.unmatched
    }

    /// Consumes self and returns the joined records.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::join::inner_join;
    /// use peaks2bedgraph::table::AnnotationTable;
    /// use peaks2bedgraph::table::ValueTable;
    /// use peaks2bedgraph::Reader;
    ///
    /// let values = b"peak_id\tstageA\np1\t10\n";
    /// let values = ValueTable::read_from(&mut Reader::new(&values[..]))?;
    ///
    /// let annotation = b"chr1\t100\t200\tp1\nchr2\t5\t15\tp1\n";
    /// let annotation = AnnotationTable::read_from(&mut Reader::new(&annotation[..]))?;
    ///
    /// let records = inner_join(values.column("stageA").unwrap(), &annotation).into_records();
    /// assert_eq!(records.len(), 2);
    /// assert_eq!(records[1].chromosome(), "chr2");
    /// assert_eq!(records[1].value(), "10");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn into_records(self) -> Vec<BedGraphRecord<'a>> {
        self.records
    }
}

/// Inner-joins a value column against the annotation on the peak identifier.
///
/// Rows come out in value-table order. A peak annotated more than once yields
/// one record per annotation (in annotation order), and a repeated peak in the
/// value table is joined each time it appears. Rows whose peak has no
/// annotation are dropped and reported through [`Join::unmatched()`].
///
/// # Examples
///
/// ```
/// use peaks2bedgraph::join::inner_join;
/// use peaks2bedgraph::table::AnnotationTable;
/// use peaks2bedgraph::table::ValueTable;
/// use peaks2bedgraph::Reader;
///
/// let values = b"peak_id\tstageA\np1\t10\np3\t50\n";
/// let values = ValueTable::read_from(&mut Reader::new(&values[..]))?;
///
/// let annotation = b"chr1\t100\t200\tp1\n";
/// let annotation = AnnotationTable::read_from(&mut Reader::new(&annotation[..]))?;
///
/// let join = inner_join(values.column("stageA").unwrap(), &annotation);
/// assert_eq!(join.records().len(), 1);
/// assert_eq!(join.records()[0].to_string(), "chr1\t100\t200\t10");
/// assert_eq!(join.unmatched(), &["p3"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn inner_join<'a>(column: Column<'a>, annotation: &'a AnnotationTable) -> Join<'a> {
    let mut join = Join::default();

    for (peak_id, value) in column.iter() {
        let before = join.records.len();

        join.records.extend(annotation.get(peak_id).map(|record| {
            BedGraphRecord::new(record.chromosome(), record.start(), record.end(), value)
        }));

        if join.records.len() == before {
            join.unmatched.push(peak_id);
        }
    }

    join
}
