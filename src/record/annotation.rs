//! An annotation record.

use std::num::ParseIntError;
use std::str::FromStr;

/// The delimiter for an annotation record.
pub const ANNOTATION_DELIMITER: char = '\t';

/// The number of expected fields in an annotation record.
pub const NUM_ANNOTATION_FIELDS: usize = 4;

/// An error related to the parsing of an annotation record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the annotation line.
    IncorrectNumberOfFields(usize),
    /// An invalid start position.
    InvalidStart(ParseIntError),
    /// An invalid end position.
    InvalidEnd(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in annotation: expected {} fields, found {} fields",
                NUM_ANNOTATION_FIELDS, n
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {}", err),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {}", err),
        }
    }
}

impl std::error::Error for ParseError {}

/// A single line of a peak annotation file.
///
/// The line has four tab-delimited fields, in order: chromosome, start, end
/// and peak id. Coordinates follow the BED convention (0-based start,
/// exclusive end) but are not checked for consistency.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnnotationRecord {
    /// The chromosome name.
    chromosome: String,
    /// The 0-based start position.
    start: u64,
    /// The exclusive end position.
    end: u64,
    /// The peak identifier.
    peak_id: String,
}

impl AnnotationRecord {
    /// Creates a new [`AnnotationRecord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::record::AnnotationRecord;
    ///
    /// let record = AnnotationRecord::new("chr1", 100, 200, "p1");
    /// assert_eq!(record.chromosome(), "chr1");
    /// assert_eq!(record.peak_id(), "p1");
    /// ```
    pub fn new(
        chromosome: impl Into<String>,
        start: u64,
        end: u64,
        peak_id: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            peak_id: peak_id.into(),
        }
    }

    /// Returns the chromosome name.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Returns the 0-based start position.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::record::AnnotationRecord;
    ///
    /// let record = "chr1\t100\t200\tp1".parse::<AnnotationRecord>()?;
    /// assert_eq!(record.start(), 100);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the exclusive end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::record::AnnotationRecord;
    ///
    /// let record = "chr1\t100\t200\tp1".parse::<AnnotationRecord>()?;
    /// assert_eq!(record.end(), 200);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Returns the peak identifier.
    pub fn peak_id(&self) -> &str {
        &self.peak_id
    }
}

impl FromStr for AnnotationRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(ANNOTATION_DELIMITER).collect::<Vec<_>>();
        if parts.len() != NUM_ANNOTATION_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let start = parts[1].parse().map_err(ParseError::InvalidStart)?;
        let end = parts[2].parse().map_err(ParseError::InvalidEnd)?;

        Ok(Self::new(parts[0], start, end, parts[3]))
    }
}

impl std::fmt::Display for AnnotationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}{d}{}",
            self.chromosome,
            self.start,
            self.end,
            self.peak_id,
            d = ANNOTATION_DELIMITER
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_annotation_record() -> Result<(), Box<dyn std::error::Error>> {
        let record = "chr1\t100\t200\tp1".parse::<AnnotationRecord>()?;

        assert_eq!(record.chromosome(), "chr1");
        assert_eq!(record.start(), 100);
        assert_eq!(record.end(), 200);
        assert_eq!(record.peak_id(), "p1");

        Ok(())
    }

    #[test]
    fn test_coordinates_are_not_validated() -> Result<(), Box<dyn std::error::Error>> {
        let record = "chrUn\t500\t10\tpeak".parse::<AnnotationRecord>()?;

        assert_eq!(record.start(), 500);
        assert_eq!(record.end(), 10);

        Ok(())
    }

    #[test]
    fn test_invalid_number_of_fields() {
        let err = "chr1\t100\t200".parse::<AnnotationRecord>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of fields in annotation: expected 4 fields, found 3 fields"
        );

        let err = "chr1\t100\t200\tp1\textra"
            .parse::<AnnotationRecord>()
            .unwrap_err();
        assert!(matches!(err, ParseError::IncorrectNumberOfFields(5)));
    }

    #[test]
    fn test_space_delimited_line_is_rejected() {
        let err = "chr1 100 200 p1".parse::<AnnotationRecord>().unwrap_err();
        assert!(matches!(err, ParseError::IncorrectNumberOfFields(1)));
    }

    #[test]
    fn test_invalid_start() {
        let err = "chr1\tStart\t200\tp1"
            .parse::<AnnotationRecord>()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid start: invalid digit found in string");
    }

    #[test]
    fn test_invalid_end() {
        let err = "chr1\t100\t-5\tp1".parse::<AnnotationRecord>().unwrap_err();
        assert_eq!(err.to_string(), "invalid end: invalid digit found in string");
    }

    #[test]
    fn test_display() {
        let record = AnnotationRecord::new("chr2", 0, 15, "peak_7");
        assert_eq!(record.to_string(), "chr2\t0\t15\tpeak_7");
    }
}
