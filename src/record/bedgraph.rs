//! A BEDGRAPH record.

/// The delimiter for a BEDGRAPH record.
pub const BEDGRAPH_DELIMITER: char = '\t';

/// A single line of a BEDGRAPH track.
///
/// The record borrows its fields from the tables it was joined from and is
/// rendered (via [`Display`](std::fmt::Display)) as exactly four
/// tab-delimited fields: chromosome, start, end and value. Fields are
/// written verbatim with no quoting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BedGraphRecord<'a> {
    /// The chromosome name.
    chromosome: &'a str,
    /// The 0-based start position.
    start: u64,
    /// The exclusive end position.
    end: u64,
    /// The value, as it appeared in the value table.
    value: &'a str,
}

impl<'a> BedGraphRecord<'a> {
    /// Creates a new [`BedGraphRecord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::record::BedGraphRecord;
    ///
    /// let record = BedGraphRecord::new("chr1", 100, 200, "10");
    /// assert_eq!(record.to_string(), "chr1\t100\t200\t10");
    /// ```
    pub fn new(chromosome: &'a str, start: u64, end: u64, value: &'a str) -> Self {
        Self {
            chromosome,
            start,
            end,
            value,
        }
    }

    /// Returns the chromosome name.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::record::BedGraphRecord;
    ///
    /// let record = BedGraphRecord::new("chr1", 100, 200, "10");
    /// assert_eq!(record.chromosome(), "chr1");
    /// ```
    pub fn chromosome(&self) -> &'a str {
        self.chromosome
    }

    /// Returns the 0-based start position.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::record::BedGraphRecord;
    ///
    /// let record = BedGraphRecord::new("chr1", 100, 200, "10");
    /// assert_eq!(record.start(), 100);
    /// ```
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the exclusive end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::record::BedGraphRecord;
    ///
    /// let record = BedGraphRecord::new("chr1", 100, 200, "10");
    /// assert_eq!(record.end(), 200);
    /// ```
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Returns the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::record::BedGraphRecord;
    ///
    /// let record = BedGraphRecord::new("chr1", 100, 200, "10");
    /// assert_eq!(record.value(), "10");
    /// ```
    pub fn value(&self) -> &'a str {
        self.value
    }
}

impl std::fmt::Display for BedGraphRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}{d}{}",
            self.chromosome,
            self.start,
            self.end,
            self.value,
            d = BEDGRAPH_DELIMITER
        )
    }
}
