//! The per-peak value table.
//!
//! A value table is a tab-delimited file with a header line. One of the
//! columns (named [`KEY_COLUMN`]) holds the peak identifier of each row and
//! every other column holds one value per peak for a single sample or stage.
//! Values are kept verbatim as text.

use std::collections::HashMap;
use std::io::BufRead;
use std::io::{self};

use nonempty::NonEmpty;

use crate::reader::Line;
use crate::Reader;

/// The name of the column holding the peak identifiers.
pub const KEY_COLUMN: &str = "peak_id";

/// The delimiter for a value table.
pub const VALUE_DELIMITER: char = '\t';

/// An error related to the parsing of a value table.
#[derive(Debug)]
pub enum ParseError {
    /// The input contained no header line.
    MissingHeader,

    /// The header on the given line has no [`KEY_COLUMN`].
    MissingKeyColumn(usize),

    /// A row has a different number of fields than the header.
    IncorrectNumberOfFields {
        /// The line number of the offending row.
        line_no: usize,
        /// The number of columns in the header.
        expected: usize,
        /// The number of fields found in the row.
        found: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingHeader => write!(f, "the value table has no header line"),
            ParseError::MissingKeyColumn(line_no) => write!(
                f,
                "missing key column \"{KEY_COLUMN}\" in header: line {line_no}"
            ),
            ParseError::IncorrectNumberOfFields {
                line_no,
                expected,
                found,
            } => write!(
                f,
                "invalid number of fields: expected {expected} fields, found {found} fields: \
                 line {line_no}"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to reading a [`ValueTable`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A table of values keyed by peak identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueTable {
    /// The column names in file order.
    columns: NonEmpty<String>,

    /// The position of [`KEY_COLUMN`] within `columns`.
    key_index: usize,

    /// The rows in file order. Every row has one field per column.
    rows: Vec<Vec<String>>,
}

impl ValueTable {
    /// Reads a value table from a [`Reader`].
    ///
    /// Blank lines are ignored. The first remaining line is the header.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::table::ValueTable;
    /// use peaks2bedgraph::Reader;
    ///
    /// let data = b"peak_id\tstageA\tstageB\np1\t10\t20\np2\t30\t40\n";
    /// let table = ValueTable::read_from(&mut Reader::new(&data[..]))?;
    ///
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(
    ///     table.value_columns().collect::<Vec<_>>(),
    ///     vec!["stageA", "stageB"]
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_from<T>(reader: &mut Reader<T>) -> Result<Self>
    where
        T: BufRead,
    {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(result) => result.map_err(Error::Io)?,
            None => return Err(Error::Parse(ParseError::MissingHeader)),
        };

        let (columns, key_index) = parse_header(&header).map_err(Error::Parse)?;

        let mut rows = Vec::new();

        for result in lines {
            let line = result.map_err(Error::Io)?;
            let fields = line
                .text()
                .split(VALUE_DELIMITER)
                .map(String::from)
                .collect::<Vec<_>>();

            if fields.len() != columns.len() {
                return Err(Error::Parse(ParseError::IncorrectNumberOfFields {
                    line_no: line.number(),
                    expected: columns.len(),
                    found: fields.len(),
                }));
            }

            rows.push(fields);
        }

        Ok(Self {
            columns,
            key_index,
            rows,
        })
    }

    /// Gets all of the column names, including [`KEY_COLUMN`], in file order.
    pub fn columns(&self) -> &NonEmpty<String> {
        &self.columns
    }

    /// Gets the names of the value columns (every column except
    /// [`KEY_COLUMN`]) in file order.
    pub fn value_columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.key_index)
            .map(|(_, name)| name.as_str())
    }

    /// Gets the peak identifiers in row order.
    pub fn peak_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|row| row[self.key_index].as_str())
    }

    /// Gets a view of a single column paired with the peak identifiers.
    ///
    /// Returns [`None`] if no column with that name exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::table::ValueTable;
    /// use peaks2bedgraph::Reader;
    ///
    /// let data = b"peak_id\tstageA\np1\t10\np2\t30\n";
    /// let table = ValueTable::read_from(&mut Reader::new(&data[..]))?;
    ///
    /// let column = table.column("stageA").unwrap();
    /// assert_eq!(
    ///     column.iter().collect::<Vec<_>>(),
    ///     vec![("p1", "10"), ("p2", "30")]
    /// );
    /// assert!(table.column("stageZ").is_none());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        let (index, name) = self
            .columns
            .iter()
            .enumerate()
            .find(|(_, column)| *column == name)?;

        Some(Column {
            name: name.as_str(),
            index,
            table: self,
        })
    }

    /// Gets the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single column of a [`ValueTable`] projected alongside the peak
/// identifiers.
#[derive(Clone, Copy, Debug)]
pub struct Column<'a> {
    /// The column name.
    name: &'a str,

    /// The position of the column within the table.
    index: usize,

    /// The table the column belongs to.
    table: &'a ValueTable,
}

impl<'a> Column<'a> {
    /// Gets the column name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns whether this is the [`KEY_COLUMN`].
    pub fn is_key(&self) -> bool {
        self.index == self.table.key_index
    }

    /// Returns an iterator over `(peak id, value)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let table = self.table;
        let key_index = table.key_index;
        let index = self.index;

        table
            .rows
            .iter()
            .map(move |row| (row[key_index].as_str(), row[index].as_str()))
    }
}

/// The prefix given to columns with an empty name.
const UNNAMED_PREFIX: &str = "Unnamed: ";

/// Parses the header line into the column names and the key column position.
///
/// Every column keeps a distinct, non-empty name. An empty name becomes
/// `Unnamed: <i>` (with `i` the 0-based position) and a repeated name gets a
/// `.<k>` suffix, counting up from `.1` past any name already taken.
fn parse_header(line: &Line) -> std::result::Result<(NonEmpty<String>, usize), ParseError> {
    let mut names = line
        .text()
        .split(VALUE_DELIMITER)
        .enumerate()
        .map(|(i, name)| match name {
            "" => format!("{UNNAMED_PREFIX}{i}"),
            _ => name.to_string(),
        })
        .collect::<Vec<_>>();

    let mut counts = HashMap::<String, usize>::new();

    for name in names.iter_mut() {
        let mut count = counts.get(name.as_str()).copied().unwrap_or_default();

        while count > 0 {
            counts.insert(name.clone(), count + 1);
            *name = format!("{name}.{count}");
            count = counts.get(name.as_str()).copied().unwrap_or_default();
        }

        counts.insert(name.clone(), count + 1);
    }

    let key_index = names
        .iter()
        .position(|name| name == KEY_COLUMN)
        .ok_or(ParseError::MissingKeyColumn(line.number()))?;

    let columns = NonEmpty::from_vec(names).ok_or(ParseError::MissingHeader)?;

    Ok((columns, key_index))
}
