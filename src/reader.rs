//! A line reader for tab-delimited tables.

use std::io::BufRead;
use std::io::{self};
use std::iter;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// A single, non-blank line read from a table along with its line number.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    /// The 1-based line number within the file.
    number: usize,

    /// The contents of the line without its terminator.
    text: String,
}

impl Line {
    /// Gets the 1-based line number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Gets the contents of the line.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A table reader.
#[derive(Clone, Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of lines read so far (including blank lines).
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a table reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"peak_id\tstageA\np1\t10\n";
    /// let reader = peaks2bedgraph::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Gets a mutable reference to the inner reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Read;
    ///
    /// let data = b"peak_id\tstageA\n";
    /// let mut reader = peaks2bedgraph::Reader::new(&data[..]);
    ///
    /// let mut buffer = [0; 7];
    /// reader.inner_mut().read_exact(&mut buffer)?;
    /// assert_eq!(&buffer, b"peak_id");
    ///
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Gets the number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// The line terminator (`\n` or `\r\n`) is removed. The return value is
    /// the number of bytes consumed, so `0` signals the end of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"peak_id\tstageA\r\np1\t10";
    /// let mut reader = peaks2bedgraph::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 16);
    /// assert_eq!(buffer, "peak_id\tstageA");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 5);
    /// assert_eq!(buffer, "p1\t10");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        let read = read_line(&mut self.inner, buffer)?;

        if read > 0 {
            self.line_no += 1;
        }

        Ok(read)
    }

    /// Returns an iterator over the non-blank [`Line`]s in the underlying
    /// reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chr1\t100\t200\tp1\n\nchr1\t300\t400\tp2\n";
    /// let mut reader = peaks2bedgraph::Reader::new(&data[..]);
    ///
    /// let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(lines.len(), 2);
    /// assert_eq!(lines[1].number(), 3);
    /// assert_eq!(lines[1].text(), "chr1\t300\t400\tp2");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn lines(&mut self) -> impl Iterator<Item = io::Result<Line>> + '_ {
        let mut buffer = String::new();

        iter::from_fn(move || loop {
            match self.read_line_raw(&mut buffer) {
                Ok(0) => return None,
                Ok(_) if buffer.is_empty() => continue,
                Ok(_) => {
                    return Some(Ok(Line {
                        number: self.line_no,
                        text: buffer.clone(),
                    }))
                }
                Err(e) => return Some(Err(e)),
            }
        })
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self { inner, line_no: 0 }
    }
}

/// Reads a line from a buffered reader, stripping the line terminator.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}
