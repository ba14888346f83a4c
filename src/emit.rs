//! Writing value columns out as BEDGRAPH tracks.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::io::{self};
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::join::inner_join;
use crate::record::BedGraphRecord;
use crate::table::AnnotationTable;
use crate::table::ValueTable;

/// The extension given to every emitted track.
pub const BEDGRAPH_EXTENSION: &str = "bedgraph";

/// An error related to emitting a BEDGRAPH track.
#[derive(Debug)]
pub enum Error {
    /// The requested column is not part of the value table.
    UnknownColumn(String),

    /// The column name is not a plain file name (it is absolute, has a
    /// directory component, or refers to `.`/`..`), so its track would not
    /// land in the output directory.
    InvalidColumnName(String),

    /// The track could not be written to the given path.
    Write(PathBuf, io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownColumn(name) => write!(f, "unknown column: {name}"),
            Error::InvalidColumnName(name) => {
                write!(f, "column name is not a valid file name: {name}")
            }
            Error::Write(path, err) => write!(f, "unable to write {}: {err}", path.display()),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A BEDGRAPH writer.
#[derive(Debug)]
pub struct Writer<W>(W)
where
    W: Write;

impl<W> Writer<W>
where
    W: Write,
{
    /// Creates a BEDGRAPH writer.
    pub fn new(inner: W) -> Self {
        Self(inner)
    }

    /// Gets a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.0
    }

    /// Consumes self and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.0
    }

    /// Writes a single record followed by a newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use peaks2bedgraph::emit::Writer;
    /// use peaks2bedgraph::record::BedGraphRecord;
    ///
    /// let mut writer = Writer::new(Vec::new());
    /// writer.write_record(&BedGraphRecord::new("chr1", 100, 200, "10"))?;
    ///
    /// assert_eq!(writer.get_ref(), b"chr1\t100\t200\t10\n");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_record(&mut self, record: &BedGraphRecord<'_>) -> io::Result<()> {
        writeln!(self.0, "{record}")
    }

    /// Flushes the inner writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// What happened to a single column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Emission {
    /// The column holds the peak identifiers and was not written.
    Skipped,

    /// The column was written to disk.
    Written(Report),
}

/// A summary of a written track.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    /// The column name.
    column: String,

    /// The path of the track.
    path: PathBuf,

    /// The number of records written.
    records: usize,

    /// The peak identifiers dropped because they had no annotation.
    unmatched: Vec<String>,
}

impl Report {
    /// Gets the column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Gets the path of the track.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the number of records written.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Gets the peak identifiers dropped because they had no annotation.
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }
}

/// Gets the directory that holds a file, falling back to the current
/// directory for a bare file name.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use peaks2bedgraph::emit::output_directory;
///
/// assert_eq!(
///     output_directory(Path::new("data/atac/values.tsv")),
///     Path::new("data/atac")
/// );
/// assert_eq!(output_directory(Path::new("values.tsv")), Path::new("."));
/// ```
pub fn output_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Gets the path of the track for a column.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use peaks2bedgraph::emit::output_path;
///
/// assert_eq!(
///     output_path(Path::new("out"), "stageA"),
///     Path::new("out/stageA.bedgraph")
/// );
/// ```
pub fn output_path(output_dir: &Path, column_name: &str) -> PathBuf {
    output_dir.join(format!("{column_name}.{BEDGRAPH_EXTENSION}"))
}

/// Returns whether a column name is a single, plain path component.
fn is_plain_file_name(column_name: &str) -> bool {
    let mut components = Path::new(column_name).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => name == column_name,
        _ => false,
    }
}

/// Writes a single value column as a BEDGRAPH track.
///
/// The column is joined against the annotation (see
/// [`inner_join()`](crate::join::inner_join)) and written to
/// `<output_dir>/<column_name>.bedgraph`, replacing any existing file. The
/// output directory must already exist. Asking for the key column is a
/// no-op. A column whose name is not a plain file name is never written.
pub fn column_to_bedgraph(
    column_name: &str,
    values: &ValueTable,
    annotation: &AnnotationTable,
    output_dir: &Path,
) -> Result<Emission> {
    let column = values
        .column(column_name)
        .ok_or_else(|| Error::UnknownColumn(column_name.to_string()))?;

    if column.is_key() {
        return Ok(Emission::Skipped);
    }

    if !is_plain_file_name(column_name) {
        return Err(Error::InvalidColumnName(column_name.to_string()));
    }

    let join = inner_join(column, annotation);
    let path = output_path(output_dir, column_name);

    write_track(&path, join.records()).map_err(|err| Error::Write(path.clone(), err))?;

    Ok(Emission::Written(Report {
        column: column_name.to_string(),
        path,
        records: join.records().len(),
        unmatched: join.unmatched().iter().map(|id| id.to_string()).collect(),
    }))
}

/// Writes every column of the value table, in column order.
///
/// The iterator is lazy: each column is written when its item is pulled.
/// Tracks written before an error remain on disk.
pub fn emit_columns<'a>(
    values: &'a ValueTable,
    annotation: &'a AnnotationTable,
    output_dir: &'a Path,
) -> impl Iterator<Item = Result<Emission>> + 'a {
    values
        .columns()
        .iter()
        .map(move |name| column_to_bedgraph(name, values, annotation, output_dir))
}

/// Creates (or truncates) a file and writes the records to it.
fn write_track(path: &Path, records: &[BedGraphRecord<'_>]) -> io::Result<()> {
    let mut writer = File::create(path)
        .map(BufWriter::new)
        .map(Writer::new)?;

    for record in records {
        writer.write_record(record)?;
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;
    use crate::table::KEY_COLUMN;
    use crate::Reader;

    /// The value table from the two-stage example.
    const VALUES: &[u8] = b"peak_id\tstageA\tstageB\np1\t10\t20\np2\t30\t40\n";

    /// The annotation from the two-stage example.
    const ANNOTATION: &[u8] = b"chr1\t100\t200\tp1\nchr1\t300\t400\tp2\n";

    fn tables(values: &[u8], annotation: &[u8]) -> (ValueTable, AnnotationTable) {
        (
            ValueTable::read_from(&mut Reader::new(values)).unwrap(),
            AnnotationTable::read_from(&mut Reader::new(annotation)).unwrap(),
        )
    }

    fn written(dir: &Path) -> Vec<String> {
        let mut names = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[test]
    fn test_two_stages() {
        let dir = TempDir::new("emit").unwrap();
        let (values, annotation) = tables(VALUES, ANNOTATION);

        let emissions = emit_columns(&values, &annotation, dir.path())
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(emissions.len(), 3);
        assert_eq!(emissions[0], Emission::Skipped);
        assert_eq!(written(dir.path()), vec!["stageA.bedgraph", "stageB.bedgraph"]);

        assert_eq!(
            fs::read_to_string(dir.path().join("stageA.bedgraph")).unwrap(),
            "chr1\t100\t200\t10\nchr1\t300\t400\t30\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("stageB.bedgraph")).unwrap(),
            "chr1\t100\t200\t20\nchr1\t300\t400\t40\n"
        );
    }

    #[test]
    fn test_unmatched_key_is_dropped() {
        let dir = TempDir::new("emit").unwrap();
        let (values, annotation) = tables(
            b"peak_id\tstageA\tstageB\np1\t10\t20\np3\t50\t60\np2\t30\t40\n",
            ANNOTATION,
        );

        for result in emit_columns(&values, &annotation, dir.path()) {
            if let Emission::Written(report) = result.unwrap() {
                assert_eq!(report.records(), 2);
                assert_eq!(report.unmatched(), &[String::from("p3")]);

                let contents = fs::read_to_string(report.path()).unwrap();
                assert!(!contents.contains("50"));
                assert!(!contents.contains("60"));
                assert_eq!(contents.lines().count(), 2);
            }
        }
    }

    #[test]
    fn test_key_column_is_never_written() {
        let dir = TempDir::new("emit").unwrap();
        let (values, annotation) = tables(VALUES, ANNOTATION);

        let emission =
            column_to_bedgraph(KEY_COLUMN, &values, &annotation, dir.path()).unwrap();

        assert_eq!(emission, Emission::Skipped);
        assert!(written(dir.path()).is_empty());
    }

    #[test]
    fn test_format_fidelity() {
        let dir = TempDir::new("emit").unwrap();
        let (values, annotation) = tables(
            b"peak_id\tnotes\np1\tsay \"hi\", ok\np2\t1e-3\n",
            ANNOTATION,
        );

        let emission = column_to_bedgraph("notes", &values, &annotation, dir.path()).unwrap();
        let Emission::Written(report) = emission else {
            panic!("expected the column to be written");
        };

        let contents = fs::read_to_string(report.path()).unwrap();
        assert_eq!(contents, "chr1\t100\t200\tsay \"hi\", ok\nchr1\t300\t400\t1e-3\n");

        for line in contents.lines() {
            assert_eq!(line.split('\t').count(), 4);
        }
    }

    #[test]
    fn test_existing_track_is_replaced() {
        let dir = TempDir::new("emit").unwrap();
        let (values, annotation) = tables(VALUES, ANNOTATION);

        let path = dir.path().join("stageA.bedgraph");
        fs::write(&path, "stale\nstale\nstale\n").unwrap();

        column_to_bedgraph("stageA", &values, &annotation, dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "chr1\t100\t200\t10\nchr1\t300\t400\t30\n"
        );
    }

    #[test]
    fn test_column_names_cannot_leave_the_output_directory() {
        let out = TempDir::new("emit").unwrap();
        let elsewhere = TempDir::new("elsewhere").unwrap();
        let absolute = elsewhere.path().join("stageA");

        let header = format!(
            "peak_id\t{}\t../stageB\t./stageC\tsub/stageD\n",
            absolute.display()
        );
        let data = format!("{header}p1\t1\t2\t3\t4\n");
        let (values, annotation) = tables(data.as_bytes(), ANNOTATION);

        for name in values.value_columns() {
            let err = column_to_bedgraph(name, &values, &annotation, out.path()).unwrap_err();
            assert!(matches!(err, Error::InvalidColumnName(ref n) if n == name));
        }

        assert!(written(out.path()).is_empty());
        assert!(written(elsewhere.path()).is_empty());
        assert!(!out.path().parent().unwrap().join("stageB.bedgraph").exists());
    }

    #[test]
    fn test_plain_file_names() {
        assert!(is_plain_file_name("stageA"));
        assert!(is_plain_file_name("stage A.1"));
        assert!(is_plain_file_name("Unnamed: 3"));
        assert!(!is_plain_file_name("/tmp/x"));
        assert!(!is_plain_file_name("../x"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("."));
        assert!(!is_plain_file_name("a/"));
        assert!(!is_plain_file_name("a/b"));
    }

    #[test]
    fn test_unknown_column() {
        let dir = TempDir::new("emit").unwrap();
        let (values, annotation) = tables(VALUES, ANNOTATION);

        let err = column_to_bedgraph("stageZ", &values, &annotation, dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "unknown column: stageZ");
    }

    #[test]
    fn test_missing_output_directory() {
        let dir = TempDir::new("emit").unwrap();
        let missing = dir.path().join("does-not-exist");
        let (values, annotation) = tables(VALUES, ANNOTATION);

        let mut emissions = emit_columns(&values, &annotation, &missing);

        assert!(matches!(emissions.next(), Some(Ok(Emission::Skipped))));
        assert!(matches!(
            emissions.next(),
            Some(Err(Error::Write(ref path, _))) if *path == missing.join("stageA.bedgraph")
        ));
        assert!(!missing.exists());
    }

    #[test]
    fn test_output_directory() {
        assert_eq!(
            output_directory(Path::new("/data/values.tsv")),
            Path::new("/data")
        );
        assert_eq!(output_directory(Path::new("values.tsv")), Path::new("."));
        assert_eq!(output_directory(Path::new("./values.tsv")), Path::new("."));
        assert_eq!(
            output_directory(Path::new("a/b/values.tsv.gz")),
            Path::new("a/b")
        );
    }
}
