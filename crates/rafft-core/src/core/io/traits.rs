use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for line-oriented text formats read and written by
/// the library.
///
/// Implementors only provide the reader- and writer-based methods; the
/// path-based helpers wrap them with buffered file handles.
pub trait TextFormat: Sized {
    /// The error type for I/O and parsing failures.
    type Error: Error + From<io::Error>;

    /// Parses a value from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is malformed or reading fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error>;

    /// Serializes the value to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a value from a file path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes the value to a file path, creating or truncating the file.
    fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
