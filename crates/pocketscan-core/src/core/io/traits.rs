use crate::core::models::protein::Protein;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading a structure file format into heavy-atom records.
///
/// Implementors handle format-specific parsing; the path and string conveniences are
/// provided on top of [`StructureFile::read_from`].
pub trait StructureFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a protein from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the heavy atoms of the structure in file order. A file without any
    /// qualifying atom yields an empty [`Protein`], not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a record is malformed or the reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Protein, Self::Error>;

    /// Reads a protein from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Protein, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Reads a protein from in-memory file content.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    fn read_from_str(content: &str) -> Result<Protein, Self::Error> {
        let mut reader = content.as_bytes();
        Self::read_from(&mut reader)
    }
}
