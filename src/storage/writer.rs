//! Whole-file persistence for calendars.
//!
//! Writing follows an open, write, close lifecycle over an exclusively
//! held destination file; reading is stateless and consumes one complete
//! document per call.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    Calendar,
    storage::json::{FormatError, JsonCalendar},
};

/// Marker state for a writer whose destination has not been opened.
#[derive(Debug, PartialEq, Eq)]
pub struct Unopened;

/// State for a writer holding an open destination file.
#[derive(Debug)]
pub struct Open {
    out: BufWriter<File>,
}

/// A writer that persists a calendar to a JSON file.
///
/// The destination is opened once, written as a single whole-file
/// overwrite, and released on close. There is no append mode and no
/// partial write: a successful [`save`] cycle leaves exactly one complete
/// document at the destination.
#[derive(Debug)]
pub struct JsonWriter<S> {
    destination: PathBuf,
    state: S,
}

impl JsonWriter<Unopened> {
    /// Creates a writer for the given destination path.
    #[must_use]
    pub const fn new(destination: PathBuf) -> Self {
        Self {
            destination,
            state: Unopened,
        }
    }

    /// Opens the destination for writing, truncating any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the destination cannot be created or
    /// opened for writing.
    pub fn open(self) -> Result<JsonWriter<Open>, ResourceError> {
        let file = File::create(&self.destination).map_err(|source| ResourceError {
            path: self.destination.clone(),
            source,
        })?;

        Ok(JsonWriter {
            destination: self.destination,
            state: Open {
                out: BufWriter::new(file),
            },
        })
    }
}

impl JsonWriter<Open> {
    /// Writes the calendar as one JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written to the open
    /// file.
    pub fn write(&mut self, calendar: &Calendar) -> io::Result<()> {
        JsonCalendar::from(calendar).write(&mut self.state.out)
    }

    /// Flushes buffered output and releases the destination file.
    ///
    /// # Errors
    ///
    /// Returns an error if buffered output cannot be flushed.
    pub fn close(mut self) -> io::Result<()> {
        self.state.out.flush()
    }

    /// The path this writer holds open.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Error opening a persistence source or destination.
#[derive(Debug, thiserror::Error)]
#[error("cannot open '{}': {source}", .path.display())]
pub struct ResourceError {
    /// The path that could not be opened.
    pub path: PathBuf,
    /// The underlying I/O error.
    #[source]
    pub source: io::Error,
}

/// Errors that can occur when loading a calendar from a file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source file does not exist.
    #[error("no calendar found at '{}'", .0.display())]
    NotFound(PathBuf),

    /// The source exists but could not be opened.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The source is not a well-formed calendar document.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors that can occur when saving a calendar to a file.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The destination could not be opened for writing.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The document could not be written or flushed.
    #[error("failed to write calendar: {0}")]
    Io(#[from] io::Error),
}

/// Loads a calendar from the JSON document at `path`.
///
/// Reading is stateless: one call consumes a complete document and
/// produces one calendar, or fails. Nothing is merged — on failure the
/// caller's previous calendar, if any, is untouched.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file does not exist,
/// [`LoadError::Resource`] if it exists but cannot be opened, and
/// [`LoadError::Format`] if its content is not a well-formed calendar
/// document.
pub fn load(path: &Path) -> Result<Calendar, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Resource(ResourceError {
            path: path.to_path_buf(),
            source,
        }),
    })?;

    let mut reader = BufReader::new(file);
    let document = JsonCalendar::read(&mut reader)?;
    Ok(Calendar::try_from(document)?)
}

/// Saves the calendar to `path` as one whole-file overwrite.
///
/// Convenience wrapper around the open, write, close cycle of
/// [`JsonWriter`].
///
/// # Errors
///
/// Returns [`SaveError::Resource`] if the destination cannot be opened and
/// [`SaveError::Io`] if writing or flushing fails.
pub fn save(path: &Path, calendar: &Calendar) -> Result<(), SaveError> {
    let mut writer = JsonWriter::new(path.to_path_buf()).open()?;
    writer.write(calendar)?;
    writer.close()?;
    Ok(())
}
