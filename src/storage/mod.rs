//! Comment output
//!
//! Comments are written as line-delimited JSON: one flat object per line,
//! non-ASCII text kept as-is.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::Comment;

/// Line-delimited JSON writer
pub struct JsonLinesWriter<W: Write> {
    /// Underlying sink
    inner: W,

    /// Records written so far
    count: usize,
}

impl JsonLinesWriter<BufWriter<File>> {
    /// Create a writer for `path`, creating parent directories as needed
    ///
    /// # Example
    /// ```no_run
    /// use ytcomments::storage::JsonLinesWriter;
    /// use std::path::Path;
    ///
    /// let writer = JsonLinesWriter::create(Path::new("out/dQw4w9WgXcQ.json")).unwrap();
    /// ```
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::with_source(
                    format!("Failed to create output directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = File::create(path).map_err(|e| {
            Error::with_source(
                format!("Failed to create output file: {}", path.display()),
                e,
            )
        })?;

        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    /// Wrap an existing sink
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    /// Append one comment
    pub fn write(&mut self, comment: &Comment) -> Result<()> {
        self.write_record(comment)
    }

    /// Append any serializable record as one line
    pub fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.inner, record)?;
        self.inner.write_all(b"\n")?;
        self.count += 1;
        Ok(())
    }

    /// Records written so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flush and return the sink
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
