//! Scratch file holding an upload while the PDF reader works on it

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Uniquely named on-disk copy of an upload
///
/// Dropping the value deletes the file, so every early return and panic
/// releases it. `release` deletes it explicitly and reports failures.
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Write `bytes` to a new `upload-*.pdf` file in `dir` (system temp dir if `None`)
    pub fn create(dir: Option<&Path>, bytes: &[u8]) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("upload-").suffix(".pdf");

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, surfacing the error instead of ignoring it
    pub fn release(self) -> io::Result<()> {
        self.file.close()
    }
}
