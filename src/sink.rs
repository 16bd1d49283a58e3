use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::model::error::LogError;

/// Text encoding applied to every line before it reaches the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl Encoding {
    /// Returns `None` when `text` holds a character this encoding cannot
    /// represent.
    pub fn encode<'a>(self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        match self {
            Encoding::Utf8 => Some(Cow::Borrowed(text.as_bytes())),
            Encoding::Ascii => text.is_ascii().then_some(Cow::Borrowed(text.as_bytes())),
            Encoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).ok())
                .collect::<Option<Vec<u8>>>()
                .map(Cow::Owned),
        }
    }
}

/// Append-only file handle shared by every handler built on top of it.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    encoding: Encoding,
    file: Mutex<File>,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Self::open_with_encoding(path, Encoding::default())
    }

    pub fn open_with_encoding(path: impl AsRef<Path>, encoding: Encoding) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::CannotCreateFile {
                path: path.clone(),
                source,
            })?;

        Ok(FileSink {
            path,
            encoding,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Appends `text` to the file. Text the encoding rejects and failed
    /// writes are dropped; logging never fails the caller.
    pub fn write(&self, text: &str) {
        let Some(bytes) = self.encoding.encode(text) else {
            return;
        };

        // One write_all per line under the lock keeps lines whole.
        let mut file = self.file.lock();
        let _ = file.write_all(&bytes);
    }
}
