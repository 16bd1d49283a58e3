use std::path::Path;
use std::sync::Arc;

use crate::model::error::LogError;
use crate::model::level::Level;
use crate::model::metadata::{self, Metadata, MetadataValue};
use crate::sink::{Encoding, FileSink};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Where a log statement came from. Handlers receive it with every call
/// but are free to ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location<'a> {
    pub source: &'a str,
    pub file: &'a str,
    pub function: &'a str,
    pub line: u32,
}

/// Backend contract the logging front end dispatches to.
///
/// Implementations do not filter by level; deciding whether a call reaches
/// `log` is the caller's job.
pub trait LogHandler: Send + Sync {
    fn log(&self, level: Level, message: &str, metadata: Option<&Metadata>, location: &Location<'_>);

    fn log_level(&self) -> Level;

    fn set_log_level(&mut self, level: Level);

    fn metadata(&self) -> &Metadata;

    fn set_metadata(&mut self, metadata: Metadata);

    fn metadata_value(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata().get(key)
    }

    fn set_metadata_value(&mut self, key: &str, value: Option<MetadataValue>);
}

/// Fallible half of handler construction: owns the opened sink and hands out
/// handlers bound to it.
#[derive(Debug, Clone)]
pub struct FileLogging {
    sink: Arc<FileSink>,
}

impl FileLogging {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Self::open_with_encoding(path, Encoding::default())
    }

    pub fn open_with_encoding(path: impl AsRef<Path>, encoding: Encoding) -> Result<Self, LogError> {
        let sink = FileSink::open_with_encoding(path, encoding)?;
        Ok(FileLogging {
            sink: Arc::new(sink),
        })
    }

    pub fn handler(&self, label: impl Into<String>) -> FileLogHandler {
        FileLogHandler {
            label: label.into(),
            log_level: Level::default(),
            metadata: Metadata::new(),
            pretty_metadata: None,
            sink: Arc::clone(&self.sink),
        }
    }

    pub fn sink(&self) -> &FileSink {
        &self.sink
    }
}

/// Formats log calls as single lines and appends them to a file.
///
/// Clones share the underlying file but carry their own label, level and
/// metadata.
#[derive(Debug, Clone)]
pub struct FileLogHandler {
    label: String,
    log_level: Level,
    metadata: Metadata,
    pretty_metadata: Option<String>,
    sink: Arc<FileSink>,
}

impl FileLogHandler {
    pub fn new(label: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, LogError> {
        Ok(FileLogging::open(path)?.handler(label))
    }

    /// Re-binds this handler to `label`. Lines already written keep the old
    /// label; metadata and level are untouched.
    pub fn bind(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pretty_metadata(&self) -> Option<&str> {
        self.pretty_metadata.as_deref()
    }

    pub fn sink(&self) -> &FileSink {
        &self.sink
    }

    fn refresh_pretty_metadata(&mut self) {
        self.pretty_metadata = metadata::pretty(&self.metadata);
    }

    fn format_line(&self, level: Level, message: &str, pretty: Option<&str>) -> String {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        match pretty {
            Some(pretty) => format!("{} {} {} : {} {}\n", timestamp, level, self.label, pretty, message),
            None => format!("{} {} {} : {}\n", timestamp, level, self.label, message),
        }
    }
}

impl LogHandler for FileLogHandler {
    fn log(&self, level: Level, message: &str, call_metadata: Option<&Metadata>, _location: &Location<'_>) {
        let line = match call_metadata {
            Some(call) if !call.is_empty() => {
                // Merged metadata is rendered for this call only.
                let merged = metadata::merge(&self.metadata, call);
                self.format_line(level, message, metadata::pretty(&merged).as_deref())
            }
            _ => self.format_line(level, message, self.pretty_metadata.as_deref()),
        };

        self.sink.write(&line);
    }

    fn log_level(&self) -> Level {
        self.log_level
    }

    fn set_log_level(&mut self, level: Level) {
        self.log_level = level;
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
        self.refresh_pretty_metadata();
    }

    fn set_metadata_value(&mut self, key: &str, value: Option<MetadataValue>) {
        match value {
            Some(value) => {
                self.metadata.insert(key.to_string(), value);
            }
            None => {
                self.metadata.remove(key);
            }
        }
        self.refresh_pretty_metadata();
    }
}
