use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum LogError {
    CannotCreateFile { path: PathBuf, source: io::Error },
    InvalidArguments(String),
    InvalidLevel(String),
    InvalidMetadata(String),
    IoError(io::Error),
    CsvError(csv::Error),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogError::CannotCreateFile { path, source } => {
                write!(f, "Cannot create log file {}: {}", path.display(), source)
            }
            LogError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            LogError::InvalidLevel(level) => write!(f, "Invalid log level: {}", level),
            LogError::InvalidMetadata(pair) => write!(f, "Invalid metadata pair: {}", pair),
            LogError::IoError(err) => write!(f, "I/O error: {}", err),
            LogError::CsvError(err) => write!(f, "CSV error: {}", err),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::CannotCreateFile { source, .. } => Some(source),
            LogError::IoError(err) => Some(err),
            LogError::CsvError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LogError {
    fn from(err: io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<csv::Error> for LogError {
    fn from(err: csv::Error) -> Self {
        LogError::CsvError(err)
    }
}
