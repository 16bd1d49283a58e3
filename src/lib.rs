//! Log backend that appends formatted lines to a local file.
//!
//! ```no_run
//! use filelog::{FileLogHandler, FileLogger, LogHandler, MetadataValue};
//!
//! let mut handler = FileLogHandler::new("svc", "service.log")?;
//! handler.set_metadata_value("region", Some(MetadataValue::from("eu")));
//!
//! let logger = FileLogger::new(handler);
//! logger.init().expect("logger already installed");
//! log::info!(request = 42; "started");
//! # Ok::<(), filelog::LogError>(())
//! ```

pub mod handler;
pub mod logger;
pub mod model;
pub mod replay;
pub mod sink;

pub use handler::{FileLogHandler, FileLogging, Location, LogHandler};
pub use logger::FileLogger;
pub use model::error::LogError;
pub use model::level::Level;
pub use model::metadata::{Metadata, MetadataValue};
pub use replay::Replayer;
pub use sink::{Encoding, FileSink};
