use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::kv::{self, Key, Value, VisitSource};
use log::{Log, Record, SetLoggerError};
use parking_lot::RwLock;

use crate::handler::{FileLogHandler, Location, LogHandler};
use crate::model::level::Level;
use crate::model::metadata::{Metadata, MetadataValue};

/// Plugs a [`LogHandler`] into the `log` crate.
///
/// Level filtering happens here, against the handler's minimum level,
/// before the handler ever sees a record. Clones share the same handler.
pub struct FileLogger<H = FileLogHandler> {
    shared: Arc<Shared<H>>,
}

struct Shared<H> {
    handler: RwLock<H>,
    installed: AtomicBool,
}

impl<H> Clone for FileLogger<H> {
    fn clone(&self) -> Self {
        FileLogger {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<H: LogHandler> FileLogger<H> {
    pub fn new(handler: H) -> Self {
        FileLogger {
            shared: Arc::new(Shared {
                handler: RwLock::new(handler),
                installed: AtomicBool::new(false),
            }),
        }
    }

    /// Installs a clone of this logger as the global `log` backend.
    ///
    /// `self` stays usable for changing level and metadata at runtime.
    pub fn init(&self) -> Result<(), SetLoggerError>
    where
        H: 'static,
    {
        log::set_boxed_logger(Box::new(self.clone()))?;
        self.shared.installed.store(true, Ordering::Release);
        self.sync_max_level(self.log_level());
        Ok(())
    }

    pub fn log_level(&self) -> Level {
        self.shared.handler.read().log_level()
    }

    pub fn set_log_level(&self, level: Level) {
        self.shared.handler.write().set_log_level(level);
        self.sync_max_level(level);
    }

    pub fn metadata_value(&self, key: &str) -> Option<MetadataValue> {
        self.shared.handler.read().metadata_value(key).cloned()
    }

    pub fn set_metadata_value(&self, key: &str, value: Option<MetadataValue>) {
        self.shared.handler.write().set_metadata_value(key, value);
    }

    pub fn set_metadata(&self, metadata: Metadata) {
        self.shared.handler.write().set_metadata(metadata);
    }

    fn sync_max_level(&self, level: Level) {
        if self.shared.installed.load(Ordering::Acquire) {
            log::set_max_level(level.to_level_filter());
        }
    }
}

impl FileLogger<FileLogHandler> {
    pub fn label(&self) -> String {
        self.shared.handler.read().label().to_string()
    }

    /// Re-binds the wrapped handler to `label`.
    pub fn bind(&self, label: impl Into<String>) {
        self.shared.handler.write().bind(label);
    }
}

impl<H: LogHandler> Log for FileLogger<H> {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Level::from(metadata.level()) >= self.log_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut call_metadata = Metadata::new();
        let _ = record
            .key_values()
            .visit(&mut MetadataCollector(&mut call_metadata));

        let message = record.args().to_string();
        let location = Location {
            source: record.target(),
            file: record.file().unwrap_or_default(),
            function: record.module_path().unwrap_or_default(),
            line: record.line().unwrap_or_default(),
        };

        self.shared.handler.read().log(
            Level::from(record.level()),
            &message,
            Some(&call_metadata),
            &location,
        );
    }

    fn flush(&self) {}
}

struct MetadataCollector<'m>(&'m mut Metadata);

impl<'kvs> VisitSource<'kvs> for MetadataCollector<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        self.0
            .insert(key.to_string(), MetadataValue::String(value.to_string()));
        Ok(())
    }
}
