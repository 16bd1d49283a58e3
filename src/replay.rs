use std::fs::File;

use crate::handler::{FileLogHandler, Location, LogHandler};
use crate::model::error::LogError;
use crate::model::level::Level;
use crate::model::record::RecordInput;

const SOURCE: &str = "filelog";

/// Replays CSV log records through a handler.
///
/// Used standalone there is no front end to filter by level, so records
/// below the handler's level are dropped here.
pub struct Replayer {
    handler: FileLogHandler,
}

impl Replayer {
    pub fn new(handler: FileLogHandler) -> Self {
        Replayer { handler }
    }

    pub fn handler(&self) -> &FileLogHandler {
        &self.handler
    }

    /// Returns the number of records written.
    pub fn replay_file(&self, file_path: &str) -> Result<usize, LogError> {
        let file = File::open(file_path)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        let mut written = 0;

        for result in reader.records() {
            let record = result?;
            let input: RecordInput = record.deserialize(Some(&headers))?;
            let line = record
                .position()
                .map_or(0, |p| u32::try_from(p.line()).unwrap_or(u32::MAX));

            if self.replay_record(&input, file_path, line)? {
                written += 1;
            }
        }

        Ok(written)
    }

    fn replay_record(&self, input: &RecordInput, file_path: &str, line: u32) -> Result<bool, LogError> {
        if input.level < self.handler.log_level() {
            return Ok(false);
        }

        let metadata = input.metadata()?;
        let location = Location {
            source: SOURCE,
            file: file_path,
            function: "replay_file",
            line,
        };

        self.handler
            .log(input.level, &input.message, Some(&metadata), &location);
        Ok(true)
    }
}
