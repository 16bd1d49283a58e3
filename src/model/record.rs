use serde::Deserialize;

use crate::model::error::LogError;
use crate::model::level::Level;
use crate::model::metadata::{Metadata, MetadataValue};

/// One row of a replay file: `level,message,metadata`.
#[derive(Debug, Deserialize, Clone)]
pub struct RecordInput {
    pub level: Level,
    pub message: String,
    #[serde(default)]
    pub metadata: Option<String>,
}

impl RecordInput {
    pub fn metadata(&self) -> Result<Metadata, LogError> {
        match &self.metadata {
            Some(text) => parse_metadata(text),
            None => Ok(Metadata::new()),
        }
    }
}

/// Parses space-separated `key=value` pairs, the same shape the handler
/// writes them in.
pub fn parse_metadata(text: &str) -> Result<Metadata, LogError> {
    text.split_whitespace()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                Ok((key.to_string(), MetadataValue::from(value)))
            }
            _ => Err(LogError::InvalidMetadata(pair.to_string())),
        })
        .collect()
}
