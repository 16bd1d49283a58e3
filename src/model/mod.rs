pub mod error;
pub mod level;
pub mod metadata;
pub mod record;
