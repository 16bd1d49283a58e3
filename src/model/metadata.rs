use std::collections::BTreeMap;
use std::fmt;

/// Structured metadata attached to a handler or a single log call.
///
/// Keys are kept sorted so the rendered line is stable between runs.
pub type Metadata = BTreeMap<String, MetadataValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Dictionary(Metadata),
    Array(Vec<MetadataValue>),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetadataValue::String(value) => f.write_str(value),
            MetadataValue::Dictionary(entries) => {
                f.write_str("[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("]")
            }
            MetadataValue::Array(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

macro_rules! string_convertible {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MetadataValue {
                fn from(value: $ty) -> Self {
                    MetadataValue::String(value.to_string())
                }
            }
        )*
    };
}

string_convertible!(bool, char, i32, i64, u16, u32, u64, usize, f64);

impl From<Metadata> for MetadataValue {
    fn from(value: Metadata) -> Self {
        MetadataValue::Dictionary(value)
    }
}

impl From<Vec<MetadataValue>> for MetadataValue {
    fn from(value: Vec<MetadataValue>) -> Self {
        MetadataValue::Array(value)
    }
}

/// Renders metadata as `key=value` pairs joined by a single space.
///
/// Returns `None` for an empty mapping so callers can leave the block out
/// entirely instead of emitting stray whitespace.
pub fn pretty(metadata: &Metadata) -> Option<String> {
    if metadata.is_empty() {
        return None;
    }

    let pairs: Vec<String> = metadata
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();

    Some(pairs.join(" "))
}

/// Overlays `overrides` on top of `base`; entries in `overrides` win.
pub fn merge(base: &Metadata, overrides: &Metadata) -> Metadata {
    let mut merged = base.clone();
    merged.extend(
        overrides
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    merged
}
