use std::fmt;

use serde::{Serialize, Serializer};

/// Portable type vocabulary handed to model definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Text,
    Boolean,
    Number,
    Date,
    Object,
    GeoPoint,
}

impl LogicalType {
    /// The type name as the ORM framework spells it. Text is the framework's `String`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Text => "String",
            LogicalType::Boolean => "Boolean",
            LogicalType::Number => "Number",
            LogicalType::Date => "Date",
            LogicalType::Object => "Object",
            LogicalType::GeoPoint => "GeoPoint",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogicalType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Map a CrateDB scalar type name to its logical type.
///
/// Matching is case-insensitive. Anything unrecognized (arrays, `ip`,
/// `geo_shape`, newer numeric names) falls back to `Text`.
pub fn map_type(native: &str) -> LogicalType {
    match native.to_uppercase().as_str() {
        "STRING" => LogicalType::Text,
        "BOOLEAN" => LogicalType::Boolean,
        "INTEGER" | "LONG" | "DOUBLE" | "FLOAT" | "BYTE" => LogicalType::Number,
        "TIMESTAMP" => LogicalType::Date,
        "OBJECT" => LogicalType::Object,
        "GEO_POINT" => LogicalType::GeoPoint,
        _ => LogicalType::Text,
    }
}
