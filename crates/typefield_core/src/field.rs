//! Field kinds and the default [`Field`] descriptor.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Selects which descriptor constructor to use
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Integer,
    Float,
    Decimal,
    String,
    Boolean,
    DateTime,
    Date,
    Time,
    Uuid,
    /// Any value, passed through untouched
    Raw,
    List,
    Dict,
    /// Nested schema for a registered class
    Nested(String),
    Custom(String),
}

impl FieldKind {
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Decimal)
    }

    pub const fn is_container(&self) -> bool {
        matches!(self, Self::List | Self::Dict)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("Integer"),
            Self::Float => f.write_str("Float"),
            Self::Decimal => f.write_str("Decimal"),
            Self::String => f.write_str("String"),
            Self::Boolean => f.write_str("Boolean"),
            Self::DateTime => f.write_str("DateTime"),
            Self::Date => f.write_str("Date"),
            Self::Time => f.write_str("Time"),
            Self::Uuid => f.write_str("UUID"),
            Self::Raw => f.write_str("Raw"),
            Self::List => f.write_str("List"),
            Self::Dict => f.write_str("Dict"),
            Self::Nested(schema) => write!(f, "Nested({schema})"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// Declarative description of how one attribute validates and serializes.
///
/// `default` and `missing` use `None` as the "not set" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub kind: FieldKind,
    pub allow_none: bool,
    pub required: bool,
    /// Value used on serialization when the attribute is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Value used on deserialization when the input lacks the key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Value>,
    /// Numeric kinds only: emit the number as a string
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub as_string: bool,
    /// Options the factory does not interpret
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub metadata: BTreeMap<String, Value>,
    /// Element descriptor of a list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<Field>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Box<Field>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<Field>>,
}

impl Field {
    /// A bare field of `kind` with every option unset
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            allow_none: false,
            required: false,
            default: None,
            missing: None,
            as_string: false,
            metadata: BTreeMap::new(),
            inner: None,
            key: None,
            value: None,
        }
    }

    pub fn inner(&self) -> Option<&Field> {
        self.inner.as_deref()
    }

    pub fn key(&self) -> Option<&Field> {
        self.key.as_deref()
    }

    pub fn value(&self) -> Option<&Field> {
        self.value.as_deref()
    }
}
