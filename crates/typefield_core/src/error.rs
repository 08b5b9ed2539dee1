use crate::field::FieldKind;

/// Errors raised by a [`FieldFactory`](crate::factory::FieldFactory) while
/// constructing a descriptor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("invalid value for option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },
    #[error("option `{key}` is not supported by {field_kind} fields")]
    UnsupportedOption { key: String, field_kind: FieldKind },
    #[error("nested descriptors do not match a {field_kind} field")]
    NestedMismatch { field_kind: FieldKind },
}

impl BuildError {
    pub fn invalid_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while converting annotations into descriptors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("no field kind registered for type `{annotation}`")]
    UnknownType { annotation: String },
    #[error("malformed annotation `{annotation}`: {reason}")]
    MalformedAnnotation { annotation: String, reason: String },
    #[error("failed to build {field_kind} field")]
    Build {
        field_kind: FieldKind,
        #[source]
        source: BuildError,
    },
}

impl ConvertError {
    pub fn unknown_type(annotation: impl ToString) -> Self {
        Self::UnknownType {
            annotation: annotation.to_string(),
        }
    }

    pub fn malformed(annotation: impl ToString, reason: impl Into<String>) -> Self {
        Self::MalformedAnnotation {
            annotation: annotation.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
