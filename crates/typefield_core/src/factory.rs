//! Field construction.
//!
//! The converter never builds descriptors itself; it hands a [`FieldKind`],
//! the own options and any already-built nested descriptors to a
//! [`FieldFactory`].

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    error::BuildError,
    field::{Field, FieldKind},
};

/// Already-built descriptors handed to a container constructor
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<F> {
    None,
    List { inner: F },
    Dict { key: F, value: F },
}

/// Turns a field kind plus options into a concrete descriptor
pub trait FieldFactory {
    type Field;

    fn build(
        &self,
        kind: FieldKind,
        options: BTreeMap<String, Value>,
        nested: Nested<Self::Field>,
    ) -> Result<Self::Field, BuildError>;
}

impl<T: FieldFactory + ?Sized> FieldFactory for &T {
    type Field = T::Field;

    fn build(
        &self,
        kind: FieldKind,
        options: BTreeMap<String, Value>,
        nested: Nested<Self::Field>,
    ) -> Result<Self::Field, BuildError> {
        (**self).build(kind, options, nested)
    }
}

/// Builds [`Field`] descriptors and validates their options.
///
/// Recognised keys are `allow_none`, `required`, `default`, `missing` and
/// `as_string`; everything else is kept as metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorFactory;

fn take_bool(
    options: &mut BTreeMap<String, Value>,
    key: &str,
) -> Result<Option<bool>, BuildError> {
    match options.remove(key) {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(flag)),
        Some(other) => Err(BuildError::invalid_option(
            key,
            format!("expected a boolean, got {other}"),
        )),
    }
}

impl FieldFactory for DescriptorFactory {
    type Field = Field;

    fn build(
        &self,
        kind: FieldKind,
        mut options: BTreeMap<String, Value>,
        nested: Nested<Field>,
    ) -> Result<Field, BuildError> {
        let mut field = Field::new(kind);

        match nested {
            Nested::List { inner } if field.kind == FieldKind::List => {
                field.inner = Some(Box::new(inner));
            }
            Nested::Dict { key, value } if field.kind == FieldKind::Dict => {
                field.key = Some(Box::new(key));
                field.value = Some(Box::new(value));
            }
            Nested::None if !field.kind.is_container() => {}
            _ => {
                return Err(BuildError::NestedMismatch {
                    field_kind: field.kind,
                });
            }
        }

        field.allow_none = take_bool(&mut options, "allow_none")?.unwrap_or(false);
        field.required = take_bool(&mut options, "required")?.unwrap_or(false);
        field.default = options.remove("default");
        field.missing = options.remove("missing");

        if let Some(as_string) = take_bool(&mut options, "as_string")? {
            if !field.kind.is_numeric() {
                return Err(BuildError::UnsupportedOption {
                    key: "as_string".to_string(),
                    field_kind: field.kind,
                });
            }
            field.as_string = as_string;
        }

        if field.required && (field.default.is_some() || field.missing.is_some()) {
            return Err(BuildError::invalid_option(
                "required",
                "a required field cannot declare `default` or `missing`",
            ));
        }

        field.metadata = options;
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn opts(value: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_build_scalar_with_options() {
        let field = DescriptorFactory
            .build(
                FieldKind::String,
                opts(json!({ "default": "x", "allow_none": true, "description": "a name" })),
                Nested::None,
            )
            .unwrap();

        assert_eq!(field.kind, FieldKind::String);
        assert_eq!(field.default, Some(json!("x")));
        assert_eq!(field.missing, None);
        assert!(field.allow_none);
        assert_eq!(field.metadata.get("description"), Some(&json!("a name")));
    }

    #[test]
    fn test_build_list() {
        let inner = Field::new(FieldKind::Float);
        let field = DescriptorFactory
            .build(FieldKind::List, BTreeMap::new(), Nested::List { inner })
            .unwrap();
        assert_eq!(field.inner().map(|f| &f.kind), Some(&FieldKind::Float));
    }

    #[test]
    fn test_build_dict() {
        let field = DescriptorFactory
            .build(
                FieldKind::Dict,
                BTreeMap::new(),
                Nested::Dict {
                    key: Field::new(FieldKind::Integer),
                    value: Field::new(FieldKind::String),
                },
            )
            .unwrap();
        assert_eq!(field.key().map(|f| &f.kind), Some(&FieldKind::Integer));
        assert_eq!(field.value().map(|f| &f.kind), Some(&FieldKind::String));
    }

    #[rstest]
    #[case(FieldKind::List, Nested::None)]
    #[case(FieldKind::Dict, Nested::List { inner: Field::new(FieldKind::Integer) })]
    #[case(FieldKind::Integer, Nested::List { inner: Field::new(FieldKind::Integer) })]
    fn test_nested_mismatch(#[case] kind: FieldKind, #[case] nested: Nested<Field>) {
        let err = DescriptorFactory
            .build(kind.clone(), BTreeMap::new(), nested)
            .unwrap_err();
        assert_eq!(err, BuildError::NestedMismatch { field_kind: kind });
    }

    #[rstest]
    #[case(FieldKind::Integer)]
    #[case(FieldKind::Float)]
    #[case(FieldKind::Decimal)]
    fn test_as_string_on_numbers(#[case] kind: FieldKind) {
        let field = DescriptorFactory
            .build(kind, opts(json!({ "as_string": true })), Nested::None)
            .unwrap();
        assert!(field.as_string);
    }

    #[test]
    fn test_as_string_rejected_on_string() {
        let err = DescriptorFactory
            .build(FieldKind::String, opts(json!({ "as_string": true })), Nested::None)
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::UnsupportedOption {
                key: "as_string".into(),
                field_kind: FieldKind::String,
            }
        );
    }

    #[test]
    fn test_bool_option_type_checked() {
        let err = DescriptorFactory
            .build(FieldKind::Integer, opts(json!({ "allow_none": "yes" })), Nested::None)
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidOption { ref key, .. } if key == "allow_none"));
    }

    #[test]
    fn test_required_with_missing_rejected() {
        let err = DescriptorFactory
            .build(
                FieldKind::Integer,
                opts(json!({ "required": true, "missing": 0 })),
                Nested::None,
            )
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidOption { ref key, .. } if key == "required"));
    }
}
