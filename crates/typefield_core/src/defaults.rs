//! Baseline options supplied per class before caller overrides apply.

use std::collections::HashMap;

use crate::{class::ClassAnnotations, options::FieldOptions};

/// Per-class hook supplying baseline options, keyed by attribute name.
///
/// The converter calls it once per whole-class conversion.
pub trait FieldDefaults {
    fn field_defaults(&self, class: &ClassAnnotations) -> HashMap<String, FieldOptions>;
}

impl<F> FieldDefaults for F
where
    F: Fn(&ClassAnnotations) -> HashMap<String, FieldOptions>,
{
    fn field_defaults(&self, class: &ClassAnnotations) -> HashMap<String, FieldOptions> {
        self(class)
    }
}

/// Supplies no baseline for any attribute
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl FieldDefaults for NoDefaults {
    fn field_defaults(&self, _class: &ClassAnnotations) -> HashMap<String, FieldOptions> {
        HashMap::new()
    }
}

/// Uses each attribute's declared class default as its `missing` value
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredDefaults;

impl FieldDefaults for DeclaredDefaults {
    fn field_defaults(&self, class: &ClassAnnotations) -> HashMap<String, FieldOptions> {
        class
            .resolved_attributes()
            .into_iter()
            .filter_map(|attribute| {
                let default = attribute.default.clone()?;
                Some((
                    attribute.name.clone(),
                    FieldOptions::new().with("missing", default),
                ))
            })
            .collect()
    }
}
