//! Declared attributes of a class.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::annotation::TypeAnnotation;

/// One declared attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    pub annotation: TypeAnnotation,
    /// Default declared on the class itself, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, annotation: TypeAnnotation) -> Self {
        Self {
            name: name.into(),
            annotation,
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// The annotation set of a class, including the classes it inherits from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassAnnotations {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<ClassAnnotations>,
}

impl ClassAnnotations {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, annotation: TypeAnnotation) -> Self {
        self.attributes.push(AttributeSpec::new(name, annotation));
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn base(mut self, base: ClassAnnotations) -> Self {
        self.bases.push(base);
        self
    }

    /// All declared attributes, inherited ones first.
    ///
    /// Bases are layered last to first, so an earlier base wins a name it
    /// shares with a later one. A redeclaration replaces the inherited entry
    /// in place.
    pub fn resolved_attributes(&self) -> Vec<&AttributeSpec> {
        let mut resolved: Vec<&AttributeSpec> = Vec::new();
        self.collect_into(&mut resolved);
        resolved
    }

    fn collect_into<'a>(&'a self, resolved: &mut Vec<&'a AttributeSpec>) {
        for base in self.bases.iter().rev() {
            base.collect_into(resolved);
        }
        for attribute in &self.attributes {
            match resolved.iter_mut().find(|a| a.name == attribute.name) {
                Some(slot) => *slot = attribute,
                None => resolved.push(attribute),
            }
        }
    }
}

/// Types that can describe their own annotated attributes.
///
/// Usually implemented with `#[derive(Annotated)]`.
pub trait Annotated {
    fn annotations() -> ClassAnnotations;
}
