//! Annotation to field descriptor conversion.
//!
//! [`Converter::convert`] walks a single [`TypeAnnotation`]:
//! - `Optional[T]` resolves `T` with `allow_none` forced on
//! - `List[T]` and `Dict[K, V]` resolve their element types with the
//!   `_interior` options, then build the container around them
//! - anything else is looked up in the [`TypeRegistry`]
//!
//! [`Converter::convert_all`] applies that to every instance attribute of a
//! class, layering caller configs over the [`FieldDefaults`] baseline.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::{
    annotation::{Origin, TypeAnnotation},
    class::{Annotated, ClassAnnotations},
    defaults::{FieldDefaults, NoDefaults},
    error::{ConvertError, Result},
    factory::{DescriptorFactory, FieldFactory, Nested},
    field::{Field, FieldKind},
    options::{ConvertAllOptions, FieldConfigs, FieldOptions},
    registry::{DefaultTypeRegistry, TypeRegistry},
};

/// Attribute name to descriptor
pub type FieldDescriptorMap<F> = BTreeMap<String, F>;

/// Converts type annotations into field descriptors.
///
/// Holds only its collaborators; every call is independent.
#[derive(Debug, Clone)]
pub struct Converter<R, F, D = NoDefaults> {
    registry: R,
    factory: F,
    defaults: D,
}

impl Default for Converter<DefaultTypeRegistry, DescriptorFactory> {
    fn default() -> Self {
        Self::new(DefaultTypeRegistry::default(), DescriptorFactory)
    }
}

impl<R, F> Converter<R, F> {
    pub const fn new(registry: R, factory: F) -> Self {
        Self {
            registry,
            factory,
            defaults: NoDefaults,
        }
    }
}

impl<R, F, D> Converter<R, F, D> {
    /// Replaces the baseline defaults hook
    pub fn with_defaults<D2>(self, defaults: D2) -> Converter<R, F, D2> {
        Converter {
            registry: self.registry,
            factory: self.factory,
            defaults,
        }
    }

    pub const fn registry(&self) -> &R {
        &self.registry
    }

    pub const fn factory(&self) -> &F {
        &self.factory
    }
}

impl<R, F, D> Converter<R, F, D>
where
    R: TypeRegistry,
    F: FieldFactory,
    D: FieldDefaults,
{
    /// Converts one annotation, with optional caller-supplied options.
    pub fn convert(
        &self,
        annotation: &TypeAnnotation,
        options: Option<FieldOptions>,
    ) -> Result<F::Field> {
        self.convert_with(annotation, options.unwrap_or_default())
    }

    fn convert_with(
        &self,
        annotation: &TypeAnnotation,
        mut options: FieldOptions,
    ) -> Result<F::Field> {
        tracing::trace!(%annotation, "converting annotation");

        if let Some(inner) = annotation.optional_inner() {
            options.insert("allow_none", true);
            return self.convert_with(inner, options);
        }

        match &annotation.origin {
            Origin::List => {
                let [element] = annotation.args.as_slice() else {
                    return Err(ConvertError::malformed(
                        annotation,
                        format!("List takes 1 type argument, found {}", annotation.args.len()),
                    ));
                };
                let (own, interior) = options.split();
                let inner = self.convert_with(element, interior)?;
                self.build(FieldKind::List, own, Nested::List { inner })
            }
            Origin::Dict => {
                let [key, value] = annotation.args.as_slice() else {
                    return Err(ConvertError::malformed(
                        annotation,
                        format!("Dict takes 2 type arguments, found {}", annotation.args.len()),
                    ));
                };
                let (own, interior) = options.split();
                let key = self.convert_with(key, interior.clone())?;
                let value = self.convert_with(value, interior)?;
                self.build(FieldKind::Dict, own, Nested::Dict { key, value })
            }
            Origin::Scalar(name) => {
                if !annotation.args.is_empty() {
                    return Err(ConvertError::malformed(
                        annotation,
                        "plain types take no type arguments",
                    ));
                }
                let kind = self
                    .registry
                    .lookup(name)
                    .ok_or_else(|| ConvertError::unknown_type(annotation))?;
                let (own, _) = options.split();
                self.build(kind, own, Nested::None)
            }
            Origin::ClassVar => Err(ConvertError::malformed(
                annotation,
                "class-scoped annotations do not describe instance fields",
            )),
            Origin::NoneType | Origin::Union => Err(ConvertError::unknown_type(annotation)),
        }
    }

    fn build(
        &self,
        kind: FieldKind,
        own: BTreeMap<String, Value>,
        nested: Nested<F::Field>,
    ) -> Result<F::Field> {
        self.factory
            .build(kind.clone(), own, nested)
            .map_err(|source| ConvertError::Build {
                field_kind: kind,
                source,
            })
    }

    /// Converts every instance attribute of `class`.
    ///
    /// Class-scoped attributes and names in `ignore` are skipped; `ignore`
    /// wins over `configs` for the same name. Options are layered as
    /// defaults-hook baseline < `configs[name]`. The first failure aborts the
    /// whole conversion.
    pub fn convert_all(
        &self,
        class: &ClassAnnotations,
        configs: Option<&FieldConfigs>,
        ignore: Option<&HashSet<String>>,
    ) -> Result<FieldDescriptorMap<F::Field>> {
        let mut baseline = self.defaults.field_defaults(class);
        let mut fields = FieldDescriptorMap::new();
        let mut ignored = 0usize;

        for attribute in class.resolved_attributes() {
            if attribute.annotation.is_class_scoped() {
                continue;
            }
            if ignore.is_some_and(|names| names.contains(&attribute.name)) {
                ignored += 1;
                continue;
            }

            let base = baseline.remove(&attribute.name).unwrap_or_default();
            let options = match configs.and_then(|c| c.get(&attribute.name)) {
                Some(config) => config.merged_over(&base),
                None => base,
            };

            let field = self
                .convert_with(&attribute.annotation, options)
                .inspect_err(|err| {
                    tracing::debug!(
                        class = %class.name,
                        field = %attribute.name,
                        error = %err,
                        "field conversion failed"
                    );
                })?;
            fields.insert(attribute.name.clone(), field);
        }

        tracing::debug!(
            class = %class.name,
            fields = fields.len(),
            ignored,
            "converted class annotations"
        );
        Ok(fields)
    }

    /// [`Converter::convert_all`] driven by a [`ConvertAllOptions`] value
    pub fn convert_all_with(
        &self,
        class: &ClassAnnotations,
        options: &ConvertAllOptions,
    ) -> Result<FieldDescriptorMap<F::Field>> {
        self.convert_all(class, Some(&options.fields), Some(&options.ignore))
    }

    pub fn convert_annotated<T: Annotated>(
        &self,
        options: &ConvertAllOptions,
    ) -> Result<FieldDescriptorMap<F::Field>> {
        self.convert_all_with(&T::annotations(), options)
    }
}

/// Converter with the default registry, [`Field`] descriptors and no baseline
pub type DefaultConverter = Converter<DefaultTypeRegistry, DescriptorFactory>;

impl DefaultConverter {
    /// Convenience for a one-off conversion with the default collaborators
    pub fn convert_default(annotation: &TypeAnnotation) -> Result<Field> {
        Self::default().convert(annotation, None)
    }
}
