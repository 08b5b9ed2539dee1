//! typefield - convert struct field annotations into schema field descriptors
//!
//! ```ignore
//! use typefield::{Annotated, ConvertAllOptions, DefaultConverter};
//!
//! #[derive(Annotated)]
//! struct SomeType {
//!     id: i64,
//!     name: Option<String>,
//!     points: Vec<f64>,
//! }
//!
//! let fields = DefaultConverter::default()
//!     .convert_annotated::<SomeType>(&ConvertAllOptions::default())?;
//! assert!(fields["name"].allow_none);
//! ```

// Re-export typefield_core so users don't need to depend on it directly
pub use typefield_core::{
    annotation::{Origin, TypeAnnotation},
    class::{Annotated, AttributeSpec, ClassAnnotations},
    converter::{Converter, DefaultConverter, FieldDescriptorMap},
    defaults::{DeclaredDefaults, FieldDefaults, NoDefaults},
    error::{BuildError, ConvertError, Result},
    factory::{DescriptorFactory, FieldFactory, Nested},
    field::{Field, FieldKind},
    options::{ConvertAllOptions, FieldConfigs, FieldOptions, INTERIOR_KEY},
    registry::{DefaultTypeRegistry, TypeRegistry},
};

// Re-export macros from typefield_macro
pub use typefield_macro::Annotated;

// Re-export serde_json for generated `default = ...` values
pub use serde_json;
