//! Core of typefield: turns type annotations into schema field descriptors.
//!
//! The converter is driven by three injected collaborators:
//! - a [`TypeRegistry`](registry::TypeRegistry) mapping base type names to field kinds
//! - a [`FieldFactory`](factory::FieldFactory) constructing the concrete descriptors
//! - a [`FieldDefaults`](defaults::FieldDefaults) hook supplying per-class baseline options

pub mod annotation;
pub mod class;
pub mod converter;
pub mod defaults;
pub mod error;
pub mod factory;
pub mod field;
pub mod options;
pub mod registry;
