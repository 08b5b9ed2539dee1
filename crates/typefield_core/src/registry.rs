//! Base type name to field kind lookup.

use std::collections::HashMap;

use crate::field::FieldKind;

/// Maps a base type name to the kind of field that represents it
pub trait TypeRegistry {
    fn lookup(&self, name: &str) -> Option<FieldKind>;
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for &R {
    fn lookup(&self, name: &str) -> Option<FieldKind> {
        (**self).lookup(name)
    }
}

impl TypeRegistry for HashMap<String, FieldKind> {
    fn lookup(&self, name: &str) -> Option<FieldKind> {
        self.get(name).cloned()
    }
}

fn builtin_types() -> Vec<(&'static str, FieldKind)> {
    vec![
        ("int", FieldKind::Integer),
        ("i8", FieldKind::Integer),
        ("i16", FieldKind::Integer),
        ("i32", FieldKind::Integer),
        ("i64", FieldKind::Integer),
        ("i128", FieldKind::Integer),
        ("isize", FieldKind::Integer),
        ("u8", FieldKind::Integer),
        ("u16", FieldKind::Integer),
        ("u32", FieldKind::Integer),
        ("u64", FieldKind::Integer),
        ("u128", FieldKind::Integer),
        ("usize", FieldKind::Integer),
        ("float", FieldKind::Float),
        ("f32", FieldKind::Float),
        ("f64", FieldKind::Float),
        ("Decimal", FieldKind::Decimal),
        ("str", FieldKind::String),
        ("String", FieldKind::String),
        ("char", FieldKind::String),
        ("bool", FieldKind::Boolean),
        ("datetime", FieldKind::DateTime),
        ("DateTime", FieldKind::DateTime),
        ("NaiveDateTime", FieldKind::DateTime),
        ("date", FieldKind::Date),
        ("NaiveDate", FieldKind::Date),
        ("time", FieldKind::Time),
        ("NaiveTime", FieldKind::Time),
        ("UUID", FieldKind::Uuid),
        ("Uuid", FieldKind::Uuid),
        ("Any", FieldKind::Raw),
        ("Value", FieldKind::Raw),
    ]
}

/// Registry pre-populated with the common scalar types.
#[derive(Debug, Clone)]
pub struct DefaultTypeRegistry {
    kinds: HashMap<String, FieldKind>,
}

impl Default for DefaultTypeRegistry {
    fn default() -> Self {
        let kinds = builtin_types()
            .into_iter()
            .map(|(name, kind)| (name.to_string(), kind))
            .collect();
        Self { kinds }
    }
}

impl DefaultTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that knows no types at all
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Adds or replaces the kind for `name`
    pub fn register(&mut self, name: impl Into<String>, kind: FieldKind) -> Option<FieldKind> {
        self.kinds.insert(name.into(), kind)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.register(name, kind);
        self
    }

    /// Registers `name` as a nested schema of the same name
    #[must_use]
    pub fn with_nested(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = FieldKind::Nested(name.clone());
        self.with(name, kind)
    }
}

impl TypeRegistry for DefaultTypeRegistry {
    fn lookup(&self, name: &str) -> Option<FieldKind> {
        self.kinds.get(name).cloned()
    }
}
