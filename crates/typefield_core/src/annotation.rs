//! Structural description of declared types.
//!
//! A [`TypeAnnotation`] is an origin plus zero or more type arguments, e.g.
//! `List[int]` has origin [`Origin::List`] and a single `int` argument, and
//! `Optional[str]` is a [`Origin::Union`] of `str` and `None`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Origin of a type annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// A plain named type (`int`, `String`, `Address`)
    Scalar(String),
    /// The absence-of-value type
    NoneType,
    Union,
    /// Sequence container with one element argument
    List,
    /// Mapping container with key and value arguments
    Dict,
    /// Marks a class-scoped declaration, never an instance field
    ClassVar,
}

/// Type annotation tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeAnnotation {
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeAnnotation>,
}

impl TypeAnnotation {
    pub const fn new(origin: Origin, args: Vec<TypeAnnotation>) -> Self {
        Self { origin, args }
    }

    /// Plain named type without arguments
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(Origin::Scalar(name.into()), Vec::new())
    }

    pub const fn none() -> Self {
        Self::new(Origin::NoneType, Vec::new())
    }

    /// `Optional[T]`, spelled as `Union[T, None]`
    pub fn optional(inner: TypeAnnotation) -> Self {
        Self::union(vec![inner, Self::none()])
    }

    pub fn union(members: Vec<TypeAnnotation>) -> Self {
        Self::new(Origin::Union, members)
    }

    pub fn list(element: TypeAnnotation) -> Self {
        Self::new(Origin::List, vec![element])
    }

    pub fn dict(key: TypeAnnotation, value: TypeAnnotation) -> Self {
        Self::new(Origin::Dict, vec![key, value])
    }

    pub fn class_var(inner: TypeAnnotation) -> Self {
        Self::new(Origin::ClassVar, vec![inner])
    }

    /// Returns `T` when this annotation is `Union[T, None]` (in either order).
    ///
    /// Unions with more members, or with `None` on both sides, are not optional.
    pub fn optional_inner(&self) -> Option<&TypeAnnotation> {
        if self.origin != Origin::Union || self.args.len() != 2 {
            return None;
        }
        match (&self.args[0], &self.args[1]) {
            (inner, none) | (none, inner)
                if none.is_none_type() && !inner.is_none_type() =>
            {
                Some(inner)
            }
            _ => None,
        }
    }

    pub fn is_none_type(&self) -> bool {
        self.origin == Origin::NoneType
    }

    /// Whether the declaration belongs to the class rather than its instances
    pub fn is_class_scoped(&self) -> bool {
        self.origin == Origin::ClassVar
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(inner) = self.optional_inner() {
            return write!(f, "Optional[{inner}]");
        }
        let head = match &self.origin {
            Origin::Scalar(name) => name.as_str(),
            Origin::NoneType => "None",
            Origin::Union => "Union",
            Origin::List => "List",
            Origin::Dict => "Dict",
            Origin::ClassVar => "ClassVar",
        };
        f.write_str(head)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str("]")
    }
}
