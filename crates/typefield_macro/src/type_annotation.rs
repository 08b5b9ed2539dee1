//! Rust type to annotation conversion.
//!
//! Maps field types (as parsed by syn) onto the annotation shapes the
//! converter understands:
//! - `Option<T>` -> `Optional[T]`
//! - `Vec<T>`, `VecDeque<T>`, sets, arrays and slices -> `List[T]`
//! - `HashMap<K, V>`, `BTreeMap<K, V>`, `IndexMap<K, V>` -> `Dict[K, V]`
//! - `Box<T>`, `Rc<T>`, `Arc<T>`, `Cow<T>` and references are transparent
//! - any other path -> a plain type named by its last segment

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericArgument, PathArguments, Type, spanned::Spanned};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationShape {
    Scalar(String),
    Optional(Box<AnnotationShape>),
    List(Box<AnnotationShape>),
    Dict(Box<AnnotationShape>, Box<AnnotationShape>),
}

const LIST_TYPES: &[&str] = &["Vec", "VecDeque", "LinkedList", "HashSet", "BTreeSet", "IndexSet"];
const DICT_TYPES: &[&str] = &["HashMap", "BTreeMap", "IndexMap"];
const TRANSPARENT_TYPES: &[&str] = &["Box", "Rc", "Arc", "Cow"];

/// Type arguments of a path segment, ignoring lifetimes and const generics
fn type_args(arguments: &PathArguments) -> Vec<&Type> {
    match arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn expect_args(ty: &Type, ident: &str, args: &[&Type], count: usize) -> syn::Result<()> {
    if args.len() == count {
        Ok(())
    } else {
        Err(syn::Error::new(
            ty.span(),
            format!("expected {count} type argument(s) for `{ident}`, found {}", args.len()),
        ))
    }
}

/// Parses a field type into its annotation shape.
pub fn parse_annotation_shape(ty: &Type) -> syn::Result<AnnotationShape> {
    match ty {
        Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return Err(syn::Error::new(ty.span(), "empty type path"));
            };
            let ident = segment.ident.to_string();
            let args = type_args(&segment.arguments);

            if ident == "Option" {
                expect_args(ty, &ident, &args, 1)?;
                return Ok(AnnotationShape::Optional(Box::new(parse_annotation_shape(args[0])?)));
            }
            if LIST_TYPES.contains(&ident.as_str()) {
                expect_args(ty, &ident, &args, 1)?;
                return Ok(AnnotationShape::List(Box::new(parse_annotation_shape(args[0])?)));
            }
            if DICT_TYPES.contains(&ident.as_str()) {
                // Hashers and allocators trail the key/value pair
                if args.len() < 2 {
                    expect_args(ty, &ident, &args, 2)?;
                }
                return Ok(AnnotationShape::Dict(
                    Box::new(parse_annotation_shape(args[0])?),
                    Box::new(parse_annotation_shape(args[1])?),
                ));
            }
            if TRANSPARENT_TYPES.contains(&ident.as_str()) {
                expect_args(ty, &ident, &args, 1)?;
                return parse_annotation_shape(args[0]);
            }

            Ok(AnnotationShape::Scalar(ident))
        }
        Type::Reference(reference) => parse_annotation_shape(&reference.elem),
        Type::Paren(paren) => parse_annotation_shape(&paren.elem),
        Type::Group(group) => parse_annotation_shape(&group.elem),
        Type::Array(array) => Ok(AnnotationShape::List(Box::new(parse_annotation_shape(
            &array.elem,
        )?))),
        Type::Slice(slice) => Ok(AnnotationShape::List(Box::new(parse_annotation_shape(
            &slice.elem,
        )?))),
        Type::Tuple(_) => Err(syn::Error::new(
            ty.span(),
            "tuple fields cannot be annotated, wrap them in a named struct",
        )),
        _ => Err(syn::Error::new(
            ty.span(),
            "unsupported field type for #[derive(Annotated)]",
        )),
    }
}

impl ToTokens for AnnotationShape {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let expanded = match self {
            Self::Scalar(name) => quote! { ::typefield::TypeAnnotation::scalar(#name) },
            Self::Optional(inner) => quote! { ::typefield::TypeAnnotation::optional(#inner) },
            Self::List(inner) => quote! { ::typefield::TypeAnnotation::list(#inner) },
            Self::Dict(key, value) => {
                quote! { ::typefield::TypeAnnotation::dict(#key, #value) }
            }
        };
        tokens.extend(expanded);
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use rstest::rstest;

    use super::*;

    fn scalar(name: &str) -> AnnotationShape {
        AnnotationShape::Scalar(name.to_string())
    }

    #[rstest]
    #[case("i32", scalar("i32"))]
    #[case("String", scalar("String"))]
    #[case("&str", scalar("str"))]
    #[case("&'a str", scalar("str"))]
    #[case("crate::models::Address", scalar("Address"))]
    #[case("Option<String>", AnnotationShape::Optional(Box::new(scalar("String"))))]
    #[case("std::option::Option<u8>", AnnotationShape::Optional(Box::new(scalar("u8"))))]
    #[case("Vec<f64>", AnnotationShape::List(Box::new(scalar("f64"))))]
    #[case("HashSet<String>", AnnotationShape::List(Box::new(scalar("String"))))]
    #[case("[u8; 4]", AnnotationShape::List(Box::new(scalar("u8"))))]
    #[case("&[u8]", AnnotationShape::List(Box::new(scalar("u8"))))]
    #[case("Box<i64>", scalar("i64"))]
    #[case("Arc<String>", scalar("String"))]
    #[case("Cow<'static, str>", scalar("str"))]
    #[case(
        "HashMap<i32, String>",
        AnnotationShape::Dict(Box::new(scalar("i32")), Box::new(scalar("String")))
    )]
    #[case(
        "HashMap<String, u32, RandomState>",
        AnnotationShape::Dict(Box::new(scalar("String")), Box::new(scalar("u32")))
    )]
    #[case(
        "Option<Vec<Option<i32>>>",
        AnnotationShape::Optional(Box::new(AnnotationShape::List(Box::new(
            AnnotationShape::Optional(Box::new(scalar("i32")))
        ))))
    )]
    fn test_parse_annotation_shape(#[case] ty_src: &str, #[case] expected: AnnotationShape) {
        let ty: Type = syn::parse_str(ty_src).unwrap();
        assert_eq!(parse_annotation_shape(&ty).unwrap(), expected);
    }

    #[rstest]
    #[case("(i32, String)", "tuple fields cannot be annotated")]
    #[case("Option", "expected 1 type argument(s) for `Option`, found 0")]
    #[case("BTreeMap<String>", "expected 2 type argument(s) for `BTreeMap`, found 1")]
    #[case("Vec<u8, u8>", "expected 1 type argument(s) for `Vec`, found 2")]
    #[case("fn(i32) -> i32", "unsupported field type")]
    fn test_parse_annotation_shape_errors(#[case] ty_src: &str, #[case] message: &str) {
        let ty: Type = syn::parse_str(ty_src).unwrap();
        let err = parse_annotation_shape(&ty).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "unexpected error for {ty_src}: {err}"
        );
    }

    #[test]
    fn test_to_tokens() {
        let ty: Type = syn::parse_str("Option<HashMap<i32, String>>").unwrap();
        let tokens = parse_annotation_shape(&ty).unwrap().to_token_stream();
        assert_snapshot!(
            tokens,
            @r#":: typefield :: TypeAnnotation :: optional (:: typefield :: TypeAnnotation :: dict (:: typefield :: TypeAnnotation :: scalar ("i32") , :: typefield :: TypeAnnotation :: scalar ("String")))"#
        );
    }
}
