//! `#[derive(Annotated)]` implementation.
//!
//! Generates an `Annotated` impl whose `annotations()` returns the struct's
//! declared fields as `(name, TypeAnnotation)` pairs, plus any `base` fields
//! as inherited annotation sets.
//!
//! ```ignore
//! #[derive(Annotated)]
//! struct Account {
//!     #[annotated(base)]
//!     entity: Entity,
//!     #[annotated(default = "guest")]
//!     name: Option<String>,
//!     #[annotated(class_var)]
//!     table: String,
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::{
    attrs::{parse_container_attrs, parse_field_attrs, strip_raw_prefix},
    type_annotation::parse_annotation_shape,
};

/// Process derive input and return the expanded impl
pub fn process_derive_annotated(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let container = parse_container_attrs(&input.attrs)?;
    let class_name = container.name.unwrap_or_else(|| name.to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "#[derive(Annotated)] requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "#[derive(Annotated)] only supports structs",
            ));
        }
    };

    let mut bases = Vec::new();
    let mut attributes = Vec::new();

    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        let ty = &field.ty;

        if attrs.base {
            bases.push(quote! {
                class.bases.push(<#ty as ::typefield::Annotated>::annotations());
            });
            continue;
        }

        let field_name = match (&attrs.rename, &field.ident) {
            (Some(rename), _) => rename.clone(),
            (None, Some(ident)) => strip_raw_prefix(&ident.to_string()).to_string(),
            (None, None) => continue,
        };

        let shape = parse_annotation_shape(ty)?;
        let annotation = if attrs.class_var {
            quote! { ::typefield::TypeAnnotation::class_var(#shape) }
        } else {
            quote! { #shape }
        };
        let default = match &attrs.default {
            Some(expr) => quote! {
                ::core::option::Option::Some(::typefield::serde_json::json!(#expr))
            },
            None => quote! { ::core::option::Option::None },
        };

        attributes.push(quote! {
            class.attributes.push(::typefield::AttributeSpec {
                name: ::std::string::String::from(#field_name),
                annotation: #annotation,
                default: #default,
            });
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::typefield::Annotated for #name #ty_generics #where_clause {
            fn annotations() -> ::typefield::ClassAnnotations {
                #[allow(unused_mut)]
                let mut class = ::typefield::ClassAnnotations::new(#class_name);
                #(#bases)*
                #(#attributes)*
                class
            }
        }
    })
}
