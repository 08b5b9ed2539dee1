mod annotated_impl;
mod attrs;
mod type_annotation;

use proc_macro::TokenStream;

use crate::annotated_impl::process_derive_annotated;

/// Derive macro for Annotated
#[proc_macro_derive(Annotated, attributes(annotated))]
pub fn derive_annotated(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    match process_derive_annotated(&input) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
