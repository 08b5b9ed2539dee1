//! `#[annotated(...)]` attribute extraction.

use syn::{Attribute, Expr, LitStr};

/// Options set on the struct itself
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    pub name: Option<String>,
}

/// Options set on a single field
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub class_var: bool,
    pub base: bool,
    pub rename: Option<String>,
    pub default: Option<Expr>,
}

/// Strips the `r#` prefix from raw identifiers.
pub fn strip_raw_prefix(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

pub fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("annotated") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.name = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unknown annotated attribute, expected `name`"))
            }
        })?;
    }
    Ok(parsed)
}

pub fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    let mut last = None;
    for attr in attrs {
        if !attr.path().is_ident("annotated") {
            continue;
        }
        last = Some(attr);
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("class_var") {
                parsed.class_var = true;
            } else if meta.path.is_ident("base") {
                parsed.base = true;
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.rename = Some(lit.value());
            } else if meta.path.is_ident("default") {
                parsed.default = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error(
                    "unknown annotated attribute, expected one of `class_var`, `base`, `rename`, `default`",
                ));
            }
            Ok(())
        })?;
    }

    if let Some(attr) = last
        && parsed.base
        && (parsed.class_var || parsed.rename.is_some() || parsed.default.is_some())
    {
        return Err(syn::Error::new_spanned(
            attr,
            "`base` cannot be combined with other annotated attributes",
        ));
    }
    Ok(parsed)
}
