//! Common parsing utilities
//!
//! Shape checks and `#[class(..)]` attribute parsing.

use syn::{Data, DeriveInput, Field, Ident, Member, Type};

// =============================================================================
// Shape checks
// =============================================================================

/// Dispatch types need exactly one `TypeId`, so generics are not supported.
pub fn reject_generics(input: &DeriveInput, derive: &str) -> syn::Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.generics,
            format!("#[derive({derive})] does not support generic types"),
        ))
    }
}

// =============================================================================
// #[class(base)] Parsing
// =============================================================================

/// The field holding the embedded parent class.
pub struct BaseField {
    pub member: Member,
    pub ty: Type,
}

/// Find the single `#[class(base)]` field of a struct, if any.
pub fn find_base_field(input: &DeriveInput) -> syn::Result<Option<BaseField>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Class)] can only be used on structs",
        ));
    };

    let mut found: Option<BaseField> = None;
    for (index, field) in data.fields.iter().enumerate() {
        if !is_base_field(field)? {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "only one #[class(base)] field is allowed (single inheritance)",
            ));
        }
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(index.into()),
        };
        found = Some(BaseField {
            member,
            ty: field.ty.clone(),
        });
    }
    Ok(found)
}

fn is_base_field(field: &Field) -> syn::Result<bool> {
    let mut base = false;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("class")) {
        let arg: Ident = attr.parse_args()?;
        if arg != "base" {
            return Err(syn::Error::new_spanned(arg, "expected `#[class(base)]`"));
        }
        base = true;
    }
    Ok(base)
}
