use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::DeriveInput;

use crate::common::{find_base_field, reject_generics};

/// #[derive(Class)] generates a call to the declarative macro bridge.
/// This allows module_path!() to be expanded at the definition site.
///
/// The two-layer architecture:
/// 1. #[derive(Class)] (proc-macro) -> finds the base field, emits __impl_class! call
/// 2. __impl_class! (decl-macro) -> Object / Class / Dispatch impls
pub fn expand_derive_class(input: DeriveInput) -> TokenStream2 {
    match try_expand(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error(),
    }
}

fn try_expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    reject_generics(input, "Class")?;

    let ident = &input.ident;
    let ident_str = ident.to_string();

    Ok(match find_base_field(input)? {
        Some(base) => {
            let member = &base.member;
            let ty = &base.ty;
            quote! {
                ::tola_multi::__impl_class!(#ident, #ident_str, #member: #ty);
            }
        }
        None => quote! {
            ::tola_multi::__impl_class!(#ident, #ident_str);
        },
    })
}
