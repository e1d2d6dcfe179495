use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::DeriveInput;

use crate::common::reject_generics;

/// #[derive(Value)] forwards to the `__impl_value!` bridge.
pub fn expand_derive_value(input: DeriveInput) -> TokenStream2 {
    if let Err(e) = reject_generics(&input, "Value") {
        return e.to_compile_error();
    }
    let ident = &input.ident;
    quote! {
        ::tola_multi::__impl_value!(#ident);
    }
}
