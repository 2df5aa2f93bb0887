use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use crate::attrs;

/// Renders a struct as `key = value` lines, one per field, with keys padded
/// to a common width.
pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = &input.ident;

    let fields = match attrs::named_fields(&input, "KvDisplay") {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let idents: Vec<_> = fields.named.iter().filter_map(|f| f.ident.as_ref()).collect();
    let width = idents.iter().map(|i| i.to_string().len()).max().unwrap_or(0);
    let lines = idents.iter().map(|ident| {
        let key = format!("\n\t{:<width$} = ", ident.to_string());
        quote! {
            f.write_str(#key)?;
            std::fmt::Display::fmt(&self.#ident, f)?;
        }
    });

    quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                #(#lines)*
                Ok(())
            }
        }
    }
    .into()
}
