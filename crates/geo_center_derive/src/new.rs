use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

use crate::attrs;

/// Generates `new` taking every non-`Option` field in declaration order, with
/// `Option` fields starting as `None`, plus a `with_<field>` builder per field.
pub fn derive_new_inner(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident.clone();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match attrs::named_fields(&input, "New") {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let mut new_args = Vec::new();
    let mut inits = Vec::new();
    let mut builders = Vec::new();

    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let method = format_ident!("with_{}", ident);

        if let Some(inner) = attrs::inner_of_option(&field.ty) {
            inits.push(quote! { #ident: None });
            builders.push(quote! {
                pub fn #method(mut self, #ident: #inner) -> Self {
                    self.#ident = Some(#ident);
                    self
                }
            });
        } else {
            let ty = &field.ty;
            new_args.push(quote! { #ident: #ty });
            inits.push(quote! { #ident });
            builders.push(quote! {
                pub fn #method(mut self, #ident: #ty) -> Self {
                    self.#ident = #ident;
                    self
                }
            });
        }
    }

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            pub const fn new(#(#new_args),*) -> Self {
                Self { #(#inits),* }
            }

            #(#builders)*
        }
    };

    TokenStream::from(expanded)
}
