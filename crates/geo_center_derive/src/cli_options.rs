use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{DeriveInput, LitStr, Path, Type, parse_macro_input};

use crate::attrs;

/// How a `#[cli(...)]` field takes its value on the command line.
enum Arg {
    /// `--name <value>` or `--name=<value>`.
    Value { parse_with: Option<Path> },
    /// `--name`, `--name=<bool>` and `--no-name`.
    Flag,
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let fields = match attrs::named_fields(&input, "CliOptions") {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let mut arms = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let mut long_name: Option<String> = None;
        let mut parse_with: Option<Path> = None;
        let mut flag = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("cli") {
                continue;
            }
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    let lit: LitStr = meta.value()?.parse()?;
                    long_name = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("parse_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    parse_with = Some(syn::parse_str(&lit.value())?);
                    return Ok(());
                }
                if meta.path.is_ident("flag") {
                    flag = true;
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected long/parse_with/flag"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        let Some(long_name) = long_name else {
            continue;
        };

        if flag && !attrs::is_bool(&field.ty) {
            return syn::Error::new_spanned(&field.ty, "cli(flag) requires a bool field")
                .to_compile_error()
                .into();
        }
        let arg = if flag {
            Arg::Flag
        } else {
            Arg::Value { parse_with }
        };

        let long_lit = LitStr::new(&long_name, Span::call_site());
        match arg {
            Arg::Value { parse_with } => {
                let parse_expr = build_parse_expr(&field.ty, parse_with.as_ref());
                arms.push(quote! {
                    #long_lit => {
                        let raw = value.ok_or_else(|| {
                            crate::Error::invalid_input(format!("Missing value for --{name}"))
                        })?;
                        self.#field_ident = #parse_expr;
                        Ok(true)
                    }
                });
            }
            Arg::Flag => {
                let negated_lit = LitStr::new(&format!("no-{long_name}"), Span::call_site());
                arms.push(quote! {
                    #long_lit => {
                        self.#field_ident = match value {
                            Some(raw) => Self::parse_flag(name, &raw)?,
                            None => true,
                        };
                        Ok(true)
                    }
                });
                arms.push(quote! {
                    #negated_lit => {
                        if value.is_some() {
                            return Err(crate::Error::invalid_input(format!(
                                "Flag --{name} does not take a value"
                            )));
                        }
                        self.#field_ident = false;
                        Ok(true)
                    }
                });
            }
        }
    }

    let expanded = quote! {
        impl #struct_ident {
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }

                let value = match args.peek() {
                    Some(next) if !next.starts_with("--") => args.next(),
                    _ => None,
                };

                (raw_name.to_string(), value)
            }

            fn parse_flag(name: &str, raw: &str) -> crate::Result<bool> {
                match raw.to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Ok(true),
                    "0" | "false" | "no" | "off" => Ok(false),
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid boolean for --{name}: {raw} (expected true/false)"
                    ))),
                }
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }
        }
    };

    TokenStream::from(expanded)
}

fn build_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    if let Some(parse_with) = parse_with {
        quote! { #parse_with(&raw)? }
    } else {
        quote! {
            raw.parse::<#ty>()
                .map_err(|e| crate::Error::invalid_input(format!(
                    "Invalid value for --{name}: {raw} ({e})"
                )))?
        }
    }
}
