use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, Ident, LitStr, Variant, meta::ParseNestedMeta, parse_macro_input,
};

use crate::attrs;

/// A unit enum accepted as a command-line value.
struct ValueEnum {
    ident: Ident,
    /// Option name used in parse errors, e.g. `log-level`.
    option: String,
    variants: Vec<ValueVariant>,
}

struct ValueVariant {
    ident: Ident,
    /// Spelling used for display and listed in errors.
    name: String,
    aliases: Vec<String>,
}

impl ValueVariant {
    fn accepted(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match value_enum(&input) {
        Ok(value_enum) => expand(&value_enum).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn value_enum(input: &DeriveInput) -> syn::Result<ValueEnum> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "CliValue can only be derived for enums",
        ));
    };

    let mut option = attrs::to_kebab_case(&input.ident.to_string());
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("cli_value")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("option") {
                option = meta.value()?.parse::<LitStr>()?.value();
                Ok(())
            } else {
                Err(meta.error("expected `option = \"...\"`"))
            }
        })?;
    }

    let variants = data
        .variants
        .iter()
        .map(value_variant)
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(ValueEnum {
        ident: input.ident.clone(),
        option,
        variants,
    })
}

fn value_variant(variant: &Variant) -> syn::Result<ValueVariant> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new_spanned(
            variant,
            "CliValue variants cannot carry data",
        ));
    }

    let mut name = attrs::to_kebab_case(&variant.ident.to_string());
    let mut aliases = Vec::new();
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("cli")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = lowercase_value(&meta)?;
            } else if meta.path.is_ident("alias") {
                aliases.push(lowercase_value(&meta)?);
            } else {
                return Err(meta.error("expected `name` or `alias`"));
            }
            Ok(())
        })?;
    }

    Ok(ValueVariant {
        ident: variant.ident.clone(),
        name,
        aliases,
    })
}

fn lowercase_value(meta: &ParseNestedMeta) -> syn::Result<String> {
    Ok(meta.value()?.parse::<LitStr>()?.value().to_ascii_lowercase())
}

fn expand(value_enum: &ValueEnum) -> TokenStream2 {
    let ident = &value_enum.ident;
    let option = &value_enum.option;
    let expected = value_enum
        .variants
        .iter()
        .map(|v| v.name.as_str())
        .collect::<Vec<_>>()
        .join("|");

    let parse_arms = value_enum.variants.iter().map(|v| {
        let variant = &v.ident;
        let accepted = v.accepted();
        quote! { #(#accepted)|* => Ok(Self::#variant), }
    });
    let name_arms = value_enum.variants.iter().map(|v| {
        let variant = &v.ident;
        let name = &v.name;
        quote! { Self::#variant => #name, }
    });

    quote! {
        impl #ident {
            /// Case-insensitive parse of a command-line value.
            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option, raw, #expected
                    ))),
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }

        impl std::fmt::Display for #ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{expand, value_enum};

    #[test]
    fn option_name_defaults_to_kebab_case_enum_name() {
        let input: syn::DeriveInput = parse_quote!(
            enum LogFormat {
                Compact,
                Pretty,
            }
        );
        let Ok(parsed) = value_enum(&input) else {
            panic!("unit enum should parse");
        };
        assert_eq!(parsed.option, "log-format");
        let names: Vec<&str> = parsed.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["compact", "pretty"]);
    }

    #[test]
    fn names_and_aliases_are_lowercased() {
        let input: syn::DeriveInput = parse_quote!(
            #[cli_value(option = "unit")]
            enum DistanceUnit {
                #[cli(name = "KM", alias = "Kilometers")]
                Kilometers,
            }
        );
        let Ok(parsed) = value_enum(&input) else {
            panic!("unit enum should parse");
        };
        assert_eq!(parsed.option, "unit");
        let accepted: Vec<&str> = parsed.variants[0].accepted().collect();
        assert_eq!(accepted, ["km", "kilometers"]);
        assert!(expand(&parsed).to_string().contains("\"km\""));
    }

    #[test]
    fn rejects_data_variants_and_structs() {
        let tuple_variant: syn::DeriveInput = parse_quote!(
            enum Level {
                Custom(u8),
            }
        );
        let Err(err) = value_enum(&tuple_variant) else {
            panic!("data variant should fail");
        };
        assert!(err.to_string().contains("cannot carry data"));

        let strukt: syn::DeriveInput = parse_quote!(
            struct Level {
                value: u8,
            }
        );
        assert!(value_enum(&strukt).is_err());
    }
}
