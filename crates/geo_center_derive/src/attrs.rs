use syn::{
    AngleBracketedGenericArguments, Data, DeriveInput, Fields, FieldsNamed, GenericArgument,
    PathArguments, Type, TypePath, spanned::Spanned,
};

/// Named fields of a struct, or a ready-to-emit compile error naming `derive`.
pub fn named_fields<'a>(input: &'a DeriveInput, derive: &str) -> Result<&'a FieldsNamed, syn::Error> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            format!("{derive} can only be derived for structs"),
        ));
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new(
            input.span(),
            format!("{derive} requires named fields"),
        ));
    };
    Ok(fields)
}

pub fn inner_of_option(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { path, .. }) = ty else {
        return None;
    };
    let is_option = match path.segments.len() {
        1 => path.segments[0].ident == "Option",
        3 => {
            (path.segments[0].ident == "std" || path.segments[0].ident == "core")
                && path.segments[1].ident == "option"
                && path.segments[2].ident == "Option"
        }
        _ => false,
    };
    if !is_option {
        return None;
    }

    if let Some(seg) = path.segments.last()
        && let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) =
            &seg.arguments
        && let Some(GenericArgument::Type(t)) = args.first()
    {
        return Some(t);
    }
    None
}

pub fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { path, .. }) if path.is_ident("bool"))
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}
