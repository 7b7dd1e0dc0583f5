use proc_macro2::Span;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, FieldsNamed, LitStr, Path, Type, spanned::Spanned};

/// `key = "value"` pairs gathered from every `#[attr_name(...)]` on an item.
pub type StrArgs = Vec<(String, LitStr)>;

pub fn str_args(attrs: &[Attribute], attr_name: &str, allowed: &[&str]) -> syn::Result<StrArgs> {
    let mut args = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident(attr_name)) {
        attr.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();
            if !allowed.contains(&key.as_str()) {
                return Err(meta.error(format!(
                    "unsupported {attr_name} attribute; expected one of {}",
                    allowed.join("/")
                )));
            }
            let lit: LitStr = meta.value()?.parse()?;
            args.push((key, lit));
            Ok(())
        })?;
    }
    Ok(args)
}

pub fn last_arg(args: &StrArgs, key: &str) -> Option<String> {
    args.iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, lit)| lit.value())
}

pub fn all_args(args: &StrArgs, key: &str) -> Vec<String> {
    args.iter()
        .filter(|(k, _)| k == key)
        .map(|(_, lit)| lit.value())
        .collect()
}

pub fn named_fields<'a>(input: &'a DeriveInput, derive: &str) -> syn::Result<&'a FieldsNamed> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            _ => Err(syn::Error::new(
                input.span(),
                format!("{derive} requires named fields"),
            )),
        },
        _ => Err(syn::Error::new(
            input.span(),
            format!("{derive} can only be derived for structs"),
        )),
    }
}

pub fn lit(value: &str) -> LitStr {
    LitStr::new(value, Span::call_site())
}

/// Expression turning the `raw: String` binding into a value of `ty`.
pub fn cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    match parse_with {
        Some(parse_with) => quote! { #parse_with(&raw)? },
        None => quote! {
            raw.parse::<#ty>().map_err(|e| {
                crate::Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})"))
            })?
        },
    }
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
