use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input, spanned::Spanned};

use crate::utils;

/// Generates a `Display` that lists each field as an aligned `key = value`
/// line. `#[kv(fmt = "len")]` prints a collection's length instead.
pub fn expand(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_inner(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let fields = utils::named_fields(input, "KvDisplay")?;

    let mut keys = Vec::new();
    let mut vals = Vec::new();
    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let args = utils::str_args(&field.attrs, "kv", &["fmt"])?;
        let fmt = utils::last_arg(&args, "fmt").unwrap_or_else(|| "display".to_string());
        vals.push(match fmt.as_str() {
            "display" => quote! { &self.#field_ident },
            "len" => quote! { &self.#field_ident.len() },
            other => {
                return Err(syn::Error::new(
                    field.span(),
                    format!("unsupported kv fmt mode: {other}"),
                ));
            }
        });
        keys.push(field_ident.to_string());
    }

    let width = keys.iter().map(String::len).max().unwrap_or(0);
    let template: String = keys
        .iter()
        .map(|key| format!("\n\t{key:<width$} = {{}}"))
        .collect();
    let template_lit = utils::lit(&template);

    Ok(quote! {
        impl std::fmt::Display for #ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, #template_lit, #(#vals),*)
            }
        }
    })
}
