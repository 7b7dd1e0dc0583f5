use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input, spanned::Spanned};

use crate::utils;

/// Generates a case-insensitive `parse(&str) -> crate::Result<Self>` and a
/// kebab-case `Display` for enums made of unit variants.
pub fn expand(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_inner(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "CliValue can only be derived for enums",
        ));
    };

    let enum_args = utils::str_args(&input.attrs, "cli_value", &["option"])?;
    let option = utils::last_arg(&enum_args, "option")
        .unwrap_or_else(|| utils::to_kebab_case(&ident.to_string()));

    let mut parse_arms = Vec::new();
    let mut display_arms = Vec::new();
    let mut expected = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "CliValue only supports unit variants",
            ));
        }
        let variant_ident = &variant.ident;
        let args = utils::str_args(&variant.attrs, "cli", &["alias"])?;
        let canonical = utils::to_kebab_case(&variant_ident.to_string());

        let accepted: Vec<_> = std::iter::once(canonical.clone())
            .chain(utils::all_args(&args, "alias"))
            .map(|v| utils::lit(&v))
            .collect();
        let canonical_lit = utils::lit(&canonical);

        parse_arms.push(quote! { #(#accepted)|* => Ok(Self::#variant_ident), });
        display_arms.push(quote! { Self::#variant_ident => #canonical_lit, });
        expected.push(canonical);
    }

    let option_lit = utils::lit(&option);
    let expected_lit = utils::lit(&expected.join("|"));

    Ok(quote! {
        impl #ident {
            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit, raw, #expected_lit
                    ))),
                }
            }
        }

        impl std::fmt::Display for #ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    #(#display_arms)*
                })
            }
        }
    })
}
