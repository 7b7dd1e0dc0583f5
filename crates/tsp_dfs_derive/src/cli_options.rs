use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Path, parse_macro_input};

use crate::utils;

/// Generates `apply_cli_option`, which assigns the field whose
/// `#[cli(long = "...")]` matches `name` and reports whether it matched.
/// Fields without a `long` name are left to the caller.
pub fn expand(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_inner(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let fields = utils::named_fields(input, "CliOptions")?;

    let mut arms = Vec::new();
    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let args = utils::str_args(&field.attrs, "cli", &["long", "parse_with"])?;
        let Some(long) = utils::last_arg(&args, "long") else {
            continue;
        };
        let parse_with: Option<Path> = utils::last_arg(&args, "parse_with")
            .map(|p| syn::parse_str(&p))
            .transpose()?;

        let long_lit = utils::lit(&long);
        let parse_expr = utils::cli_parse_expr(&field.ty, parse_with.as_ref());
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

    Ok(quote! {
        impl #ident {
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
    })
}
