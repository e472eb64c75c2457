//! `#[derive(Model)]` makes `#[ngorm(..)]` a known attribute on graph models.
//!
//! The derive expands to nothing; code is produced by `ngormgen`. It only
//! rejects option spellings the generator would not understand, so mistakes
//! surface at compile time instead of at the next generation run.

use proc_macro::TokenStream;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, LitStr, Token};

#[proc_macro_derive(Model, attributes(ngorm))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match check(&input) {
        Ok(()) => TokenStream::new(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn check(input: &DeriveInput) -> syn::Result<()> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Model can only be derived for structs",
        ));
    };

    check_attrs(&input.attrs, false)?;
    for field in &data.fields {
        check_attrs(&field.attrs, true)?;
    }
    Ok(())
}

fn check_attrs(attrs: &[Attribute], on_field: bool) -> syn::Result<()> {
    for attr in attrs.iter().filter(|a| a.path().is_ident("ngorm")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("idx") {
                if !on_field {
                    return Err(meta.error("`idx` applies to fields, not structs"));
                }
                if meta.input.peek(Token![=]) {
                    meta.value()?.parse::<LitStr>()?;
                }
                Ok(())
            } else if meta.path.is_ident("name") {
                let name = meta.value()?.parse::<LitStr>()?;
                if !is_identifier(&name.value()) {
                    return Err(syn::Error::new_spanned(
                        name,
                        "`name` must match [A-Za-z_][A-Za-z0-9_]*",
                    ));
                }
                Ok(())
            } else if meta.path.is_ident("skip") {
                Ok(())
            } else {
                Err(meta.error("expected `idx`, `name` or `skip`"))
            }
        })?;
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
