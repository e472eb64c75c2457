//! Field-name dispatch in generated code.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::EntityContext;

/// `if f == "a" { .. } else if f == "b" { .. } else { unknown_field(..) }`
/// over `arms`, in the order given.
pub(crate) fn field_chain(
    ctx: &EntityContext<'_>,
    var: &Ident,
    arms: Vec<(String, TokenStream)>,
) -> TokenStream {
    let rt = ctx.rt();
    let label = ctx.label_const();
    let fallback = quote!(#rt::nql::unknown_field(Self::#label, #var));

    if arms.is_empty() {
        return fallback;
    }

    let mut chain = TokenStream::new();
    for (i, (name, body)) in arms.into_iter().enumerate() {
        if i > 0 {
            chain.extend(quote!(else));
        }
        chain.extend(quote! {
            if #var == #name {
                #body
            }
        });
    }
    chain.extend(quote! {
        else {
            #fallback
        }
    });
    chain
}
