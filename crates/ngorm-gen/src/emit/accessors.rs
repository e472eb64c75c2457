//! Label constants, field lists, literal rendering and the model traits.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::dispatch::field_chain;
use super::schema;
use super::EntityContext;

pub(crate) fn constants(ctx: &EntityContext<'_>) -> TokenStream {
    let label = ctx.label();
    let label_const = ctx.label_const();
    let statements = schema::statements(ctx);
    let doc = if ctx.is_vertex() {
        "Tag label of this model."
    } else {
        "Edge type label of this model."
    };

    quote! {
        #[doc = #doc]
        pub const #label_const: &'static str = #label;

        /// Statements run by `create`, in order.
        pub const SCHEMA_NQL: &'static [&'static str] = &[#(#statements),*];
    }
}

pub(crate) fn field_lists(ctx: &EntityContext<'_>) -> TokenStream {
    let names: Vec<&str> = ctx.fields.iter().map(|f| f.name()).collect();

    quote! {
        /// Declared property names, in declaration order.
        pub fn all_fields() -> &'static [&'static str] {
            &[#(#names),*]
        }

        /// [`Self::all_fields`] followed by `id`.
        pub fn all_fields_with_id() -> &'static [&'static str] {
            &[#(#names,)* "id"]
        }
    }
}

/// Suppress the unused-argument lint on models without properties.
fn allow_unused(ctx: &EntityContext<'_>) -> Option<TokenStream> {
    ctx.fields
        .is_empty()
        .then(|| quote!(#[allow(unused_variables)]))
}

pub(crate) fn nql_name_values(ctx: &EntityContext<'_>) -> TokenStream {
    let f = format_ident!("f");
    let arms = ctx
        .fields
        .iter()
        .map(|field| {
            let name = field.name();
            let ident = &field.ident;
            let literal = field.ty.literal(ctx.rt(), quote!(self.#ident));
            (
                name.to_string(),
                quote!(format!("{}{}{}", #name, split, #literal)),
            )
        })
        .collect();
    let chain = field_chain(ctx, &f, arms);
    let allow = allow_unused(ctx);

    quote! {
        /// `name<split>literal` for each requested property.
        #allow
        pub fn nql_name_values(&self, split: &str, fields: &[&str]) -> Vec<String> {
            fields.iter().map(|&f| -> String { #chain }).collect()
        }
    }
}

pub(crate) fn nql_values(ctx: &EntityContext<'_>) -> TokenStream {
    let f = format_ident!("f");
    let arms = ctx
        .fields
        .iter()
        .map(|field| {
            let ident = &field.ident;
            (
                field.name().to_string(),
                field.ty.literal(ctx.rt(), quote!(self.#ident)),
            )
        })
        .collect();
    let chain = field_chain(ctx, &f, arms);

    quote! {
        /// Literals of the requested properties joined with `,`.
        pub fn nql_values(&self, fields: &[&str]) -> String {
            fields
                .iter()
                .map(|&f| -> String { #chain })
                .collect::<Vec<_>>()
                .join(",")
        }
    }
}

pub(crate) fn nql_names() -> TokenStream {
    quote! {
        pub fn nql_names(fields: &[&str]) -> String {
            fields.join(",")
        }
    }
}

pub(crate) fn nql_bind(ctx: &EntityContext<'_>) -> TokenStream {
    let f = format_ident!("f");
    let label = ctx.label();

    let mut arms: Vec<(String, TokenStream)> = ctx
        .fields
        .iter()
        .map(|field| {
            let prop = field.name();
            let column = ctx.column(prop);
            let suffix = if ctx.is_vertex() {
                format!(".{label}.{prop} AS {column}")
            } else {
                format!(".{prop} AS {column}")
            };
            (prop.to_string(), quote!(format!("{}{}", alias, #suffix)))
        })
        .collect();

    let identity = if ctx.is_vertex() {
        let column = ctx.column("id");
        quote!(format!("id({}) AS {}", alias, #column))
    } else {
        let (src, dst, rank) = (ctx.column("src"), ctx.column("dst"), ctx.column("rank"));
        quote! {
            format!(
                "src({0}) AS {1}, dst({0}) AS {2}, rank({0}) AS {3}",
                alias, #src, #dst, #rank
            )
        }
    };
    arms.push(("id".to_string(), identity));
    let chain = field_chain(ctx, &f, arms);

    quote! {
        /// Projection items `alias.prop AS column` for the requested fields.
        pub fn nql_bind(alias: &str, fields: &[&str]) -> Vec<String> {
            fields.iter().map(|&f| -> String { #chain }).collect()
        }
    }
}

/// `TagModel` for vertices, `EdgeModel` for edges.
pub(crate) fn model_trait(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let ident = &ctx.ident;
    let marker = &ctx.marker;

    if ctx.is_vertex() {
        quote! {
            impl #rt::TagModel for #ident {
                fn tag_name(&self) -> &'static str {
                    Self::TAG_NAME
                }

                fn id(&self) -> i64 {
                    self.#marker.id()
                }
            }
        }
    } else {
        quote! {
            impl #rt::EdgeModel for #ident {
                fn edge_name(&self) -> &'static str {
                    Self::EDGE_NAME
                }

                fn src(&self) -> i64 {
                    self.#marker.src()
                }

                fn dst(&self) -> i64 {
                    self.#marker.dst()
                }

                fn rank(&self) -> i64 {
                    self.#marker.rank()
                }
            }
        }
    }
}
