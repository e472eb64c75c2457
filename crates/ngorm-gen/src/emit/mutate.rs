//! Insert, delete and identity assignment.

use proc_macro2::TokenStream;
use quote::quote;

use super::EntityContext;

/// Identity part of a statement: `<id>` or `<src>-><dst>[@<rank>]`.
fn key(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let marker = &ctx.marker;
    if ctx.is_vertex() {
        quote!(#rt::nql::int(self.#marker.id()))
    } else {
        quote!(#rt::nql::edge_key(self.#marker.src(), self.#marker.dst(), self.#marker.rank()))
    }
}

pub(crate) fn insert(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let key = key(ctx);
    let (template, label) = if ctx.is_vertex() {
        ("insert VERTEX {}({}) VALUES {}:({})", quote!(Self::TAG_NAME))
    } else {
        ("insert EDGE {}({}) VALUES {}:({})", quote!(Self::EDGE_NAME))
    };

    quote! {
        /// Insert the requested properties (all of them when `fields` is empty).
        pub fn insert<S: #rt::Session>(&self, session: &mut S, fields: &[&str]) {
            let fields = if fields.is_empty() {
                Self::all_fields()
            } else {
                fields
            };
            let nql = format!(
                #template,
                #label,
                Self::nql_names(fields),
                #key,
                self.nql_values(fields)
            );
            #rt::nql::execute(session, &nql);
        }
    }
}

pub(crate) fn remove_by_id(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let key = key(ctx);
    let nql = if ctx.is_vertex() {
        quote!(format!("DELETE VERTEX {} WITH EDGE", #key))
    } else {
        quote!(format!("DELETE EDGE {} {}", Self::EDGE_NAME, #key))
    };

    quote! {
        /// Delete this model by identity.
        pub fn remove_by_id<S: #rt::Session>(&self, session: &mut S) {
            let nql = #nql;
            #rt::nql::execute(session, &nql);
        }
    }
}

/// Vertices only.
pub(crate) fn gen_id(ctx: &EntityContext<'_>) -> TokenStream {
    if !ctx.is_vertex() {
        return TokenStream::new();
    }
    let rt = ctx.rt();
    let marker = &ctx.marker;

    quote! {
        /// Assign a fresh identity from `generator`.
        pub fn gen_id(&mut self, generator: &impl #rt::IdGenerator) {
            self.#marker.gen_id(generator);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::tests::person;
    use crate::emit::EmitOptions;
    use crate::model::EntityKind;

    #[test]
    fn test_vertex_statements() {
        let options = EmitOptions::new("::ngorm", false).unwrap();
        let entity = person();
        let ctx = EntityContext::new(&entity, &options).unwrap();

        let insert = insert(&ctx).to_string();
        assert!(insert.contains(r#""insert VERTEX {}({}) VALUES {}:({})""#));
        assert!(insert.contains("self . tag . id ()"));

        let remove = remove_by_id(&ctx).to_string();
        assert!(remove.contains("DELETE VERTEX {} WITH EDGE"));
        assert!(!gen_id(&ctx).is_empty());
    }

    #[test]
    fn test_edge_statements() {
        let options = EmitOptions::new("::ngorm", false).unwrap();
        let mut entity = person();
        entity.kind = EntityKind::Edge;
        entity.marker_field = Some("link".to_string());
        let ctx = EntityContext::new(&entity, &options).unwrap();

        let insert = insert(&ctx).to_string();
        assert!(insert.contains("insert EDGE"));
        assert!(insert.contains("edge_key (self . link . src ()"));
        assert!(remove_by_id(&ctx).to_string().contains("DELETE EDGE {} {}"));
        assert!(gen_id(&ctx).is_empty());
    }
}
