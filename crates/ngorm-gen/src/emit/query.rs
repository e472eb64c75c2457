//! Point lookups, paginated lists, conditions and result binding.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::dispatch::field_chain;
use super::EntityContext;

/// `MATCH` pattern binding the model to `v` (vertex) or `e` (edge).
fn pattern(ctx: &EntityContext<'_>) -> String {
    if ctx.is_vertex() {
        format!("MATCH (v:{})", ctx.label())
    } else {
        format!("MATCH ()-[e:{}]->()", ctx.label())
    }
}

/// Identity followed by every property, aliased `<label>_<prop>`.
fn projection(ctx: &EntityContext<'_>) -> String {
    let label = ctx.label();
    let mut items = if ctx.is_vertex() {
        vec![format!("id(v) AS {}", ctx.column("id"))]
    } else {
        vec![
            format!("src(e) AS {}", ctx.column("src")),
            format!("dst(e) AS {}", ctx.column("dst")),
            format!("rank(e) AS {}", ctx.column("rank")),
        ]
    };
    for field in &ctx.fields {
        let prop = field.name();
        if ctx.is_vertex() {
            items.push(format!("v.{label}.{prop} AS {}", ctx.column(prop)));
        } else {
            items.push(format!("e.{prop} AS {}", ctx.column(prop)));
        }
    }
    items.join(", ")
}

pub(crate) fn bind_record(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let marker = &ctx.marker;
    let f = format_ident!("f");

    let mut arms: Vec<(String, TokenStream)> = ctx
        .fields
        .iter()
        .map(|field| {
            let ident = &field.ident;
            let value = field
                .ty
                .deserialize(rt, quote!(record), &ctx.column(field.name()));
            (field.name().to_string(), quote!(self.#ident = #value;))
        })
        .collect();

    let identity = if ctx.is_vertex() {
        let id = ctx.column("id");
        quote!(self.#marker.set_id(#rt::nql::int_column(record, #id));)
    } else {
        let (src, dst, rank) = (ctx.column("src"), ctx.column("dst"), ctx.column("rank"));
        quote! {
            self.#marker.set_src(#rt::nql::int_column(record, #src));
            self.#marker.set_dst(#rt::nql::int_column(record, #dst));
            self.#marker.set_rank(#rt::nql::int_column(record, #rank));
        }
    };
    // The identity is bound unconditionally; `id` stays a valid field name.
    arms.push(("id".to_string(), TokenStream::new()));
    let chain = field_chain(ctx, &f, arms);

    quote! {
        /// Assign the identity and the requested fields from `record` (every
        /// property when `fields` is empty).
        pub fn bind_record<R: #rt::Record>(&mut self, record: &R, fields: &[&str]) {
            #identity
            let fields = if fields.is_empty() {
                Self::all_fields()
            } else {
                fields
            };
            for &f in fields {
                #chain
            }
        }
    }
}

pub(crate) fn condition_item(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let marker = &ctx.marker;
    let label = ctx.label();
    let f = format_ident!("f");

    let mut arms: Vec<(String, TokenStream)> = ctx
        .fields
        .iter()
        .map(|field| {
            let prop = field.name();
            let ident = &field.ident;
            let prefix = if ctx.is_vertex() {
                format!("v.{label}.{prop}==")
            } else {
                format!("e.{prop}==")
            };
            let literal = field.ty.literal(rt, quote!(self.#ident));
            (prop.to_string(), quote!(format!("{}{}", #prefix, #literal)))
        })
        .collect();

    let identity = if ctx.is_vertex() {
        quote!(format!("id(v)=={}", self.#marker.id()))
    } else {
        quote! {
            format!(
                "src(e)=={} AND dst(e)=={} AND rank(e)=={}",
                self.#marker.src(),
                self.#marker.dst(),
                self.#marker.rank()
            )
        }
    };
    arms.push(("id".to_string(), identity));
    let chain = field_chain(ctx, &f, arms);

    quote! {
        /// Equality predicates on the current values of the requested fields.
        pub fn condition_item(&self, fields: &[&str]) -> Vec<String> {
            fields.iter().map(|&f| -> String { #chain }).collect()
        }
    }
}

pub(crate) fn bind_one(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();

    quote! {
        /// Bind the first row of `result`. Returns `false` when it is empty.
        pub fn bind_one<RS: #rt::ResultSet>(&mut self, result: &RS) -> bool {
            if result.row_size() == 0 {
                return false;
            }
            let record = #rt::nql::record(result, 0);
            self.bind_record(&record, &[]);
            true
        }
    }
}

pub(crate) fn one(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let pattern = pattern(ctx);
    let projection = projection(ctx);

    quote! {
        /// Load the first model matching the current values of `fields` into
        /// `self`. Returns `false` when nothing matches.
        pub fn one<S: #rt::Session>(&mut self, session: &mut S, fields: &[&str]) -> bool {
            let conditions = self.condition_item(fields);
            let nql = #rt::nql::match_query(
                #pattern,
                &conditions,
                #projection,
                Some(#rt::Page::first()),
            );
            let result = #rt::nql::execute(session, &nql);
            self.bind_one(&result)
        }
    }
}

pub(crate) fn list(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let list_ident = ctx.list_ident();
    let pattern = pattern(ctx);
    let projection = projection(ctx);

    quote! {
        /// All models matching the current values of `fields`, optionally
        /// restricted to one page.
        pub fn list<S: #rt::Session>(
            &self,
            session: &mut S,
            page: Option<#rt::Page>,
            fields: &[&str],
        ) -> #list_ident {
            let conditions = self.condition_item(fields);
            let nql = #rt::nql::match_query(#pattern, &conditions, #projection, page);
            let result = #rt::nql::execute(session, &nql);
            let mut list = #list_ident::default();
            list.bind_result(&result, &[]);
            list
        }
    }
}

/// `<Entity>List` and its result binder.
pub(crate) fn list_type(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let ident = &ctx.ident;
    let list_ident = ctx.list_ident();
    let doc = format!("Rows of a [`{ident}`] query.");

    quote! {
        #[doc = #doc]
        #[derive(Default)]
        pub struct #list_ident(pub Vec<#ident>);

        impl #list_ident {
            /// Append one model per row of `result`.
            pub fn bind_result<RS: #rt::ResultSet>(&mut self, result: &RS, fields: &[&str]) {
                for i in 0..result.row_size() {
                    let record = #rt::nql::record(result, i);
                    let mut model = <#ident as Default>::default();
                    model.bind_record(&record, fields);
                    self.0.push(model);
                }
            }
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
    fn test_vertex_projection() {
        let options = EmitOptions::new("::ngorm", false).unwrap();
        let entity = person();
        let ctx = EntityContext::new(&entity, &options).unwrap();

        assert_eq!(pattern(&ctx), "MATCH (v:person)");
        assert_eq!(
            projection(&ctx),
            "id(v) AS person_id, v.person.name AS person_name, v.person.age AS person_age"
        );
    }

    #[test]
    fn test_edge_projection() {
        let options = EmitOptions::new("::ngorm", false).unwrap();
        let mut entity = person();
        entity.kind = EntityKind::Edge;
        entity.external_name = "knows".to_string();
        entity.fields.truncate(1);
        let ctx = EntityContext::new(&entity, &options).unwrap();

        assert_eq!(pattern(&ctx), "MATCH ()-[e:knows]->()");
        assert_eq!(
            projection(&ctx),
            "src(e) AS knows_src, dst(e) AS knows_dst, rank(e) AS knows_rank, e.name AS knows_name"
        );
    }

    #[test]
    fn test_bind_record_reads_aliased_columns() {
        let options = EmitOptions::new("::ngorm", false).unwrap();
        let entity = person();
        let ctx = EntityContext::new(&entity, &options).unwrap();

        let tokens = bind_record(&ctx).to_string();
        assert!(tokens.contains(r#"string_column (record , "person_name")"#));
        assert!(tokens.contains("narrow :: < i32 >"));
        assert!(tokens.contains(r#"set_id (:: ngorm :: nql :: int_column (record , "person_id"))"#));
    }

    #[test]
    fn test_bind_record_sets_identity_before_fields() {
        let options = EmitOptions::new("::ngorm", false).unwrap();
        let entity = person();
        let ctx = EntityContext::new(&entity, &options).unwrap();

        let tokens = bind_record(&ctx).to_string();
        let identity = tokens.find("set_id").unwrap();
        let dispatch = tokens.find("for & f in fields").unwrap();
        assert!(identity < dispatch);
        assert_eq!(tokens.matches("set_id").count(), 1);
        assert!(tokens.contains(r#"if f == "id" { }"#));
    }

    #[test]
    fn test_condition_item_prefixes() {
        let options = EmitOptions::new("::ngorm", false).unwrap();
        let entity = person();
        let ctx = EntityContext::new(&entity, &options).unwrap();

        let tokens = condition_item(&ctx).to_string();
        assert!(tokens.contains(r#""v.person.age==""#));
        assert!(tokens.contains(r#""id(v)=={}""#));
    }
}
