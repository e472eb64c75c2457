//! Template emission.
//!
//! Every vertex and edge model gets one `impl` block holding its constants,
//! accessors, statements and binders, plus a companion list type. Plain
//! models produce nothing. Fragments are appended to a [`SourceBuilder`] in
//! model order; the aggregate `create_schema` routine comes last.

mod accessors;
mod dispatch;
mod mutate;
mod query;
mod schema;

pub use schema::schema_statements;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::Ident;

use crate::codec::SemanticType;
use crate::error::{GenError, Result};
use crate::model::{EntityKind, EntityModel, FieldModel};

/// Accumulates generated items behind a banner.
#[derive(Debug, Default)]
pub struct SourceBuilder {
    banner: Vec<String>,
    body: TokenStream,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `//` comment line to the banner.
    pub fn banner_line(&mut self, line: impl Into<String>) {
        self.banner.push(line.into());
    }

    pub fn push(&mut self, tokens: TokenStream) {
        self.body.extend(tokens);
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Banner lines followed by the unformatted body.
    pub fn finish(self) -> String {
        let mut out = String::new();
        for line in &self.banner {
            out.push_str("// ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body.to_string());
        out.push('\n');
        out
    }
}

/// Settings shared by every fragment.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Runtime crate path as tokens (`::ngorm`).
    pub runtime: TokenStream,
    /// Carry struct doc comments into `CREATE TAG/EDGE ... COMMENT = '...'`.
    pub line_comment: bool,
}

impl EmitOptions {
    pub fn new(runtime: &str, line_comment: bool) -> Result<Self> {
        let path: syn::Path =
            syn::parse_str(runtime).map_err(|_| GenError::RuntimePath(runtime.to_string()))?;
        Ok(Self {
            runtime: quote!(#path),
            line_comment,
        })
    }
}

/// A property with its resolved codec.
pub(crate) struct ResolvedField<'a> {
    pub model: &'a FieldModel,
    pub ty: SemanticType,
    pub ident: Ident,
}

impl ResolvedField<'_> {
    pub fn name(&self) -> &str {
        &self.model.external_name
    }
}

/// One graph model prepared for emission.
pub(crate) struct EntityContext<'a> {
    pub entity: &'a EntityModel,
    pub ident: Ident,
    pub marker: Ident,
    pub fields: Vec<ResolvedField<'a>>,
    pub options: &'a EmitOptions,
}

impl<'a> EntityContext<'a> {
    fn new(entity: &'a EntityModel, options: &'a EmitOptions) -> Result<Self> {
        let fields = entity
            .fields
            .iter()
            .map(|field| {
                Ok(ResolvedField {
                    ty: SemanticType::resolve(entity, field)?,
                    ident: ident(&field.declared_name),
                    model: field,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let marker = match entity.marker_field.as_deref() {
            Some(marker) => marker,
            None if entity.kind == EntityKind::Vertex => "tag",
            None => "edge",
        };

        Ok(Self {
            entity,
            ident: ident(&entity.declared_name),
            marker: ident(marker),
            fields,
            options,
        })
    }

    pub fn rt(&self) -> &TokenStream {
        &self.options.runtime
    }

    pub fn label(&self) -> &str {
        &self.entity.external_name
    }

    pub fn is_vertex(&self) -> bool {
        self.entity.kind == EntityKind::Vertex
    }

    /// `TAG_NAME` or `EDGE_NAME`.
    pub fn label_const(&self) -> Ident {
        if self.is_vertex() {
            format_ident!("TAG_NAME")
        } else {
            format_ident!("EDGE_NAME")
        }
    }

    /// Result column alias of a property: `<label>_<prop>`.
    pub fn column(&self, prop: &str) -> String {
        format!("{}_{}", self.label(), prop)
    }

    pub fn list_ident(&self) -> Ident {
        format_ident!("{}List", self.ident)
    }
}

/// Identifier for a declared name, raw when it is a keyword.
fn ident(name: &str) -> Ident {
    syn::parse_str::<Ident>(name).unwrap_or_else(|_| Ident::new_raw(name, Span::call_site()))
}

/// Emit every graph model followed by `create_schema`.
pub fn emit_models(
    builder: &mut SourceBuilder,
    entities: &[EntityModel],
    options: &EmitOptions,
) -> Result<()> {
    let mut graph = Vec::new();
    for entity in entities.iter().filter(|e| e.kind.is_graph()) {
        let ctx = EntityContext::new(entity, options)?;
        emit_entity(builder, &ctx);
        graph.push(ctx.ident);
    }

    let rt = &options.runtime;
    let allow = graph
        .is_empty()
        .then(|| quote!(#[allow(unused_variables)]));
    builder.push(quote! {
        /// Create every tag, edge and index declared in this module.
        #allow
        pub fn create_schema<S: #rt::Session>(session: &mut S) {
            #( #graph::create(session); )*
        }
    });
    Ok(())
}

fn emit_entity(builder: &mut SourceBuilder, ctx: &EntityContext<'_>) {
    let ident = &ctx.ident;

    let consts = accessors::constants(ctx);
    let fields = accessors::field_lists(ctx);
    let name_values = accessors::nql_name_values(ctx);
    let values = accessors::nql_values(ctx);
    let names = accessors::nql_names();
    let bind = accessors::nql_bind(ctx);
    let create = schema::create(ctx);
    let insert = mutate::insert(ctx);
    let bind_record = query::bind_record(ctx);
    let condition = query::condition_item(ctx);
    let bind_one = query::bind_one(ctx);
    let one = query::one(ctx);
    let list = query::list(ctx);
    let remove = mutate::remove_by_id(ctx);
    let gen_id = mutate::gen_id(ctx);

    builder.push(quote! {
        impl #ident {
            #consts
            #fields
            #name_values
            #values
            #names
            #bind
            #create
            #insert
            #bind_record
            #condition
            #bind_one
            #one
            #list
            #remove
            #gen_id
        }
    });
    builder.push(accessors::model_trait(ctx));
    builder.push(query::list_type(ctx));
}
