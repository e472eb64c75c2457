//! DDL for tags, edges and tag indexes.

use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitOptions, EntityContext};
use crate::error::Result;
use crate::model::EntityModel;

/// Escape a comment for a single-quoted nGQL string.
fn escape_comment(comment: &str) -> String {
    comment.replace('\\', "\\\\").replace('\'', "\\'")
}

pub(crate) fn statements(ctx: &EntityContext<'_>) -> Vec<String> {
    let entity = ctx.entity;
    let label = ctx.label();
    let keyword = entity.kind.keyword();

    let columns: Vec<String> = ctx
        .fields
        .iter()
        .map(|field| {
            format!(
                "{} {} COMMENT '{}'",
                field.name(),
                field.ty.ddl_type(),
                escape_comment(field.model.comment.as_deref().unwrap_or_default())
            )
        })
        .collect();

    let table_comment = match (&entity.comment, ctx.options.line_comment) {
        (Some(comment), true) => format!(" COMMENT = '{}'", escape_comment(comment)),
        _ => String::new(),
    };

    let mut statements = vec![format!(
        "CREATE {keyword} IF NOT EXISTS {label}({}){table_comment};",
        columns.join(", ")
    )];

    if ctx.is_vertex() {
        for field in ctx.fields.iter() {
            if let Some(index) = &field.model.index {
                statements.push(format!(
                    "CREATE TAG INDEX IF NOT EXISTS idx_{} ON {label}({})",
                    field.name(),
                    index.columns(field.name())
                ));
            }
        }
    }

    statements
}

/// The DDL a model would emit, for callers that want the statements without
/// generating code.
pub fn schema_statements(entity: &EntityModel, options: &EmitOptions) -> Result<Vec<String>> {
    let ctx = EntityContext::new(entity, options)?;
    Ok(statements(&ctx))
}

pub(crate) fn create(ctx: &EntityContext<'_>) -> TokenStream {
    let rt = ctx.rt();
    let doc = if ctx.is_vertex() {
        "Create the tag and its indexes if they do not exist."
    } else {
        "Create the edge type if it does not exist."
    };

    quote! {
        #[doc = #doc]
        pub fn create<S: #rt::Session>(session: &mut S) {
            for nql in Self::SCHEMA_NQL {
                #rt::nql::execute(session, nql);
            }
        }
    }
}
