//! Model extraction from Rust declarations using syn.
//!
//! Only top-level `struct` items are considered. A struct is a vertex when
//! one of its fields is typed `Tag` (or `Box<Tag>`), an edge when one is typed
//! `Edge`, and plain otherwise. Every other field with a plain single-segment
//! type becomes a property; anything else is skipped.

mod attrs;
mod validate;

pub use attrs::{cfg_enabled, doc_comment, parse_ngorm, NgormAttrs};
pub use validate::validate;

use std::path::{Path, PathBuf};

use log::{debug, warn};
use proc_macro2::Span;
use syn::{visit::Visit, Fields, GenericArgument, Item, ItemStruct, PathArguments, Type};

use crate::config::{EDGE_MARKER, TAG_MARKER};
use crate::error::{GenError, Result};
use crate::model::{EntityKind, EntityModel, FieldModel};
use crate::naming::{unraw, NamingPolicy};

/// One declaration file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Settings that shape extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Allow-list of declared names. Empty admits every struct.
    pub types: Vec<String>,
    /// Enabled build constraints.
    pub tags: Vec<String>,
    pub naming: NamingPolicy,
}

/// Extract and validate the models declared in `sources`, in order.
pub fn extract(sources: &[SourceFile], options: &ExtractOptions) -> Result<Vec<EntityModel>> {
    let mut pending: Vec<String> = options.types.clone();
    pending.sort();
    pending.dedup();
    let filtered = !pending.is_empty();
    let mut entities = Vec::new();

    for source in sources {
        if filtered && pending.is_empty() {
            break;
        }

        let syntax = syn::parse_file(&source.content).map_err(|e| GenError::Parse {
            path: source.path.clone(),
            message: format!("{} (line {})", e, e.span().start().line),
        })?;

        let mut visitor = ModelVisitor {
            path: &source.path,
            options,
            pending: filtered.then_some(&mut pending),
            entities: &mut entities,
            error: None,
        };
        visitor.visit_file(&syntax);
        if let Some(err) = visitor.error {
            return Err(err);
        }
    }

    for name in &pending {
        warn!("type {name} was requested but not found");
    }

    validate(&entities)?;
    Ok(entities)
}

/// How a field's type takes part in the model.
#[derive(Debug, PartialEq, Eq)]
enum FieldType {
    Marker(EntityKind),
    Scalar(String),
    Other,
}

fn classify_type(ty: &Type) -> FieldType {
    let Type::Path(type_path) = ty else {
        return FieldType::Other;
    };
    if type_path.qself.is_some() {
        return FieldType::Other;
    }
    let path = &type_path.path;
    let Some(last) = path.segments.last() else {
        return FieldType::Other;
    };

    if matches!(last.arguments, PathArguments::None) {
        if last.ident == TAG_MARKER {
            return FieldType::Marker(EntityKind::Vertex);
        }
        if last.ident == EDGE_MARKER {
            return FieldType::Marker(EntityKind::Edge);
        }
        if path.leading_colon.is_none() && path.segments.len() == 1 {
            return FieldType::Scalar(unraw(&last.ident));
        }
        return FieldType::Other;
    }

    if last.ident == "Box" {
        if let PathArguments::AngleBracketed(args) = &last.arguments {
            if args.args.len() == 1 {
                if let Some(GenericArgument::Type(inner)) = args.args.first() {
                    if let marker @ FieldType::Marker(_) = classify_type(inner) {
                        return marker;
                    }
                }
            }
        }
    }

    FieldType::Other
}

/// Visitor over the top-level items of one file.
struct ModelVisitor<'a> {
    path: &'a Path,
    options: &'a ExtractOptions,
    /// Remaining allow-list names, when filtering.
    pending: Option<&'a mut Vec<String>>,
    entities: &'a mut Vec<EntityModel>,
    error: Option<GenError>,
}

impl ModelVisitor<'_> {
    fn halted(&self) -> bool {
        self.error.is_some() || self.pending.as_ref().is_some_and(|p| p.is_empty())
    }

    fn location(&self, span: Span) -> String {
        format!("{}:{}", self.path.display(), span.start().line)
    }

    /// Consume `name` from the allow-list. `false` when the list excludes it.
    fn admit(&mut self, name: &str) -> bool {
        match self.pending.as_mut() {
            None => true,
            Some(pending) => match pending.iter().position(|p| p == name) {
                Some(i) => {
                    pending.remove(i);
                    true
                }
                None => false,
            },
        }
    }

    fn attr_error(entity: &str, err: syn::Error) -> GenError {
        GenError::Attribute {
            entity: entity.to_string(),
            message: err.to_string(),
        }
    }

    fn build_entity(&self, item: &ItemStruct, name: String) -> Result<Option<EntityModel>> {
        let Fields::Named(named) = &item.fields else {
            debug!("skipping {name}: not a struct with named fields");
            return Ok(None);
        };

        let struct_attrs = parse_ngorm(&item.attrs).map_err(|e| Self::attr_error(&name, e))?;
        if struct_attrs.skip {
            debug!("skipping {name}: marked skip");
            return Ok(None);
        }
        if struct_attrs.index.is_some() {
            return Err(GenError::Attribute {
                entity: name,
                message: "`idx` applies to fields, not structs".to_string(),
            });
        }

        let location = self.location(item.ident.span());
        let naming = &self.options.naming;
        let mut kind = EntityKind::Plain;
        let mut marker_field = None;
        let mut fields = Vec::new();

        for field in &named.named {
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let field_name = unraw(ident);

            if !cfg_enabled(&field.attrs, &self.options.tags)
                .map_err(|e| Self::attr_error(&name, e))?
            {
                debug!("skipping {name}.{field_name}: cfg disabled");
                continue;
            }

            match classify_type(&field.ty) {
                FieldType::Marker(found) => {
                    if kind == EntityKind::Plain {
                        kind = found;
                        marker_field = Some(field_name);
                    } else if kind == found {
                        return Err(GenError::DuplicateMarker {
                            entity: name,
                            marker: if found == EntityKind::Vertex {
                                TAG_MARKER
                            } else {
                                EDGE_MARKER
                            },
                            location,
                        });
                    } else {
                        return Err(GenError::AmbiguousKind {
                            entity: name,
                            location,
                        });
                    }
                }
                FieldType::Scalar(type_name) => {
                    let field_attrs =
                        parse_ngorm(&field.attrs).map_err(|e| Self::attr_error(&name, e))?;
                    if field_attrs.skip {
                        debug!("skipping {name}.{field_name}: marked skip");
                        continue;
                    }
                    fields.push(FieldModel {
                        external_name: naming.resolve(&field_name, field_attrs.name.as_deref()),
                        declared_name: field_name,
                        type_name,
                        comment: doc_comment(&field.attrs),
                        index: field_attrs.index,
                        line: ident.span().start().line,
                    });
                }
                FieldType::Other => {
                    debug!("skipping {name}.{field_name}: not a plain scalar type");
                }
            }
        }

        if kind.is_graph() && !item.generics.params.is_empty() {
            return Err(GenError::GenericEntity {
                entity: name,
                location,
            });
        }

        if kind == EntityKind::Edge {
            for field in fields.iter_mut().filter(|f| f.index.is_some()) {
                warn!(
                    "{name}.{}: edges have no secondary indexes, ignoring idx",
                    field.declared_name
                );
                field.index = None;
            }
        }

        Ok(Some(EntityModel {
            external_name: naming.resolve(&name, struct_attrs.name.as_deref()),
            declared_name: name,
            kind,
            marker_field,
            comment: doc_comment(&item.attrs),
            fields,
            location,
        }))
    }
}

impl<'ast> Visit<'ast> for ModelVisitor<'_> {
    fn visit_item(&mut self, item: &'ast Item) {
        if let Item::Struct(s) = item {
            self.visit_item_struct(s);
        }
    }

    fn visit_item_struct(&mut self, item: &'ast ItemStruct) {
        if self.halted() {
            return;
        }

        match cfg_enabled(&item.attrs, &self.options.tags) {
            Ok(true) => {}
            Ok(false) => {
                debug!("skipping {}: cfg disabled", item.ident);
                return;
            }
            Err(e) => {
                self.error = Some(Self::attr_error(&item.ident.to_string(), e));
                return;
            }
        }

        let name = unraw(&item.ident);
        if !self.admit(&name) {
            return;
        }

        match self.build_entity(item, name) {
            Ok(Some(entity)) => {
                debug!(
                    "extracted {} {} ({} fields)",
                    entity.kind,
                    entity.declared_name,
                    entity.fields.len()
                );
                self.entities.push(entity);
            }
            Ok(None) => {}
            Err(e) => self.error = Some(e),
        }
    }
}
