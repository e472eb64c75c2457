//! Whole-model checks run once extraction has finished.

use std::collections::HashMap;

use crate::error::{GenError, Result};
use crate::model::{EntityKind, EntityModel};

/// Reject models the emitter could not turn into a consistent schema.
///
/// Names are compared case-insensitively, so `Person` and `person` collide.
pub fn validate(entities: &[EntityModel]) -> Result<()> {
    let mut vertices: HashMap<String, &str> = HashMap::new();
    let mut edges: HashMap<String, &str> = HashMap::new();
    let mut indexes: HashMap<String, String> = HashMap::new();

    for entity in entities.iter().filter(|e| e.kind.is_graph()) {
        if entity.external_name.trim().is_empty() {
            return Err(GenError::EmptyExternalName {
                declared: entity.declared_name.clone(),
            });
        }
        check_identifier(&entity.declared_name, &entity.external_name)?;

        let (labels, kind) = match entity.kind {
            EntityKind::Vertex => (&mut vertices, "tag"),
            _ => (&mut edges, "edge"),
        };
        let folded = entity.external_name.to_lowercase();
        if let Some(first) = labels.get(&folded) {
            return Err(GenError::DuplicateExternalName {
                kind,
                name: entity.external_name.clone(),
                first: first.to_string(),
                second: entity.declared_name.clone(),
            });
        }
        labels.insert(folded, &entity.declared_name);

        validate_fields(entity)?;
        validate_indexes(entity, &mut indexes)?;
    }

    Ok(())
}

/// Index names are unique across tags and every index column is a property.
fn validate_indexes(entity: &EntityModel, seen: &mut HashMap<String, String>) -> Result<()> {
    if entity.kind != EntityKind::Vertex {
        return Ok(());
    }
    for field in entity.indexed_fields() {
        let Some(index) = &field.index else {
            continue;
        };
        let name = format!("idx_{}", field.external_name);

        for column in index.columns(&field.external_name).split(',') {
            if entity.field(column).is_none() {
                return Err(GenError::UnknownIndexColumn {
                    entity: entity.declared_name.clone(),
                    index: name,
                    column: column.to_string(),
                });
            }
        }

        let owner = format!("{}.{}", entity.declared_name, field.declared_name);
        if let Some(first) = seen.get(&name.to_lowercase()) {
            return Err(GenError::DuplicateIndex {
                name,
                first: first.clone(),
                second: owner,
            });
        }
        seen.insert(name.to_lowercase(), owner);
    }
    Ok(())
}

fn validate_fields(entity: &EntityModel) -> Result<()> {
    let reserved = entity.kind.reserved_fields();
    let mut seen: HashMap<String, &str> = HashMap::new();

    for field in &entity.fields {
        if field.external_name.trim().is_empty() {
            return Err(GenError::EmptyExternalName {
                declared: format!("{}.{}", entity.declared_name, field.declared_name),
            });
        }
        check_identifier(
            &format!("{}.{}", entity.declared_name, field.declared_name),
            &field.external_name,
        )?;

        let folded = field.external_name.to_lowercase();
        if reserved.contains(&folded.as_str()) {
            return Err(GenError::ReservedField {
                entity: entity.declared_name.clone(),
                field: field.external_name.clone(),
                kind: if entity.kind == EntityKind::Vertex {
                    "vertex"
                } else {
                    "edge"
                },
            });
        }

        if let Some(first) = seen.get(&folded) {
            return Err(GenError::DuplicateField {
                entity: entity.declared_name.clone(),
                name: field.external_name.clone(),
                first: first.to_string(),
                second: field.declared_name.clone(),
            });
        }
        seen.insert(folded, &field.declared_name);
    }

    Ok(())
}

/// Whether `name` can appear unquoted in DDL, patterns and column aliases.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_identifier(declared: &str, name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(GenError::InvalidExternalName {
            declared: declared.to_string(),
            name: name.to_string(),
        })
    }
}
