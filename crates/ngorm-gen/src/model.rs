//! Entity model extracted from declarations.

use std::fmt;

/// Classification of a declared struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Embeds the `Tag` marker.
    Vertex,
    /// Embeds the `Edge` marker.
    Edge,
    /// Embeds neither; ignored by the emitter.
    Plain,
}

impl EntityKind {
    pub const fn is_graph(self) -> bool {
        !matches!(self, Self::Plain)
    }

    /// Property names that collide with identity pseudo-columns.
    pub const fn reserved_fields(self) -> &'static [&'static str] {
        match self {
            Self::Vertex => &["id"],
            Self::Edge => &["id", "src", "dst", "rank"],
            Self::Plain => &[],
        }
    }

    /// Keyword used in nGQL DDL and statements.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Vertex => "TAG",
            Self::Edge => "EDGE",
            Self::Plain => "",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Vertex => "vertex",
            Self::Edge => "edge",
            Self::Plain => "plain",
        };
        f.write_str(s)
    }
}

/// Secondary index declared on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    /// Composite column list. `None` indexes the field alone.
    pub target: Option<String>,
}

impl IndexSpec {
    /// Column list placed inside `ON label(...)`.
    pub fn columns<'a>(&'a self, field: &'a str) -> &'a str {
        match self.target.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => field,
        }
    }
}

/// One scalar property of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldModel {
    pub declared_name: String,
    pub external_name: String,
    /// Declared type as written (single path segment).
    pub type_name: String,
    pub comment: Option<String>,
    pub index: Option<IndexSpec>,
    /// Source line of the field.
    pub line: usize,
}

/// One scanned struct.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityModel {
    pub declared_name: String,
    pub external_name: String,
    pub kind: EntityKind,
    /// Name of the field holding the `Tag`/`Edge` marker.
    pub marker_field: Option<String>,
    pub comment: Option<String>,
    pub fields: Vec<FieldModel>,
    /// `path:line` of the declaration, for diagnostics.
    pub location: String,
}

impl EntityModel {
    /// External names of all declared properties, in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.external_name.as_str()).collect()
    }

    pub fn indexed_fields(&self) -> impl Iterator<Item = &FieldModel> {
        self.fields.iter().filter(|f| f.index.is_some())
    }

    pub fn field(&self, external_name: &str) -> Option<&FieldModel> {
        self.fields
            .iter()
            .find(|f| f.external_name == external_name)
    }
}
