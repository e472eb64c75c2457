//! Marker types embedded by graph models.

/// Source of unique 64-bit vertex identifiers (snowflake service, sequence, ...).
pub trait IdGenerator {
    fn generate(&self) -> i64;
}

/// Implemented by generated code for every vertex model.
pub trait TagModel {
    /// Tag label used in nGQL statements.
    fn tag_name(&self) -> &'static str;

    /// Vertex identity.
    fn id(&self) -> i64;
}

/// Implemented by generated code for every edge model.
pub trait EdgeModel {
    /// Edge type label used in nGQL statements.
    fn edge_name(&self) -> &'static str;

    fn src(&self) -> i64;

    fn dst(&self) -> i64;

    fn rank(&self) -> i64;
}

/// Vertex marker. Holds the vertex identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Tag {
    id: i64,
}

impl Tag {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    /// Assign a fresh identity from `generator`.
    pub fn gen_id(&mut self, generator: &impl IdGenerator) {
        self.id = generator.generate();
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

/// Edge marker. Holds the endpoints and the ranking of the relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Edge {
    src: i64,
    dst: i64,
    rank: i64,
}

impl Edge {
    pub const fn new(src: i64, dst: i64) -> Self {
        Self { src, dst, rank: 0 }
    }

    pub const fn with_rank(src: i64, dst: i64, rank: i64) -> Self {
        Self { src, dst, rank }
    }

    pub const fn src(&self) -> i64 {
        self.src
    }

    pub const fn dst(&self) -> i64 {
        self.dst
    }

    pub const fn rank(&self) -> i64 {
        self.rank
    }

    pub fn set_src(&mut self, src: i64) {
        self.src = src;
    }

    pub fn set_dst(&mut self, dst: i64) {
        self.dst = dst;
    }

    pub fn set_rank(&mut self, rank: i64) {
        self.rank = rank;
    }
}
