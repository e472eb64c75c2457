//! Runtime support for graph models generated by `ngormgen`.
//!
//! A model struct becomes a vertex by embedding a [`Tag`] field and an edge by
//! embedding an [`Edge`] field. Deriving [`Model`] enables the `#[ngorm(..)]`
//! field options (`idx`, `idx = "a,b"`, `name = ".."`, `skip`). The generator
//! emits inherent methods on the struct that build nGQL statements and run
//! them through a [`Session`].
//!
//! The database client itself is not part of this crate: adapt your driver to
//! [`Session`], [`ResultSet`] and [`Record`] and hand it to the generated code.

mod base;
mod error;
pub mod nql;
mod session;

pub use base::{Edge, EdgeModel, IdGenerator, Tag, TagModel};
pub use error::QueryError;
pub use ngorm_derive::Model;
pub use session::{Page, Record, ResultSet, Session, Value};
