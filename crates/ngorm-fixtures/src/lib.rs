//! Graph models whose nGQL boilerplate is generated by the build script.

mod model;

pub use model::*;
