use ngorm::{Edge, Model, Tag};

/// Someone in the graph.
#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct Person {
    pub tag: Tag,
    pub name: String,
    #[ngorm(idx)]
    pub age: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct Ordered {
    pub tag: Tag,
    pub b: i64,
    pub a: String,
    pub c: f32,
}

/// One property of every supported type.
#[derive(Debug, Clone, Default, PartialEq, Model)]
#[ngorm(name = "sample_v")]
pub struct Sample {
    pub tag: Box<Tag>,
    pub text: String,
    pub n: isize,
    pub n8: i8,
    pub n16: i16,
    #[ngorm(idx = "n32, n64")]
    pub n32: i32,
    pub n64: i64,
    pub ratio: f32,
    pub weight: f64,
    #[ngorm(skip)]
    pub cached: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct Follow {
    pub edge: Edge,
    pub degree: f64,
    #[ngorm(name = "since_ts")]
    pub since: i64,
}

/// Not part of the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub theme: String,
}

mod generated {
    include!(concat!(env!("OUT_DIR"), "/ngorm_generate.rs"));
}

pub use generated::*;
