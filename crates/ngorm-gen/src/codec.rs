//! Type codec: how each supported field type is written into nGQL, read back
//! from a result column and declared in DDL.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::error::{GenError, Result};
use crate::model::{EntityModel, FieldModel};

/// Field types with an nGQL mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl SemanticType {
    pub fn from_type_name(name: &str) -> Option<Self> {
        let ty = match name {
            "String" => Self::String,
            "isize" => Self::Int,
            "i8" => Self::Int8,
            "i16" => Self::Int16,
            "i32" => Self::Int32,
            "i64" => Self::Int64,
            "f32" => Self::Float32,
            "f64" => Self::Float64,
            _ => return None,
        };
        Some(ty)
    }

    /// Resolve a field's declared type or fail the run.
    pub fn resolve(entity: &EntityModel, field: &FieldModel) -> Result<Self> {
        Self::from_type_name(&field.type_name).ok_or_else(|| GenError::UnsupportedType {
            entity: entity.declared_name.clone(),
            field: field.declared_name.clone(),
            ty: field.type_name.clone(),
        })
    }

    /// Rust spelling of the type.
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "isize",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
        }
    }

    /// Column type in `CREATE TAG`/`CREATE EDGE`.
    pub const fn ddl_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float",
            Self::Float64 => "double",
        }
    }

    /// Expression rendering `value` (a place expression of this type) as an
    /// nGQL literal `String`.
    pub fn literal(self, rt: &TokenStream, value: TokenStream) -> TokenStream {
        match self {
            Self::String => quote!(#rt::nql::quote(&#value)),
            Self::Int => quote!(#rt::nql::int(#value as i64)),
            Self::Int8 | Self::Int16 | Self::Int32 => quote!(#rt::nql::int(i64::from(#value))),
            Self::Int64 => quote!(#rt::nql::int(#value)),
            Self::Float32 => quote!(#rt::nql::float32(#value)),
            Self::Float64 => quote!(#rt::nql::float64(#value)),
        }
    }

    /// Expression reading `column` of `record` as a value of this type.
    pub fn deserialize(self, rt: &TokenStream, record: TokenStream, column: &str) -> TokenStream {
        match self {
            Self::String => quote!(#rt::nql::string_column(#record, #column)),
            Self::Int64 => quote!(#rt::nql::int_column(#record, #column)),
            Self::Int | Self::Int8 | Self::Int16 | Self::Int32 => {
                let ty = format_ident!("{}", self.rust_type());
                quote!(#rt::nql::narrow::<#ty>(#rt::nql::int_column(#record, #column), #column))
            }
            Self::Float32 => quote!(#rt::nql::float_column(#record, #column) as f32),
            Self::Float64 => quote!(#rt::nql::float_column(#record, #column)),
        }
    }
}
