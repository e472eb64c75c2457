//! Attribute readers: `#[ngorm(..)]` options, doc comments and `#[cfg(..)]`
//! predicates.

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Lit, LitStr, Meta, Token};

use crate::config::ATTRIBUTE_NAME;
use crate::model::IndexSpec;

/// Options collected from every `#[ngorm(..)]` on one item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NgormAttrs {
    /// `idx` or `idx = "a,b"`.
    pub index: Option<IndexSpec>,
    /// `name = "..."`, used verbatim.
    pub name: Option<String>,
    /// `skip`.
    pub skip: bool,
}

/// Parse all `#[ngorm(..)]` attributes of an item.
pub fn parse_ngorm(attrs: &[Attribute]) -> syn::Result<NgormAttrs> {
    let mut out = NgormAttrs::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTRIBUTE_NAME)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("idx") {
                let target = if meta.input.peek(Token![=]) {
                    let value: LitStr = meta.value()?.parse()?;
                    normalize_columns(&value.value())
                } else {
                    None
                };
                out.index = Some(IndexSpec { target });
                Ok(())
            } else if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                out.name = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `idx`, `name` or `skip`"))
            }
        })?;
    }

    Ok(out)
}

/// `" a , b "` becomes `"a,b"`; an empty list means no composite target.
fn normalize_columns(raw: &str) -> Option<String> {
    let columns: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if columns.is_empty() {
        None
    } else {
        Some(columns.join(","))
    }
}

/// Doc comment lines joined with a single space.
pub fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(nv) = &attr.meta {
                if let Expr::Lit(lit) = &nv.value {
                    if let Lit::Str(s) = &lit.lit {
                        return Some(s.value().trim().to_string());
                    }
                }
            }
            None
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

/// Whether every `#[cfg(..)]` on the item holds for the enabled tag set.
///
/// `feature = "x"` (or any `key = "x"`) holds when `x` is enabled, a bare
/// identifier holds when it is enabled, and `all`, `any`, `not` combine.
pub fn cfg_enabled(attrs: &[Attribute], tags: &[String]) -> syn::Result<bool> {
    for attr in attrs.iter().filter(|a| a.path().is_ident("cfg")) {
        let predicate: Meta = attr.parse_args()?;
        if !eval_cfg(&predicate, tags)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn eval_cfg(meta: &Meta, tags: &[String]) -> syn::Result<bool> {
    match meta {
        Meta::Path(path) => Ok(path
            .get_ident()
            .map(|ident| is_enabled(tags, &ident.to_string()))
            .unwrap_or(false)),
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(lit) => match &lit.lit {
                Lit::Str(s) => Ok(is_enabled(tags, &s.value())),
                _ => Err(syn::Error::new_spanned(&nv.value, "expected a string literal")),
            },
            _ => Err(syn::Error::new_spanned(&nv.value, "expected a string literal")),
        },
        Meta::List(list) => {
            let nested = list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            let values = nested
                .iter()
                .map(|m| eval_cfg(m, tags))
                .collect::<syn::Result<Vec<bool>>>()?;

            if list.path.is_ident("all") {
                Ok(values.iter().all(|v| *v))
            } else if list.path.is_ident("any") {
                Ok(values.iter().any(|v| *v))
            } else if list.path.is_ident("not") {
                match values.as_slice() {
                    [single] => Ok(!single),
                    _ => Err(syn::Error::new_spanned(list, "`not` takes one predicate")),
                }
            } else {
                Err(syn::Error::new_spanned(&list.path, "unknown cfg operator"))
            }
        }
    }
}

fn is_enabled(tags: &[String], name: &str) -> bool {
    tags.iter().any(|t| t == name)
}
