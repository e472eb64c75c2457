//! Output assembly: preamble, fragments, formatting and the atomic write.

use std::io::Write;
use std::path::Path;

use log::{info, warn};
use quote::quote;
use tempfile::NamedTempFile;

use crate::config::TOOL_NAME;
use crate::emit::{emit_models, EmitOptions, SourceBuilder};
use crate::error::{GenError, Result};
use crate::format::Formatter;
use crate::model::EntityModel;

/// The generated-by banner line, quoting the invocation arguments.
pub fn banner(invocation: &str) -> String {
    if invocation.is_empty() {
        format!("Code generated by \"{TOOL_NAME}\"; DO NOT EDIT.")
    } else {
        format!("Code generated by \"{TOOL_NAME} {invocation}\"; DO NOT EDIT.")
    }
}

/// Build the complete artifact text for `entities`.
///
/// Emission errors abort before anything is formatted. Formatting errors are
/// not fatal: the raw text is returned and a warning is logged.
pub fn assemble(
    entities: &[EntityModel],
    options: &EmitOptions,
    invocation: &str,
    formatter: &dyn Formatter,
) -> Result<String> {
    let rt = &options.runtime;
    let mut builder = SourceBuilder::new();
    builder.banner_line(banner(invocation));
    builder.push(quote! {
        #[allow(unused_imports)]
        use super::*;
        #[allow(unused_imports)]
        use #rt::{Record as _, ResultSet as _, Session as _};
    });

    emit_models(&mut builder, entities, options)?;
    let raw = builder.finish();

    match formatter.format(&raw) {
        Ok(formatted) => Ok(formatted),
        Err(e) => {
            warn!("formatting generated code failed, writing it unformatted: {e}");
            Ok(raw)
        }
    }
}

/// Write `contents` to `path` through a temporary file in the same directory.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| GenError::io(dir, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| GenError::io(path, e))?;
    file.persist(path).map_err(|e| GenError::io(path, e.error))?;

    info!("wrote {}", path.display());
    Ok(())
}
