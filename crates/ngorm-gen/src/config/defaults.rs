//! Default values for ngormgen configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Scan Defaults
// ============================================================================

/// Extension of declaration files.
pub const DECLARATION_EXTENSION: &str = "rs";

/// First-line marker of files written by the generator; such files are never scanned.
pub const GENERATED_MARKER: &str = "// Code generated by";

/// Marker type embedded by vertex models.
pub const TAG_MARKER: &str = "Tag";

/// Marker type embedded by edge models.
pub const EDGE_MARKER: &str = "Edge";

/// Attribute namespace for per-field and per-struct options.
pub const ATTRIBUTE_NAME: &str = "ngorm";

// ============================================================================
// Output Defaults
// ============================================================================

/// Output file written beside the scanned declarations.
pub const DEFAULT_OUTPUT_FILE: &str = "ngorm_generate.rs";

/// Path of the runtime crate referenced by generated code.
pub const DEFAULT_RUNTIME_PATH: &str = "::ngorm";

/// Tool name quoted in the generated-by banner.
pub const TOOL_NAME: &str = "ngormgen";

// ============================================================================
// Config Files
// ============================================================================

/// Project-local configuration file.
pub const PROJECT_CONFIG_FILE: &str = "ngorm.toml";

/// Directory under the user config dir holding `config.toml`.
pub const USER_CONFIG_DIR: &str = "ngorm";
