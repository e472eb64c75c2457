//! Generator for nGQL graph model boilerplate.
//!
//! Reads Rust struct declarations that embed the `ngorm::Tag` or `ngorm::Edge`
//! marker and writes one Rust file with schema DDL, insert, lookup, list,
//! delete and binding routines for each of them.
//!
//! ```no_run
//! use ngorm_gen::{Config, Generator};
//!
//! let generator = Generator::new(Config::default());
//! let written = generator.run(&["src/model".into()])?;
//! println!("wrote {}", written.display());
//! # Ok::<(), ngorm_gen::GenError>(())
//! ```

pub mod assemble;
pub mod codec;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod format;
pub mod model;
pub mod naming;
pub mod scan;

pub use codec::SemanticType;
pub use config::{Config, ConfigError};
pub use emit::{EmitOptions, SourceBuilder};
pub use error::{GenError, Result};
pub use extract::{ExtractOptions, SourceFile};
pub use format::{FormatError, Formatter, PrettyFormatter, RawFormatter};
pub use model::{EntityKind, EntityModel, FieldModel, IndexSpec};
pub use scan::ScanInput;

use std::path::{Path, PathBuf};

use log::info;

use naming::NamingPolicy;

/// One configured generation run.
pub struct Generator {
    config: Config,
    invocation: String,
    formatter: Box<dyn Formatter>,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            invocation: String::new(),
            formatter: Box::new(PrettyFormatter),
        }
    }

    /// Arguments quoted in the generated-by banner.
    pub fn with_invocation(mut self, invocation: impl Into<String>) -> Self {
        self.invocation = invocation.into();
        self
    }

    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            types: self.config.scan.types.clone(),
            tags: self.config.scan.tags.clone(),
            naming: NamingPolicy::new(self.config.naming.trim_prefix.clone()),
        }
    }

    /// Extract and validate the models declared in `sources`.
    pub fn extract(&self, sources: &[SourceFile]) -> Result<Vec<EntityModel>> {
        extract::extract(sources, &self.extract_options())
    }

    /// Generated source for `sources`, without touching the filesystem.
    pub fn render(&self, sources: &[SourceFile]) -> Result<String> {
        self.config.validate()?;
        let entities = self.extract(sources)?;
        let options = EmitOptions::new(&self.config.output.runtime, self.config.naming.line_comment)?;
        assemble::assemble(&entities, &options, &self.invocation, self.formatter.as_ref())
    }

    /// Scan `paths`, generate and write the artifact. Returns the output path.
    ///
    /// Nothing is written when any step fails.
    pub fn run(&self, paths: &[PathBuf]) -> Result<PathBuf> {
        let input = ScanInput::resolve(paths)?;
        let sources = input.load()?;
        info!(
            "scanning {} declaration file(s) in {}",
            sources.len(),
            input.dir.display()
        );

        let output = self.config.output.resolve(&input.dir);
        self.write(&sources, &output)?;
        Ok(output)
    }

    /// Generate from `sources` into `output`.
    pub fn write(&self, sources: &[SourceFile], output: &Path) -> Result<()> {
        let text = self.render(sources)?;
        assemble::write_output(output, &text)
    }
}
