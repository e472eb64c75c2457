use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ngorm_gen::config::split_list;
use ngorm_gen::{Config, GenError, Generator};

#[derive(Parser, Debug)]
#[command(name = "ngormgen")]
#[command(about = "Generate nGQL graph model boilerplate from Rust struct declarations", long_about = None)]
struct Cli {
    /// Comma-separated list of type names; default: every struct
    #[arg(short = 't', long = "type", value_name = "NAMES")]
    types: Option<String>,

    /// Output file; default: <dir>/ngorm_generate.rs
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prefix trimmed from declared names before deriving labels
    #[arg(long, value_name = "PREFIX")]
    trim_prefix: Option<String>,

    /// Use struct doc comments as tag and edge comments
    #[arg(long)]
    line_comment: bool,

    /// Comma-separated list of enabled cfg names and features
    #[arg(long, value_name = "TAGS")]
    tags: Option<String>,

    /// Path of the runtime crate in generated code
    #[arg(long, value_name = "PATH")]
    runtime: Option<String>,

    /// Configuration file; default: ./ngorm.toml, then the user config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// A directory, or a list of declaration files
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<Config, GenError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load()?,
        };

        if let Some(types) = &self.types {
            config.scan.types = split_list(types);
        }
        if let Some(tags) = &self.tags {
            config.scan.tags = split_list(tags);
        }
        if let Some(prefix) = &self.trim_prefix {
            config.naming.trim_prefix = Some(prefix.clone());
        }
        if self.line_comment {
            config.naming.line_comment = true;
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(runtime) = &self.runtime {
            config.output.runtime = runtime.clone();
        }

        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<(), GenError> {
    let config = cli.load_config()?;
    let invocation = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let written = Generator::new(config)
        .with_invocation(invocation)
        .run(&cli.paths)?;
    log::info!("generated {}", written.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if cli.print_config {
        print!("{}", Config::default_config_string());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ngormgen: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    fn config_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("ngorm.toml");
        fs::write(
            &path,
            r#"
[scan]
types = ["Settings"]
tags = ["prod"]

[naming]
trim_prefix = "Tbl"

[output]
file_name = "graph.rs"
runtime = "::ngorm"
"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_flags_override_config() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);
        let path_arg = path.to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "ngormgen",
            "--config",
            path_arg.as_str(),
            "-t",
            "Person, Follow",
            "--tags",
            "graph",
            "--trim-prefix",
            "Db",
            "--line-comment",
            "--runtime",
            "crate::ngorm",
            "-o",
            "out.rs",
            "src/model",
        ]);
        assert_eq!(cli.paths, vec![PathBuf::from("src/model")]);

        let config = cli.load_config().unwrap();
        assert_eq!(config.scan.types, vec!["Person", "Follow"]);
        assert_eq!(config.scan.tags, vec!["graph"]);
        assert_eq!(config.naming.trim_prefix.as_deref(), Some("Db"));
        assert!(config.naming.line_comment);
        assert_eq!(config.output.runtime, "crate::ngorm");
        assert_eq!(config.output.path, Some(PathBuf::from("out.rs")));
        assert_eq!(config.output.file_name, "graph.rs");
    }

    #[test]
    fn test_config_file_applies_without_flags() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);
        let path_arg = path.to_string_lossy().to_string();

        let cli = Cli::parse_from(["ngormgen", "--config", path_arg.as_str()]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.scan.types, vec!["Settings"]);
        assert_eq!(config.scan.tags, vec!["prod"]);
        assert_eq!(config.naming.trim_prefix.as_deref(), Some("Tbl"));
        assert!(!config.naming.line_comment);
        assert_eq!(config.output.path, None);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        let path_arg = missing.to_string_lossy().to_string();

        let cli = Cli::parse_from(["ngormgen", "--config", path_arg.as_str()]);
        assert!(matches!(cli.load_config(), Err(GenError::Config(_))));
    }

    #[test]
    fn test_paths_default_to_empty() {
        let cli = Cli::parse_from(["ngormgen"]);
        assert!(cli.paths.is_empty());
        assert!(!cli.verbose);
    }
}
