use anyhow::{anyhow, Context as AnyhowContext, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::Catalog;
use crate::identifier::{legacy, Identifier};
use crate::output::{ArtifactReport, IdentifierReport, OutputFormatter};
use crate::resolver::Resolver;

pub const DEFAULT_ENGINE_ID: &str = "ENGINE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "testable-id")]
#[command(about = "Encode and decode unique identifiers for test containers and executables", long_about = None)]
pub struct Args {
    /// Catalog file or directory describing containers and executables
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Engine id every identifier is rooted at
    #[arg(long, value_name = "ID", default_value = DEFAULT_ENGINE_ID, global = true)]
    pub engine: String,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse an identifier and print its segments
    Parse { identifier: String },

    /// Print the identifier of a container
    EncodeContainer {
        /// Qualified name, e.g. org.example.Outer or org.example.Outer$Inner
        qualified_name: String,
    },

    /// Print the identifier of an executable
    EncodeExecutable {
        /// Qualified name of the declaring container
        container: String,
        name: String,
        /// Parameter types in declaration order
        parameters: Vec<String>,
    },

    /// Resolve an identifier against the catalog
    Decode { identifier: String },

    /// Convert a bracketed or flat legacy identifier to canonical form
    Legacy { text: String },
}

impl Command {
    pub fn needs_catalog(&self) -> bool {
        matches!(
            self,
            Command::EncodeContainer { .. } | Command::EncodeExecutable { .. } | Command::Decode { .. }
        )
    }
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        match &self.catalog {
            Some(path) => validate_path(path)?,
            None if self.command.needs_catalog() => {
                anyhow::bail!("--catalog is required for this command")
            }
            None => {}
        }
        Ok(())
    }
}

pub fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    } else if path.is_dir() {
        std::fs::metadata(path)
            .with_context(|| format!("Cannot read directory: {}", path.display()))?;
    } else {
        anyhow::bail!("Path is neither a file nor a directory: {}", path.display());
    }

    Ok(())
}

/// Runs the selected command and returns the rendered output.
pub fn run(args: &Args) -> Result<String> {
    debug!(command = ?args.command, "running command");
    let root = Identifier::for_engine(args.engine.as_str()).context("Invalid engine id")?;

    match &args.command {
        Command::Parse { identifier } => {
            let identifier = Identifier::parse(identifier)
                .with_context(|| format!("Cannot parse '{identifier}'"))?;
            OutputFormatter::identifier(&IdentifierReport::new(&identifier), args.format)
        }
        Command::Legacy { text } => {
            let converted = if text.starts_with('[') {
                legacy::parse_bracketed(text)
            } else {
                legacy::parse_flat(text)
            };
            let identifier = converted.with_context(|| format!("Cannot convert '{text}'"))?;
            OutputFormatter::identifier(&IdentifierReport::new(&identifier), args.format)
        }
        Command::EncodeContainer { qualified_name } => {
            let catalog = load_catalog(args)?;
            let container = catalog
                .container(qualified_name)
                .with_context(|| format!("No container named '{qualified_name}' in catalog"))?;
            let resolver = Resolver::new(&catalog);
            let testable = resolver.from_class(&container, &root)?;
            OutputFormatter::artifact(&ArtifactReport::new(&catalog, &testable), args.format)
        }
        Command::EncodeExecutable {
            container,
            name,
            parameters,
        } => {
            let catalog = load_catalog(args)?;
            let container_id = catalog
                .container(container)
                .with_context(|| format!("No container named '{container}' in catalog"))?;
            let executable = catalog
                .find_executable(container_id, name, parameters)
                .with_context(|| {
                    format!(
                        "No executable {name}({}) in '{container}'",
                        parameters.join(", ")
                    )
                })?;
            let resolver = Resolver::new(&catalog);
            let testable = resolver.from_method_in(&executable, &container_id, &root)?;
            OutputFormatter::artifact(&ArtifactReport::new(&catalog, &testable), args.format)
        }
        Command::Decode { identifier } => {
            let catalog = load_catalog(args)?;
            let resolver = Resolver::new(&catalog);
            let testable = resolver
                .from_unique_id(identifier, &root)
                .map_err(|e| {
                    let headline = if e.is_unresolvable() {
                        format!("No such test: {identifier}")
                    } else {
                        format!("Cannot decode '{identifier}'")
                    };
                    anyhow!(e).context(headline)
                })?;
            OutputFormatter::artifact(&ArtifactReport::new(&catalog, &testable), args.format)
        }
    }
}

fn load_catalog(args: &Args) -> Result<Catalog> {
    let path = args
        .catalog
        .as_deref()
        .context("--catalog is required for this command")?;
    Catalog::from_path(path).with_context(|| format!("Failed to load catalog {}", path.display()))
}
