//! Command-line interface for the plantsharp utility
//!
//! Provides a CLI to turn C# source trees into PlantUML class diagrams.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::sources::{discover_sources, read_sources, SourceFile};
use plantsharp::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use plantsharp::plugins::csharp::CSharpParser;
use plantsharp::plugins::plantuml::{GeneratorConfig, PlantUmlGenerator};
use plantsharp::{SyntaxParser, SyntaxTree};

/// Plantsharp - Generate PlantUML class diagrams from C# sources
#[derive(Parser)]
#[command(name = "plantsharp")]
#[command(about = "A Rust utility to turn C# declarations into PlantUML class diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a PlantUML class diagram from C# files or directories
    Generate {
        /// Source files or directories (reads stdin when omitted)
        inputs: Vec<PathBuf>,

        /// Output file for the diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Namespace prefix stripped from package names
        #[arg(short, long, default_value = "")]
        root_namespace: String,

        /// Stylesheet file; switches to the styled header
        #[arg(short, long)]
        style: Option<PathBuf>,

        /// File extension picked up when walking directories
        #[arg(long, default_value = "cs")]
        extension: String,
    },

    /// Check that C# sources parse
    Validate {
        /// Source files or directories (reads stdin when omitted)
        inputs: Vec<PathBuf>,

        /// File extension picked up when walking directories
        #[arg(long, default_value = "cs")]
        extension: String,
    },

    /// Print the parsed declaration tree as JSON
    Tree {
        /// Input file to parse (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

/// Main CLI application
pub struct PlantsharpApp {
    parser: CSharpParser,
}

impl PlantsharpApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self {
            parser: CSharpParser::new(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Plantsharp v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                inputs,
                output,
                root_namespace,
                style,
                extension,
            } => self.generate_command(
                inputs,
                output,
                root_namespace,
                style,
                &extension,
                cli.verbose,
            ),
            Commands::Validate { inputs, extension } => {
                self.validate_command(inputs, &extension, cli.verbose)
            }
            Commands::Tree { input, compact } => self.tree_command(input, compact),
        }
    }

    /// Handle the generate command
    fn generate_command(
        &self,
        inputs: Vec<PathBuf>,
        output: Option<PathBuf>,
        root_namespace: String,
        style: Option<PathBuf>,
        extension: &str,
        verbose: bool,
    ) -> Result<()> {
        let mut config = GeneratorConfig::new(root_namespace);
        if let Some(path) = style {
            config = config.with_style_path(path)?;
        }

        let sources = self.collect_sources(&inputs, extension)?;
        if verbose {
            eprintln!("Read {} source file(s)", sources.len());
        }

        let document = self.render(config, &sources)?;

        if verbose {
            eprintln!("Generated {} bytes of PlantUML", document.len());
        }
        self.write_output(output, &document)
    }

    /// Parse every source and render one document
    pub fn render(&self, config: GeneratorConfig, sources: &[SourceFile]) -> Result<String> {
        let trees = sources
            .iter()
            .map(|source| self.parse_source(source))
            .collect::<Result<Vec<_>>>()?;

        let generator = PlantUmlGenerator::new(config);
        let document = generator.render_trees(&trees)?;
        info!(sources = sources.len(), bytes = document.len(), "Diagram written");
        Ok(document)
    }

    fn parse_source(&self, source: &SourceFile) -> Result<SyntaxTree> {
        self.parser
            .parse(&source.content)
            .map_err(|e| anyhow!("Failed to parse '{}': {}", source.label, e))
    }

    /// Handle the validate command
    fn validate_command(&self, inputs: Vec<PathBuf>, extension: &str, verbose: bool) -> Result<()> {
        let sources = self.collect_sources(&inputs, extension)?;
        if verbose {
            eprintln!("Validating {} source file(s)", sources.len());
        }

        let failures = self.validate_sources(&sources, &mut io::stdout())?;
        if failures > 0 {
            return Err(anyhow!(
                "{} of {} source file(s) failed to parse",
                failures,
                sources.len()
            ));
        }
        Ok(())
    }

    /// Print one status line per source and return the number of failures
    pub fn validate_sources<W: Write>(&self, sources: &[SourceFile], out: &mut W) -> Result<usize> {
        let mut failures = 0;
        for source in sources {
            match self.parser.parse(&source.content) {
                Ok(tree) => {
                    writeln!(
                        out,
                        "✓ {} ({} declarations)",
                        source.label,
                        tree.node_count()
                    )?;
                }
                Err(e) => {
                    warn!(source = source.label.as_str(), error = %e, "Source failed to parse");
                    writeln!(out, "✗ {}: {}", source.label, e)?;
                    failures += 1;
                }
            }
        }
        Ok(failures)
    }

    /// Handle the tree command
    fn tree_command(&self, input: Option<PathBuf>, compact: bool) -> Result<()> {
        let content = self.read_input(input)?;
        let json = self.tree_json(&content, compact)?;
        self.write_output(None, &json)
    }

    /// Serialize the parsed tree of `content`
    pub fn tree_json(&self, content: &str, compact: bool) -> Result<String> {
        let tree = self.parser.parse(content)?;
        let json = if compact {
            serde_json::to_string(&tree)?
        } else {
            serde_json::to_string_pretty(&tree)?
        };
        Ok(json)
    }

    /// Discover and read sources, falling back to stdin without inputs
    fn collect_sources(&self, inputs: &[PathBuf], extension: &str) -> Result<Vec<SourceFile>> {
        if inputs.is_empty() {
            let content = self.read_input(None)?;
            return Ok(vec![SourceFile {
                label: "<stdin>".to_string(),
                content,
            }]);
        }

        let paths = discover_sources(inputs, extension)?;
        if paths.is_empty() {
            warn!(extension, "No source files found");
        }
        read_sources(&paths)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) => {
                if path.to_string_lossy() == "-" {
                    let mut content = String::new();
                    io::stdin().read_to_string(&mut content)?;
                    Ok(content)
                } else {
                    fs::read_to_string(&path).map_err(|e| {
                        anyhow!("Failed to read input file '{}': {}", path.display(), e)
                    })
                }
            }
            None => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for PlantsharpApp {
    fn default() -> Self {
        Self::new()
    }
}
