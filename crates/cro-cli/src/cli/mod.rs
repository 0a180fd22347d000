use clap::{Parser, ValueEnum};

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `cro` binary.
#[derive(Debug, Parser)]
#[command(name = "cro", version, about = "CRO field activity tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the trail journal (overrides `storage.data_dir`)
    #[arg(short, long, global = true)]
    pub data_dir: Option<String>,
}

impl Cli {
    /// Extract global flags, falling back to the configured format name.
    #[must_use]
    pub fn global_flags(&self, default_format: &str) -> GlobalFlags {
        let format = self.format.unwrap_or_else(|| {
            OutputFormat::from_str(default_format, true).unwrap_or(OutputFormat::Json)
        });
        GlobalFlags {
            format,
            quiet: self.quiet,
            data_dir: self.data_dir.clone(),
        }
    }
}
