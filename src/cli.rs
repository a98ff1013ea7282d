//! Command-line argument parsing
//!
//! Supports:
//! - An initial sample text
//! - Debug mode (pattern-edit trace sink)
//! - Initial flags

use clap::Parser;

use crate::flags::FlagSet;

/// Interactive regex tester
#[derive(Parser, Debug)]
#[command(name = "regex-live", version, about = "Interactive regex tester")]
pub struct CliArgs {
    /// Initial sample text to match against
    #[arg(value_name = "SAMPLE")]
    pub sample: Option<String>,

    /// Append every pattern edit to ./debug.log
    #[arg(long)]
    pub debug: bool,

    /// Initial flags, any of "imsU" (overrides the config file)
    #[arg(short = 'f', long, value_name = "FLAGS")]
    pub flags: Option<String>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Sample buffer content at startup
    pub sample: String,
    /// Enable the pattern-edit trace sink
    pub debug: bool,
    /// Flags given on the command line, if any
    pub flags: Option<FlagSet>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let flags = self
            .flags
            .map(|f| f.parse::<FlagSet>().map_err(|e| format!("--flags: {}", e)))
            .transpose()?;

        Ok(StartupConfig {
            sample: self.sample.unwrap_or_default(),
            debug: self.debug,
            flags,
        })
    }
}
