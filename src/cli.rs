//! CLI argument parsing for Demora

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for the final ranking
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "demora")]
#[command(version)]
#[command(about = "Swift build time analyzer with per-declaration compile timing", long_about = None)]
pub struct Cli {
    /// Build log to scan (plain text or .xcactivitylog; mutually exclusive with --product)
    pub log: Option<PathBuf>,

    /// Product name to look up in DerivedData (e.g. MyApp)
    #[arg(short = 'p', long = "product", value_name = "NAME")]
    pub product: Option<String>,

    /// DerivedData root to search (default: ~/Library/Developer/Xcode/DerivedData)
    #[arg(long = "derived-data", value_name = "DIR", requires = "product")]
    pub derived_data: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Seconds between incremental progress snapshots
    #[arg(long = "interval", value_name = "SECS", default_value = "1")]
    pub interval: u64,

    /// Show only the slowest N entries in the table
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_log_path() {
        let cli = Cli::parse_from(["demora", "build.xcactivitylog"]);
        assert_eq!(cli.log.unwrap(), PathBuf::from("build.xcactivitylog"));
        assert!(cli.product.is_none());
    }

    #[test]
    fn test_cli_parses_product() {
        let cli = Cli::parse_from(["demora", "-p", "MyApp"]);
        assert_eq!(cli.product.unwrap(), "MyApp");
        assert!(cli.log.is_none());
    }

    #[test]
    fn test_cli_derived_data_requires_product() {
        let result = Cli::try_parse_from(["demora", "--derived-data", "/tmp/dd"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_format_default_text() {
        let cli = Cli::parse_from(["demora", "build.log"]);
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::parse_from(["demora", "--format", "json", "build.log"]);
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_cli_interval_default() {
        let cli = Cli::parse_from(["demora", "build.log"]);
        assert_eq!(cli.interval, 1);
    }

    #[test]
    fn test_cli_limit() {
        let cli = Cli::parse_from(["demora", "-n", "20", "build.log"]);
        assert_eq!(cli.limit, Some(20));
    }

    #[test]
    fn test_cli_debug_default_false() {
        let cli = Cli::parse_from(["demora", "build.log"]);
        assert!(!cli.debug);
    }
}
