//! Command-line argument definitions for the sheet appender
//!
//! Global options select the workbook, sheet and configuration file; each
//! subcommand adds its own options.

use crate::config::{AppendConfig, validate_delimiter};
use crate::error::{AppendError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sheet appender
///
/// Parses delimited text into fixed-width rows and appends the valid rows
/// to the end of a sheet in a Parquet workbook.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sheet-appender",
    version,
    about = "Append delimited text rows to a sheet",
    long_about = "Parses delimited text payloads into fixed-width rows, drops rows with the wrong \
                  number of columns and appends the remaining rows as one block below the last \
                  occupied row of a sheet. Payloads come from a file, stdin or an HTTP POST."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workbook directory holding one Parquet file per sheet
    #[arg(long = "store", value_name = "PATH", global = true)]
    pub store_path: Option<PathBuf>,

    /// Destination sheet name
    #[arg(long = "sheet", value_name = "NAME", global = true)]
    pub sheet_name: Option<String>,

    /// JSON configuration file; command-line options take precedence
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config_path: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Append a payload read from a file or stdin
    Append(AppendArgs),
    /// Append the built-in three-row sample payload
    Sample(SampleArgs),
    /// Write the header row into row 1 of the sheet
    InitHeaders,
    /// Create an empty sheet in the workbook
    CreateSheet(CreateSheetArgs),
    /// Print rows of the sheet
    Show(ShowArgs),
    /// Serve the append endpoint over HTTP
    Serve(ServeArgs),
}

/// Arguments for the append command
#[derive(Debug, Clone, Parser)]
pub struct AppendArgs {
    /// Payload file; reads stdin when omitted or "-"
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Field delimiter for this payload
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Output format for the result
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Arguments for the sample command
#[derive(Debug, Clone, Parser)]
pub struct SampleArgs {
    /// Output format for the result
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Arguments for the create-sheet command
#[derive(Debug, Clone, Parser)]
pub struct CreateSheetArgs {
    /// Also write the header row
    #[arg(long = "with-headers")]
    pub with_headers: bool,
}

/// Arguments for the show command
#[derive(Debug, Clone, Parser)]
pub struct ShowArgs {
    /// First row to print (1-based)
    #[arg(long = "start", default_value_t = 1, value_name = "ROW")]
    pub start: usize,

    /// Number of rows to print; all remaining rows when omitted
    #[arg(short = 'n', long = "count", value_name = "N")]
    pub count: Option<usize>,

    /// Output format for the rows
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Socket address to listen on
    #[arg(short = 'b', long = "bind", value_name = "ADDR")]
    pub bind: Option<String>,

    /// Default delimiter for requests without a delimiter parameter
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable text
    Human,
    /// JSON matching the HTTP response body
    Json,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Validate arguments that clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(config_path) = &self.config_path {
            if !config_path.is_file() {
                return Err(AppendError::configuration(format!(
                    "Config file does not exist: {}",
                    config_path.display()
                )));
            }
        }

        match &self.command {
            Some(Commands::Append(AppendArgs {
                delimiter: Some(delimiter),
                ..
            }))
            | Some(Commands::Serve(ServeArgs {
                delimiter: Some(delimiter),
                ..
            })) => validate_delimiter(*delimiter),
            Some(Commands::Show(show)) if show.start == 0 => Err(AppendError::configuration(
                "Row numbers start at 1",
            )),
            _ => Ok(()),
        }
    }

    /// Build the configuration: file (or defaults), then command-line overrides
    pub fn build_config(&self) -> Result<AppendConfig> {
        let mut config = match &self.config_path {
            Some(path) => AppendConfig::from_file(path)?,
            None => AppendConfig::default(),
        };

        if let Some(store_path) = &self.store_path {
            config = config.with_store_path(store_path.clone());
        }
        if let Some(sheet_name) = &self.sheet_name {
            config = config.with_sheet_name(sheet_name.clone());
        }

        match &self.command {
            Some(Commands::Append(AppendArgs {
                delimiter: Some(delimiter),
                ..
            })) => config = config.with_delimiter(*delimiter),
            Some(Commands::Serve(serve)) => {
                if let Some(bind) = &serve.bind {
                    config = config.with_bind_address(bind.clone());
                }
                if let Some(delimiter) = serve.delimiter {
                    config = config.with_delimiter(delimiter);
                }
            }
            _ => {}
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_append_command() {
        let args = Args::parse_from([
            "sheet-appender",
            "append",
            "data.csv",
            "--delimiter",
            ";",
            "--sheet",
            "Readings",
            "-vv",
        ]);

        assert_eq!(args.get_log_level(), "debug");
        assert_eq!(args.sheet_name.as_deref(), Some("Readings"));
        match &args.command {
            Some(Commands::Append(append)) => {
                assert_eq!(append.input, Some(PathBuf::from("data.csv")));
                assert_eq!(append.delimiter, Some(';'));
                assert_eq!(append.output_format, OutputFormat::Human);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let config = args.build_config().unwrap();
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.sheet_name, "Readings");
    }

    #[test]
    fn test_quiet_log_level() {
        let args = Args::parse_from(["sheet-appender", "-q", "init-headers"]);
        assert_eq!(args.get_log_level(), "error");
        assert!(matches!(args.command, Some(Commands::InitHeaders)));
    }

    #[test]
    fn test_serve_overrides() {
        let args = Args::parse_from([
            "sheet-appender",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--store",
            "/tmp/wb",
        ]);
        let config = args.build_config().unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.store_path, PathBuf::from("/tmp/wb"));
    }

    #[test]
    fn test_validate_rejects_quote_delimiter() {
        let args = Args::parse_from(["sheet-appender", "append", "-d", "\""]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_row_zero() {
        let args = Args::parse_from(["sheet-appender", "show", "--start", "0"]);
        assert!(args.validate().is_err());
    }
}
