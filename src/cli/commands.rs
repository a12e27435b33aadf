//! Command implementations for the sheet appender CLI
//!
//! Each command builds the configuration, opens the Parquet workbook and
//! runs one library operation, reporting the result in the chosen format.

use crate::cli::args::{AppendArgs, Args, Commands, CreateSheetArgs, OutputFormat, ShowArgs};
use crate::config::AppendConfig;
use crate::constants::SAMPLE_PAYLOAD;
use crate::models::AppendOutcome;
use crate::processor::AppendProcessor;
use crate::server::{self, AppendResponse};
use crate::store::{ParquetStore, TabularStore};
use anyhow::{Context, Result};
use colored::*;
use std::io::Read;
use std::path::Path;
use tracing::{debug, error, info};

/// Main command runner
///
/// Sets up logging, validates arguments, builds the configuration and
/// dispatches to the selected subcommand.
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.build_config()?;
    debug!("Loaded configuration: {:?}", config);

    let Some(command) = args.command else {
        return Ok(());
    };

    match command {
        Commands::Append(append_args) => run_append(&append_args, config),
        Commands::Sample(sample_args) => {
            info!("Appending sample payload");
            report_append(
                open_processor(config)?.append(SAMPLE_PAYLOAD),
                sample_args.output_format,
            )
        }
        Commands::InitHeaders => run_init_headers(config),
        Commands::CreateSheet(create_args) => run_create_sheet(&create_args, config),
        Commands::Show(show_args) => run_show(&show_args, config),
        Commands::Serve(_) => {
            let bind_address = config.bind_address.clone();
            let processor = open_processor(config)?;
            println!(
                "{} {}",
                "Serving append endpoint on".bright_green(),
                bind_address.bright_white().bold()
            );
            server::serve(processor, &bind_address)
                .await
                .context("HTTP server failed")
        }
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sheet_appender={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn open_store(config: &AppendConfig) -> ParquetStore {
    ParquetStore::new(config.store_path.clone(), config.schema_width)
}

fn open_processor(config: AppendConfig) -> Result<AppendProcessor<ParquetStore>> {
    let store = open_store(&config);
    AppendProcessor::new(store, config).context("Invalid configuration")
}

fn read_payload(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload from {}", path.display())),
        _ => {
            let mut payload = String::new();
            std::io::stdin()
                .read_to_string(&mut payload)
                .context("Failed to read payload from stdin")?;
            Ok(payload)
        }
    }
}

fn run_append(args: &AppendArgs, config: AppendConfig) -> Result<()> {
    let payload = read_payload(args.input.as_deref())?;
    let processor = open_processor(config)?;
    report_append(processor.append(&payload), args.output_format)
}

/// Print the outcome of an append; failures are printed and returned
fn report_append(result: crate::Result<AppendOutcome>, format: OutputFormat) -> Result<()> {
    match (result, format) {
        (Ok(outcome), OutputFormat::Json) => {
            print_json(&AppendResponse::ok(outcome.message()))?;
            Ok(())
        }
        (Ok(outcome), OutputFormat::Human) => {
            match &outcome {
                AppendOutcome::NoData => println!("{}", outcome.message().bright_yellow()),
                AppendOutcome::Appended(summary) => {
                    println!("{}", outcome.message().bright_green().bold());
                    println!(
                        "  {} {} (rows {}-{})",
                        "Sheet:".bright_cyan(),
                        summary.sheet.bright_white(),
                        summary.first_row,
                        summary.last_row
                    );
                    if summary.rows_rejected > 0 {
                        println!(
                            "  {} {}",
                            "Rows skipped:".bright_red(),
                            summary.rows_rejected.to_string().bright_red().bold()
                        );
                    }
                }
            }
            Ok(())
        }
        (Err(e), OutputFormat::Json) => {
            error!("Error: {}", e);
            print_json(&AppendResponse::failure(e.to_string()))?;
            Err(e.into())
        }
        (Err(e), OutputFormat::Human) => {
            error!("Error: {}", e);
            Err(e.into())
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string(value).context("Failed to serialize result")?
    );
    Ok(())
}

fn run_init_headers(config: AppendConfig) -> Result<()> {
    let processor = open_processor(config)?;
    let status = processor
        .initialize_headers()
        .context("Error setting headers")?;
    println!("{}", status.message().bright_green());
    Ok(())
}

fn run_create_sheet(args: &CreateSheetArgs, config: AppendConfig) -> Result<()> {
    let sheet = config.sheet_name.clone();
    let processor = open_processor(config)?;
    processor
        .store()
        .create_sheet(&sheet)
        .with_context(|| format!("Failed to create sheet \"{}\"", sheet))?;
    println!(
        "{} {} in {}",
        "Sheet ready:".bright_green(),
        sheet.bright_white().bold(),
        processor.store().root().display()
    );

    if args.with_headers {
        let status = processor
            .initialize_headers()
            .context("Error setting headers")?;
        println!("{}", status.message().bright_green());
    }
    Ok(())
}

fn run_show(args: &ShowArgs, config: AppendConfig) -> Result<()> {
    let store = open_store(&config);
    let sheet = config.sheet_name.as_str();
    let last_row = store
        .last_row(sheet)
        .with_context(|| format!("Failed to read sheet \"{}\"", sheet))?;
    let count = args
        .count
        .unwrap_or_else(|| last_row.saturating_sub(args.start.saturating_sub(1)));
    let rows = store.read_rows(sheet, args.start, count)?;

    match args.output_format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Human => {
            println!(
                "{} {} ({} of {} rows)",
                "Sheet".bright_cyan(),
                sheet.bright_white().bold(),
                rows.len(),
                last_row
            );
            for (offset, row) in rows.iter().enumerate() {
                println!(
                    "{:>6}  {}",
                    (args.start + offset).to_string().bright_black(),
                    row.join(" | ")
                );
            }
        }
    }
    Ok(())
}
