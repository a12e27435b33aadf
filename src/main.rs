use clap::Parser;
use sheet_appender::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Sheet Appender - Delimited Text to Sheet Rows");
    println!("=============================================");
    println!();
    println!("Parse delimited text into 9-column rows and append the valid rows");
    println!("to the end of a sheet.");
    println!();
    println!("USAGE:");
    println!("    sheet-appender <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    append         Append a payload from a file or stdin");
    println!("    sample         Append the built-in sample payload");
    println!("    init-headers   Write the header row into row 1");
    println!("    create-sheet   Create an empty sheet in the workbook");
    println!("    show           Print rows of the sheet");
    println!("    serve          Serve the append endpoint over HTTP");
    println!();
    println!("EXAMPLES:");
    println!("    # Create the sheet with its header row:");
    println!("    sheet-appender create-sheet --with-headers --store ./workbook");
    println!();
    println!("    # Append a semicolon-delimited file:");
    println!("    sheet-appender append readings.csv --delimiter ';' --store ./workbook");
    println!();
    println!("    # Accept payloads over HTTP:");
    println!("    sheet-appender serve --bind 127.0.0.1:8080 --store ./workbook");
    println!();
    println!("For detailed help on any command, use:");
    println!("    sheet-appender <COMMAND> --help");
}
