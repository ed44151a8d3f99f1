//! Export CLI commands

use clap::Subcommand;
use std::fs::File;
use std::path::PathBuf;

use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::export::export_transactions_csv;
use crate::services::TransactionFilter;

use super::open_service;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export the transaction log as CSV
    Csv {
        /// File to write (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an export command
pub fn handle_export_command(
    paths: &LedgerPaths,
    settings: &Settings,
    cmd: ExportCommands,
) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Csv { output } => {
            let service = open_service(paths, settings)?;
            let transactions = service.list(TransactionFilter::new());

            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
                    })?;
                    export_transactions_csv(&transactions, file)?;
                    println!(
                        "Exported {} transaction(s) to {}",
                        transactions.len(),
                        path.display()
                    );
                }
                None => {
                    export_transactions_csv(&transactions, std::io::stdout().lock())?;
                }
            }
        }
    }

    Ok(())
}
