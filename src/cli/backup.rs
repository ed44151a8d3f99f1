//! Backup CLI commands

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{export_backup, import_backup};
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;

use super::open_service;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Export the ledger as a dated backup file
    Export {
        /// Directory to write the backup into (defaults to the backup dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore the ledger from a backup file
    Import {
        /// Path to the backup file
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &LedgerPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> LedgerResult<()> {
    match cmd {
        BackupCommands::Export { output } => {
            let service = open_service(paths, settings)?;
            let dir = output.unwrap_or_else(|| paths.backup_dir());

            match export_backup(service.store(), &dir)? {
                Some(path) => {
                    println!("Backup written: {}", path.display());
                }
                None => {
                    println!("Nothing to export yet; the ledger is empty.");
                }
            }
        }

        BackupCommands::Import { file, force } => {
            if !force {
                println!("WARNING: importing a backup overwrites ALL current data!");
                println!("To proceed, run again with --force:");
                println!("  favor backup import {} --force", file.display());
                return Ok(());
            }

            let service = open_service(paths, settings)?;
            let snapshot = import_backup(service.store(), &file)?;
            println!(
                "Restored {} person(s) and {} transaction(s) from {}",
                snapshot.people.len(),
                snapshot.transactions.len(),
                file.display()
            );
        }
    }

    Ok(())
}
