use anyhow::Result;
use clap::{Parser, Subcommand};

use favor_ledger::cli::{
    handle_add_command, handle_backup_command, handle_codec_command, handle_edit_command,
    handle_export_command, handle_list_command, handle_people_command, handle_tag_command,
    AddArgs, BackupCommands, CodecCommands, EditArgs, ExportCommands, ListArgs, PeopleArgs,
    TagArgs,
};
use favor_ledger::config::{LedgerPaths, Settings};
use favor_ledger::logging;

#[derive(Parser)]
#[command(
    name = "favor",
    version,
    about = "Terminal ledger for reciprocal gift-giving and favors",
    long_about = "favor-ledger records every gift you give or receive against a \
                  contact and keeps a running balance per person, so you always \
                  know who the next red envelope is owed to."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new gift
    Add(AddArgs),

    /// Edit an existing transaction
    Edit(EditArgs),

    /// List transactions, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the people directory with running balances
    People(PeopleArgs),

    /// Set the tags on a person
    Tag(TagArgs),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Export commands
    #[command(subcommand)]
    Export(ExportCommands),

    /// Manage the stored slot's codec
    #[command(subcommand)]
    Codec(CodecCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    logging::init("warn");

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    paths.ensure_directories()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Add(args) => handle_add_command(&paths, &settings, args)?,
        Commands::Edit(args) => handle_edit_command(&paths, &settings, args)?,
        Commands::List(args) => handle_list_command(&paths, &settings, args)?,
        Commands::People(args) => handle_people_command(&paths, &settings, args)?,
        Commands::Tag(args) => handle_tag_command(&paths, &settings, args)?,
        Commands::Backup(cmd) => handle_backup_command(&paths, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&paths, &settings, cmd)?,
        Commands::Codec(cmd) => handle_codec_command(&paths, &mut settings, cmd)?,
        Commands::Config => {
            println!("Base dir:  {}", paths.base_dir().display());
            println!("Ledger:    {}", paths.ledger_file().display());
            println!("Backups:   {}", paths.backup_dir().display());
            println!("Settings:  {}", paths.settings_file().display());
            println!("Currency:  {}", settings.currency_symbol);
            println!(
                "Codec:     {}",
                if settings.is_encryption_enabled() {
                    "aes-256-gcm"
                } else {
                    "obfuscation"
                }
            );
        }
    }

    Ok(())
}
