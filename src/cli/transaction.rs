//! Transaction CLI commands
//!
//! Implements the add/edit/list commands. This is where typed input becomes
//! a validated draft: names are resolved to person ids, amounts are parsed
//! and checked, and only then does the engine run.

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::config::{LedgerPaths, Settings};
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, PersonId, TransactionDraft, TransactionKind};
use crate::services::TransactionFilter;

use super::open_service;

/// Arguments for recording a new gift
#[derive(Args)]
pub struct AddArgs {
    /// Direction: give or receive
    pub kind: TransactionKind,

    /// Person name (matched against known people, case-insensitive)
    pub person: String,

    /// Amount in currency units, e.g. 100 or 88.50
    pub amount: String,

    /// Gift date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Occasion, e.g. wedding, birthday, housewarming
    #[arg(short, long)]
    pub occasion: Option<String>,

    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

/// Arguments for editing an existing transaction
#[derive(Args)]
pub struct EditArgs {
    /// Transaction ID (full UUID or the short form shown by list)
    pub id: String,

    /// New direction
    #[arg(long)]
    pub kind: Option<TransactionKind>,

    /// New person name
    #[arg(long)]
    pub person: Option<String>,

    /// New amount in currency units
    #[arg(long)]
    pub amount: Option<String>,

    /// New gift date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// New occasion
    #[arg(long)]
    pub occasion: Option<String>,

    /// New notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Replace all tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

/// Arguments for listing transactions
#[derive(Args)]
pub struct ListArgs {
    /// Filter by person name
    #[arg(short, long)]
    pub person: Option<String>,

    /// Filter by direction
    #[arg(short, long)]
    pub kind: Option<TransactionKind>,

    /// Number of transactions to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Show the whole log
    #[arg(long)]
    pub all: bool,
}

/// Handle the add command
pub fn handle_add_command(
    paths: &LedgerPaths,
    settings: &Settings,
    args: AddArgs,
) -> LedgerResult<()> {
    let amount = parse_amount(&args.amount, &settings.currency_symbol)?;
    let name = args.person.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation("Person name cannot be empty".into()));
    }

    let service = open_service(paths, settings)?;

    // Resolve the typed name; an unknown name quick-adds a new person.
    let (person_id, person_name) = match service.resolve_person(name) {
        Some(id) => {
            let person = service.person(id)?;
            (id, person.name)
        }
        None => {
            println!("New person: {}", name);
            (PersonId::new(), name.to_string())
        }
    };

    let draft = TransactionDraft {
        kind: args.kind,
        person_id,
        person_name,
        amount,
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        occasion: args.occasion.unwrap_or_default(),
        notes: args.notes.unwrap_or_default(),
        tags: args.tags,
    };

    let txn = service.record(draft)?;
    println!("Recorded gift:");
    print!(
        "{}",
        format_transaction_details(&txn, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle the edit command
pub fn handle_edit_command(
    paths: &LedgerPaths,
    settings: &Settings,
    args: EditArgs,
) -> LedgerResult<()> {
    let service = open_service(paths, settings)?;
    let mut edited = service.find_transaction(&args.id)?;

    if let Some(kind) = args.kind {
        edited.kind = kind;
    }
    if let Some(person) = args.person {
        let name = person.trim().to_string();
        match service.resolve_person(&name) {
            Some(id) => {
                edited.person_id = id;
                edited.person_name = service.person(id)?.name;
            }
            None => {
                println!("New person: {}", name);
                edited.person_id = PersonId::new();
                edited.person_name = name;
            }
        }
    }
    if let Some(amount) = args.amount {
        edited.amount = parse_amount(&amount, &settings.currency_symbol)?;
    }
    if let Some(date) = args.date {
        edited.date = date;
    }
    if let Some(occasion) = args.occasion {
        edited.occasion = occasion;
    }
    if let Some(notes) = args.notes {
        edited.notes = notes;
    }
    if !args.tags.is_empty() {
        edited.tags = args.tags;
    }

    let txn = service.amend(edited)?;
    println!("Updated transaction:");
    print!(
        "{}",
        format_transaction_details(&txn, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle the list command
pub fn handle_list_command(
    paths: &LedgerPaths,
    settings: &Settings,
    args: ListArgs,
) -> LedgerResult<()> {
    let service = open_service(paths, settings)?;

    let mut filter = TransactionFilter::new();
    if let Some(ref person) = args.person {
        match service.resolve_person(person) {
            Some(id) => filter = filter.person(id),
            None => return Err(LedgerError::person_not_found(person.clone())),
        }
    }
    if let Some(kind) = args.kind {
        filter = filter.kind(kind);
    }
    if !args.all {
        filter = filter.limit(args.limit);
    }

    let transactions = service.list(filter);
    print!(
        "{}",
        format_transaction_register(&transactions, &settings.currency_symbol)
    );
    Ok(())
}

/// Parse a user-typed amount, tolerating the configured currency symbol
fn parse_amount(input: &str, symbol: &str) -> LedgerResult<Money> {
    let cleaned = input.trim().trim_start_matches(symbol).trim();
    let amount =
        Money::parse(cleaned).map_err(|e| LedgerError::Validation(e.to_string()))?;
    if !amount.is_positive() {
        return Err(LedgerError::Validation(format!(
            "Amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}
