//! People CLI commands
//!
//! The people directory and person tagging.

use clap::Args;

use crate::config::{LedgerPaths, Settings};
use crate::display::format_people_table;
use crate::error::{LedgerError, LedgerResult};

use super::open_service;

/// Arguments for the people directory
#[derive(Args)]
pub struct PeopleArgs {
    /// Only show people carrying this tag
    #[arg(long)]
    pub tag: Option<String>,
}

/// Arguments for tagging a person
#[derive(Args)]
pub struct TagArgs {
    /// Person name
    pub person: String,

    /// Tags to set (replaces existing tags; pass none to clear)
    pub tags: Vec<String>,
}

/// Handle the people command
pub fn handle_people_command(
    paths: &LedgerPaths,
    settings: &Settings,
    args: PeopleArgs,
) -> LedgerResult<()> {
    let service = open_service(paths, settings)?;

    let mut people = service.people();
    if let Some(ref tag) = args.tag {
        people.retain(|p| p.has_tag(tag));
    }

    println!("{}", format_people_table(&people, &settings.currency_symbol));
    println!("Total: {} person(s)", people.len());
    Ok(())
}

/// Handle the tag command
pub fn handle_tag_command(
    paths: &LedgerPaths,
    settings: &Settings,
    args: TagArgs,
) -> LedgerResult<()> {
    let service = open_service(paths, settings)?;

    let id = service
        .resolve_person(&args.person)
        .ok_or_else(|| LedgerError::person_not_found(args.person.clone()))?;

    let person = service.tag_person(id, args.tags)?;
    if person.tags.is_empty() {
        println!("Cleared tags for {}", person.name);
    } else {
        println!("Tagged {}: {}", person.name, person.tags.join(", "));
    }
    Ok(())
}
