//! People directory formatting
//!
//! Renders the person aggregates as a terminal table.

use tabled::{Table, Tabled};

use crate::models::Person;

/// One row of the people directory table
#[derive(Tabled)]
struct PersonRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Given")]
    given: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Last gift")]
    last_interaction: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl PersonRow {
    fn from_person(person: &Person, symbol: &str) -> Self {
        Self {
            name: person.name.clone(),
            given: person.total_given.format_with_symbol(symbol),
            received: person.total_received.format_with_symbol(symbol),
            balance: person.balance.format_with_symbol(symbol),
            last_interaction: person.last_interaction.format("%Y-%m-%d").to_string(),
            tags: person.tags.join(", "),
        }
    }
}

/// Format the people directory as a table
pub fn format_people_table(people: &[Person], symbol: &str) -> String {
    if people.is_empty() {
        return "No people recorded yet.\n".to_string();
    }

    let rows: Vec<PersonRow> = people
        .iter()
        .map(|p| PersonRow::from_person(p, symbol))
        .collect();

    Table::new(rows).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PersonId, TransactionKind};

    fn sample_person() -> Person {
        let mut person = Person::seeded(PersonId::new(), "Alice", "2024-02-01".parse().unwrap());
        person.apply(TransactionKind::Give, Money::from_units(100));
        person.apply(TransactionKind::Receive, Money::from_units(40));
        person.tags = vec!["family".to_string()];
        person
    }

    #[test]
    fn test_empty_directory() {
        assert_eq!(format_people_table(&[], "¥"), "No people recorded yet.\n");
    }

    #[test]
    fn test_table_contains_aggregates() {
        let table = format_people_table(&[sample_person()], "¥");

        assert!(table.contains("Alice"));
        assert!(table.contains("¥100.00"));
        assert!(table.contains("¥40.00"));
        assert!(table.contains("¥60.00"));
        assert!(table.contains("2024-02-01"));
        assert!(table.contains("family"));
    }
}
