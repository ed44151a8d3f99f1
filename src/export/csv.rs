//! CSV export of the transaction log
//!
//! Writes one row per transaction, amounts in currency units, for use in
//! spreadsheets. Person names are the historical values recorded on each
//! transaction.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

/// Export transactions to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id", "date", "kind", "person", "amount", "occasion", "notes", "tags", "created_at",
        ])
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for txn in transactions {
        csv_writer
            .write_record([
                txn.id.as_uuid().to_string(),
                txn.date.format("%Y-%m-%d").to_string(),
                txn.kind.to_string(),
                txn.person_name.clone(),
                txn.amount.to_string(),
                txn.occasion.clone(),
                txn.notes.clone(),
                txn.tags.join("|"),
                txn.created_at.to_rfc3339(),
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PersonId, TransactionDraft, TransactionKind};

    fn sample(name: &str, units: i64) -> Transaction {
        Transaction::from_draft(TransactionDraft {
            kind: TransactionKind::Give,
            person_id: PersonId::new(),
            person_name: name.to_string(),
            amount: Money::from_units(units),
            date: "2024-01-01".parse().unwrap(),
            occasion: "wedding".to_string(),
            notes: String::new(),
            tags: vec!["family".to_string(), "close".to_string()],
        })
    }

    #[test]
    fn test_header_only_for_empty_log() {
        let mut buf = Vec::new();
        export_transactions_csv(&[], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("id,date,kind,person,amount"));
    }

    #[test]
    fn test_rows_per_transaction() {
        let txns = vec![sample("Alice", 100), sample("Bob", 50)];
        let mut buf = Vec::new();
        export_transactions_csv(&txns, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Alice"));
        assert!(text.contains("100.00"));
        assert!(text.contains("family|close"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut txn = sample("Doe, Jane", 10);
        txn.notes = "thanks, again".to_string();

        let mut buf = Vec::new();
        export_transactions_csv(&[txn], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Doe, Jane\""));
        assert!(text.contains("\"thanks, again\""));
    }
}
