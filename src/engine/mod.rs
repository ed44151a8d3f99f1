//! Ledger state-transition engine
//!
//! The pure core of the crate: two functions from `(snapshot, input)` to a
//! new snapshot, with no hidden state and no storage access. Callers are
//! responsible for persisting the result; the engine itself never saves.
//!
//! Every operation maintains the person aggregate invariants:
//! `balance == total_given - total_received`, non-negative totals, and
//! `last_interaction` equal to the running maximum of the person's
//! transaction dates.

use tracing::warn;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{LedgerSnapshot, Transaction, TransactionDraft};

/// Record a new gift transaction.
///
/// Assigns a fresh id and creation timestamp, prepends the transaction to
/// the log (newest first), and creates or updates the referenced person:
/// GIVE raises `total_given` and the balance, RECEIVE raises
/// `total_received` and lowers the balance. A person not seen before is
/// seeded with zero totals and `last_interaction` set to the gift date.
///
/// Drafts are validated here even though the CLI validates first; an
/// invalid draft is rejected, never coerced.
pub fn add_transaction(
    mut snapshot: LedgerSnapshot,
    draft: TransactionDraft,
) -> LedgerResult<LedgerSnapshot> {
    draft
        .validate()
        .map_err(|e| LedgerError::Validation(e.to_string()))?;

    let txn = Transaction::from_draft(draft);

    let person = snapshot.person_or_insert(txn.person_id, &txn.person_name, txn.date);
    person.touch(txn.date);
    person.apply(txn.kind, txn.amount);
    debug_assert!(person.totals_consistent());

    snapshot.transactions.insert(0, txn);
    Ok(snapshot)
}

/// Apply an edited version of an existing transaction.
///
/// The edit replaces every field except `id` and `created_at`; the
/// transaction keeps its position in the log. Aggregates are kept
/// consistent by reverting the prior version's effect on the person it
/// originally referenced, then applying the new version's effect on the
/// (possibly different, possibly brand-new) person it references now.
///
/// An unknown id is a recoverable caller error: the snapshot is returned
/// unchanged.
pub fn update_transaction(
    mut snapshot: LedgerSnapshot,
    mut edited: Transaction,
) -> LedgerResult<LedgerSnapshot> {
    let Some(pos) = snapshot.transaction_position(edited.id) else {
        warn!(id = %edited.id, "update for unknown transaction, ledger unchanged");
        return Ok(snapshot);
    };

    edited
        .validate()
        .map_err(|e| LedgerError::Validation(e.to_string()))?;

    let prior = snapshot.transactions[pos].clone();
    edited.created_at = prior.created_at;

    // Revert the prior version's effect on its original person. The person
    // always exists for snapshots produced by this engine; a miss means the
    // snapshot was tampered with, so it is logged rather than invented.
    match snapshot.person_mut(prior.person_id) {
        Some(person) => {
            person.revert(prior.kind, prior.amount);
            debug_assert!(
                !person.total_given.is_negative() && !person.total_received.is_negative(),
                "revert drove totals negative for {}",
                person.id
            );
        }
        None => {
            warn!(person = %prior.person_id, txn = %prior.id, "revert target missing, skipping");
        }
    }

    let person = snapshot.person_or_insert(edited.person_id, &edited.person_name, edited.date);
    person.apply(edited.kind, edited.amount);
    person.touch(edited.date);
    debug_assert!(person.totals_consistent());

    snapshot.transactions[pos] = edited;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PersonId, TransactionKind};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn draft(
        kind: TransactionKind,
        person_id: PersonId,
        name: &str,
        units: i64,
        on: &str,
    ) -> TransactionDraft {
        TransactionDraft {
            kind,
            person_id,
            person_name: name.to_string(),
            amount: Money::from_units(units),
            date: date(on),
            occasion: String::new(),
            notes: String::new(),
            tags: Vec::new(),
        }
    }

    fn assert_invariants(snapshot: &LedgerSnapshot) {
        for person in &snapshot.people {
            assert!(
                person.totals_consistent(),
                "aggregate invariant broken for {}",
                person.name
            );
        }
    }

    /// Scenario: first gift to a new person seeds the aggregates.
    #[test]
    fn add_gift_to_new_person() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-01-01"),
        )
        .unwrap();

        assert_eq!(snapshot.people.len(), 1);
        assert_eq!(snapshot.transactions.len(), 1);

        let person = snapshot.person(alice).unwrap();
        assert_eq!(person.total_given, Money::from_units(100));
        assert_eq!(person.total_received, Money::zero());
        assert_eq!(person.balance, Money::from_units(100));
        assert_eq!(person.last_interaction, date("2024-01-01"));
        assert_invariants(&snapshot);
    }

    /// Scenario: a later RECEIVE against the same person nets the balance.
    #[test]
    fn add_receive_updates_existing_person() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-01-01"),
        )
        .unwrap();
        let snapshot = add_transaction(
            snapshot,
            draft(TransactionKind::Receive, alice, "Alice", 40, "2024-02-01"),
        )
        .unwrap();

        assert_eq!(snapshot.people.len(), 1);
        let person = snapshot.person(alice).unwrap();
        assert_eq!(person.total_given, Money::from_units(100));
        assert_eq!(person.total_received, Money::from_units(40));
        assert_eq!(person.balance, Money::from_units(60));
        assert_eq!(person.last_interaction, date("2024-02-01"));
        assert_invariants(&snapshot);
    }

    /// Scenario: editing an amount reverts the old effect and applies the new.
    #[test]
    fn edit_amount_rebalances_person() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-01-01"),
        )
        .unwrap();
        let snapshot = add_transaction(
            snapshot,
            draft(TransactionKind::Receive, alice, "Alice", 40, "2024-02-01"),
        )
        .unwrap();

        // The GIVE is the older entry, at the end of the newest-first log.
        let mut edited = snapshot.transactions[1].clone();
        assert!(edited.is_give());
        edited.amount = Money::from_units(70);

        let snapshot = update_transaction(snapshot, edited).unwrap();

        let person = snapshot.person(alice).unwrap();
        assert_eq!(person.total_given, Money::from_units(70));
        assert_eq!(person.total_received, Money::from_units(40));
        assert_eq!(person.balance, Money::from_units(30));
        assert_invariants(&snapshot);
    }

    /// Scenario: reassigning a transaction moves its effect between persons.
    #[test]
    fn edit_reassigns_person_and_seeds_new_one() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-01-01"),
        )
        .unwrap();
        let snapshot = add_transaction(
            snapshot,
            draft(TransactionKind::Receive, alice, "Alice", 40, "2024-02-01"),
        )
        .unwrap();

        let mut edited = snapshot.transactions[1].clone();
        edited.amount = Money::from_units(70);
        let snapshot = update_transaction(snapshot, edited).unwrap();

        // Now hand that same gift to Bob instead.
        let bob = PersonId::new();
        let mut edited = snapshot.transactions[1].clone();
        edited.person_id = bob;
        edited.person_name = "Bob".to_string();

        let snapshot = update_transaction(snapshot, edited).unwrap();

        let alice_rec = snapshot.person(alice).unwrap();
        assert_eq!(alice_rec.total_given, Money::zero());
        assert_eq!(alice_rec.total_received, Money::from_units(40));
        assert_eq!(alice_rec.balance, Money::from_units(-40));

        let bob_rec = snapshot.person(bob).unwrap();
        assert_eq!(bob_rec.name, "Bob");
        assert_eq!(bob_rec.total_given, Money::from_units(70));
        assert_eq!(bob_rec.balance, Money::from_units(70));
        assert_invariants(&snapshot);
    }

    #[test]
    fn add_prepends_to_the_log() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 10, "2024-01-01"),
        )
        .unwrap();
        let first_id = snapshot.transactions[0].id;

        let snapshot = add_transaction(
            snapshot,
            draft(TransactionKind::Give, alice, "Alice", 20, "2024-01-02"),
        )
        .unwrap();

        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.transactions[0].amount, Money::from_units(20));
        assert_eq!(snapshot.transactions[1].id, first_id);
    }

    #[test]
    fn edit_keeps_position_and_created_at() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 10, "2024-01-01"),
        )
        .unwrap();
        let snapshot = add_transaction(
            snapshot,
            draft(TransactionKind::Give, alice, "Alice", 20, "2024-01-02"),
        )
        .unwrap();

        let target = snapshot.transactions[1].clone();
        let original_created_at = target.created_at;

        let mut edited = target;
        edited.amount = Money::from_units(15);
        // A hostile payload must not be able to forge the creation stamp.
        edited.created_at = chrono::Utc::now();

        let snapshot = update_transaction(snapshot, edited).unwrap();

        assert_eq!(snapshot.transactions[1].amount, Money::from_units(15));
        assert_eq!(snapshot.transactions[1].created_at, original_created_at);
        assert_eq!(snapshot.transactions[0].amount, Money::from_units(20));
    }

    #[test]
    fn edit_unknown_id_is_a_no_op() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-01-01"),
        )
        .unwrap();

        let mut phantom = snapshot.transactions[0].clone();
        phantom.id = crate::models::TransactionId::new();
        phantom.amount = Money::from_units(999);

        let snapshot = update_transaction(snapshot, phantom).unwrap();

        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(
            snapshot.person(alice).unwrap().total_given,
            Money::from_units(100)
        );
    }

    #[test]
    fn edit_with_identical_payload_changes_nothing() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-01-01"),
        )
        .unwrap();
        let before = snapshot.person(alice).unwrap().clone();

        let unchanged = snapshot.transactions[0].clone();
        let snapshot = update_transaction(snapshot, unchanged).unwrap();

        let after = snapshot.person(alice).unwrap();
        assert_eq!(after.total_given, before.total_given);
        assert_eq!(after.total_received, before.total_received);
        assert_eq!(after.balance, before.balance);
        assert_eq!(after.last_interaction, before.last_interaction);
    }

    #[test]
    fn edit_flips_kind() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-01-01"),
        )
        .unwrap();

        let mut edited = snapshot.transactions[0].clone();
        edited.kind = TransactionKind::Receive;

        let snapshot = update_transaction(snapshot, edited).unwrap();

        let person = snapshot.person(alice).unwrap();
        assert_eq!(person.total_given, Money::zero());
        assert_eq!(person.total_received, Money::from_units(100));
        assert_eq!(person.balance, Money::from_units(-100));
        assert_invariants(&snapshot);
    }

    #[test]
    fn edit_to_earlier_date_keeps_last_interaction() {
        // The running-maximum behavior: moving a gift earlier never lowers
        // the person's recorded last interaction.
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-06-01"),
        )
        .unwrap();

        let mut edited = snapshot.transactions[0].clone();
        edited.date = date("2024-01-01");

        let snapshot = update_transaction(snapshot, edited).unwrap();

        assert_eq!(
            snapshot.person(alice).unwrap().last_interaction,
            date("2024-06-01")
        );
        assert_eq!(snapshot.transactions[0].date, date("2024-01-01"));
    }

    #[test]
    fn edit_to_later_date_raises_last_interaction() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-01-01"),
        )
        .unwrap();

        let mut edited = snapshot.transactions[0].clone();
        edited.date = date("2024-09-01");

        let snapshot = update_transaction(snapshot, edited).unwrap();
        assert_eq!(
            snapshot.person(alice).unwrap().last_interaction,
            date("2024-09-01")
        );
    }

    #[test]
    fn add_rejects_invalid_drafts() {
        let alice = PersonId::new();

        let result = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "  ", 100, "2024-01-01"),
        );
        assert!(matches!(result, Err(LedgerError::Validation(_))));

        let result = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 0, "2024-01-01"),
        );
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[test]
    fn edit_rejects_invalid_fields() {
        let alice = PersonId::new();
        let snapshot = add_transaction(
            LedgerSnapshot::empty(),
            draft(TransactionKind::Give, alice, "Alice", 100, "2024-01-01"),
        )
        .unwrap();

        let mut edited = snapshot.transactions[0].clone();
        edited.amount = Money::zero();
        assert!(update_transaction(snapshot, edited).is_err());
    }

    #[test]
    fn many_operations_keep_invariants() {
        let alice = PersonId::new();
        let bob = PersonId::new();
        let mut snapshot = LedgerSnapshot::empty();

        for i in 1..=10 {
            let (kind, who, name) = if i % 2 == 0 {
                (TransactionKind::Receive, alice, "Alice")
            } else {
                (TransactionKind::Give, bob, "Bob")
            };
            snapshot = add_transaction(
                snapshot,
                draft(kind, who, name, i * 10, &format!("2024-01-{:02}", i)),
            )
            .unwrap();
            assert_invariants(&snapshot);
        }

        // Reassign every other transaction to the other person.
        let ids: Vec<_> = snapshot.transactions.iter().map(|t| t.id).collect();
        for (i, id) in ids.iter().enumerate() {
            if i % 2 == 0 {
                let mut edited = snapshot.transaction(*id).unwrap().clone();
                edited.person_id = if edited.person_id == alice { bob } else { alice };
                edited.person_name = "Swapped".to_string();
                snapshot = update_transaction(snapshot, edited).unwrap();
                assert_invariants(&snapshot);
            }
        }

        assert_eq!(snapshot.transactions.len(), 10);
    }
}
