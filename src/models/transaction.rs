//! Transaction model
//!
//! Each recorded gift event is a directed transaction: either a gift GIVEN
//! to a person or one RECEIVED from them. Transactions are created through
//! the engine's add path and mutated only through its edit path; they are
//! never deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{PersonId, TransactionId};
use super::money::Money;

/// Direction of a gift transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// A gift given by the user
    Give,
    /// A gift received by the user
    Receive,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Give => write!(f, "give"),
            Self::Receive => write!(f, "receive"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "give" => Ok(Self::Give),
            "receive" => Ok(Self::Receive),
            other => Err(format!("unknown kind '{}'; expected give|receive", other)),
        }
    }
}

/// A recorded gift event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, immutable after creation
    pub id: TransactionId,

    /// Direction of the gift
    pub kind: TransactionKind,

    /// The person this gift was exchanged with
    pub person_id: PersonId,

    /// Denormalized display copy of the person's name at recording time.
    /// Renaming a person does not rewrite this historical value.
    pub person_name: String,

    /// Gift value, always positive
    pub amount: Money,

    /// Calendar date of the event, independent of `created_at`
    pub date: NaiveDate,

    /// Occasion label (wedding, birthday, housewarming, ...)
    #[serde(default)]
    pub occasion: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Free-form labels
    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation timestamp, preserved across edits
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Materialize a draft into a transaction, assigning a fresh id and the
    /// current instant as `created_at`
    pub fn from_draft(draft: TransactionDraft) -> Self {
        Self {
            id: TransactionId::new(),
            kind: draft.kind,
            person_id: draft.person_id,
            person_name: draft.person_name,
            amount: draft.amount,
            date: draft.date,
            occasion: draft.occasion,
            notes: draft.notes,
            tags: draft.tags,
            created_at: Utc::now(),
        }
    }

    /// Check if this is a GIVE transaction
    pub fn is_give(&self) -> bool {
        self.kind == TransactionKind::Give
    }

    /// Check if this is a RECEIVE transaction
    pub fn is_receive(&self) -> bool {
        self.kind == TransactionKind::Receive
    }

    /// Validate the field constraints shared with drafts
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        validate_fields(&self.person_name, self.amount)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.person_name,
            self.amount
        )
    }
}

/// A transaction payload prior to id and timestamp assignment
///
/// Consumed only by the engine's add path; the edit path takes a full
/// [`Transaction`].
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub person_id: PersonId,
    pub person_name: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub occasion: String,
    pub notes: String,
    pub tags: Vec<String>,
}

impl TransactionDraft {
    /// Validate the draft before it reaches the engine
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        validate_fields(&self.person_name, self.amount)
    }
}

fn validate_fields(person_name: &str, amount: Money) -> Result<(), DraftValidationError> {
    if person_name.trim().is_empty() {
        return Err(DraftValidationError::EmptyPersonName);
    }
    if !amount.is_positive() {
        return Err(DraftValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Validation errors for drafts and edited transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValidationError {
    EmptyPersonName,
    NonPositiveAmount(Money),
}

impl fmt::Display for DraftValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPersonName => write!(f, "Person name cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for DraftValidationError {}
