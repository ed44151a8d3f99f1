//! Person name resolution
//!
//! The engine is keyed by `PersonId`; typed names are resolved to ids up
//! front by this module, keeping fuzzy-matching policy out of the engine's
//! contract. Resolution is exact case-insensitive match first, then a
//! substring match that only succeeds when it is unambiguous.

use crate::models::{LedgerSnapshot, Person, PersonId};

/// Resolves a typed name to a person id
pub trait PersonResolver {
    /// Resolve a query to a person id, or `None` when no unambiguous match
    /// exists
    fn resolve(&self, query: &str) -> Option<PersonId>;
}

/// Name-based resolver over a snapshot's people
pub struct NameResolver<'a> {
    people: &'a [Person],
}

impl<'a> NameResolver<'a> {
    /// Create a resolver over a snapshot
    pub fn new(snapshot: &'a LedgerSnapshot) -> Self {
        Self {
            people: &snapshot.people,
        }
    }

    /// All persons whose name contains the query (case-insensitive)
    pub fn matches(&self, query: &str) -> Vec<&Person> {
        self.people
            .iter()
            .filter(|p| p.name_contains(query))
            .collect()
    }
}

impl PersonResolver for NameResolver<'_> {
    fn resolve(&self, query: &str) -> Option<PersonId> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(person) = self.people.iter().find(|p| p.matches_name(query)) {
            return Some(person.id);
        }

        // Substring match only counts when exactly one person fits.
        let candidates = self.matches(query);
        match candidates.as_slice() {
            [single] => Some(single.id),
            _ => None,
        }
    }
}
