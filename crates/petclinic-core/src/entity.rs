//! Shared identity and naming primitives.
//!
//! Each aggregate embeds its identity directly: an `Option<EntityId>` that is
//! `None` until the store assigns a row id on first save, plus a shared name
//! pair for the two person-like aggregates.

use serde::{Deserialize, Serialize};

/// Store-assigned identity (a SQLite rowid). Assigned exactly once on first
/// successful save; never reassigned.
pub type EntityId = i64;

/// The name pair shared by [`Owner`](crate::owner::Owner) and
/// [`Vet`](crate::vet::Vet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
  pub first: String,
  pub last:  String,
}

impl PersonName {
  pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
    Self { first: first.into(), last: last.into() }
  }
}
