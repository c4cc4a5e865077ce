//! Pet, its reference type, and the visits it accumulates.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

// ─── PetType ─────────────────────────────────────────────────────────────────

/// A named reference entity shared by many pets (cat, dog, ...). Lookups
/// compare by id, never by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetType {
  pub id:   Option<EntityId>,
  pub name: Option<String>,
}

impl PetType {
  pub fn named(name: impl Into<String>) -> Self {
    Self { id: None, name: Some(name.into()) }
  }

  pub fn is_new(&self) -> bool {
    self.id.is_none()
  }
}

// ─── Visit ───────────────────────────────────────────────────────────────────

/// A dated, described clinical event. Exclusively owned by one pet; appended
/// through [`Owner::add_visit`](crate::owner::Owner::add_visit) and never
/// reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
  pub id:          Option<EntityId>,
  pub date:        NaiveDate,
  pub description: String,
}

impl Visit {
  /// A fresh visit dated today.
  pub fn new() -> Self {
    Self {
      id:          None,
      date:        Local::now().date_naive(),
      description: String::new(),
    }
  }

  pub fn is_new(&self) -> bool {
    self.id.is_none()
  }
}

impl Default for Visit {
  fn default() -> Self {
    Self::new()
  }
}

// ─── Pet ─────────────────────────────────────────────────────────────────────

/// A named animal with a birth date, a type, and its visit history.
///
/// The scalar fields are optional because they mirror form binding: a pet
/// arrives from a half-filled form with holes in it, and
/// [`validate_pet`](crate::validate::validate_pet) — not the type system —
/// decides what is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pet {
  pub id:         Option<EntityId>,
  pub name:       Option<String>,
  pub birth_date: Option<NaiveDate>,
  pub kind:       Option<PetType>,
  pub visits:     Vec<Visit>,
}

impl Pet {
  pub fn is_new(&self) -> bool {
    self.id.is_none()
  }

  /// Case-insensitive name match. A nameless pet never matches anything.
  pub(crate) fn name_matches(&self, needle: &str) -> bool {
    self
      .name
      .as_deref()
      .is_some_and(|n| n.to_lowercase() == needle.to_lowercase())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_visit_is_dated_today() {
    let visit = Visit::new();
    assert!(visit.is_new());
    assert_eq!(visit.date, Local::now().date_naive());
    assert!(visit.description.is_empty());
  }

  #[test]
  fn pet_without_id_is_new() {
    let mut pet = Pet { name: Some("Fluffy".into()), ..Pet::default() };
    assert!(pet.is_new());
    pet.id = Some(7);
    assert!(!pet.is_new());
  }

  #[test]
  fn nameless_pet_matches_nothing() {
    let pet = Pet::default();
    assert!(!pet.name_matches("Fluffy"));
    assert!(!pet.name_matches(""));
  }
}
