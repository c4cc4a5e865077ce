//! Vet — a person with a deduplicated set of specialties.

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, PersonName};

// ─── Specialty ───────────────────────────────────────────────────────────────

/// A named reference entity shared by many vets (radiology, surgery, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
  pub id:   Option<EntityId>,
  pub name: String,
}

impl Specialty {
  pub fn named(name: impl Into<String>) -> Self {
    Self { id: None, name: name.into() }
  }

  pub fn is_new(&self) -> bool {
    self.id.is_none()
  }
}

// ─── Vet ─────────────────────────────────────────────────────────────────────

/// A veterinarian. Specialties are deduplicated by entity identity (the
/// store-assigned id): two distinct specialties that merely share a name are
/// both kept. Unpersisted specialties have no identity yet and are always
/// treated as distinct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vet {
  pub id:      Option<EntityId>,
  pub name:    PersonName,
  specialties: Vec<Specialty>,
}

impl Vet {
  pub fn is_new(&self) -> bool {
    self.id.is_none()
  }

  /// Insert a specialty; re-inserting one whose id is already held is a
  /// no-op.
  pub fn add_specialty(&mut self, specialty: Specialty) {
    let duplicate = specialty.id.is_some()
      && self.specialties.iter().any(|s| s.id == specialty.id);
    if !duplicate {
      self.specialties.push(specialty);
    }
  }

  pub fn nr_of_specialties(&self) -> usize {
    self.specialties.len()
  }

  /// A fresh snapshot sorted ascending by name. Unlike
  /// [`Owner::pets`](crate::owner::Owner::pets), this is a copy: mutating
  /// the returned list leaves the vet untouched. That asymmetry is part of
  /// the contract.
  pub fn specialties(&self) -> Vec<Specialty> {
    let mut sorted = self.specialties.clone();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
  }
}

// ─── Vets ────────────────────────────────────────────────────────────────────

/// Wrapper around an ordered vet collection, used for bulk listing/export.
/// The accessor exposes the same live `Vec` on every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vets {
  #[serde(rename = "vetList")]
  list: Vec<Vet>,
}

impl Vets {
  pub fn new(list: Vec<Vet>) -> Self {
    Self { list }
  }

  pub fn list(&self) -> &Vec<Vet> {
    &self.list
  }

  pub fn list_mut(&mut self) -> &mut Vec<Vet> {
    &mut self.list
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn vet() -> Vet {
    Vet { name: PersonName::new("James", "Carter"), ..Vet::default() }
  }

  fn specialty(id: EntityId, name: &str) -> Specialty {
    Specialty { id: Some(id), name: name.into() }
  }

  #[test]
  fn no_specialties_by_default() {
    let vet = vet();
    assert_eq!(vet.nr_of_specialties(), 0);
    assert!(vet.specialties().is_empty());
  }

  #[test]
  fn add_specialty_counts_and_lists() {
    let mut vet = vet();
    vet.add_specialty(specialty(1, "Dentistry"));
    assert_eq!(vet.nr_of_specialties(), 1);
    assert_eq!(vet.specialties()[0].name, "Dentistry");
  }

  #[test]
  fn duplicate_identity_is_a_noop() {
    let mut vet = vet();
    vet.add_specialty(specialty(1, "Dentistry"));
    vet.add_specialty(specialty(1, "Dentistry"));
    assert_eq!(vet.nr_of_specialties(), 1);
  }

  #[test]
  fn same_name_different_identity_are_both_kept() {
    let mut vet = vet();
    vet.add_specialty(specialty(1, "Surgery"));
    vet.add_specialty(specialty(2, "Surgery"));
    assert_eq!(vet.nr_of_specialties(), 2);
  }

  #[test]
  fn specialties_snapshot_is_sorted_by_name() {
    let mut vet = vet();
    vet.add_specialty(specialty(2, "Surgery"));
    vet.add_specialty(specialty(3, "Radiology"));
    vet.add_specialty(specialty(1, "Dentistry"));

    let names: Vec<_> =
      vet.specialties().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["Dentistry", "Radiology", "Surgery"]);
    assert_eq!(vet.nr_of_specialties(), vet.specialties().len());
  }

  #[test]
  fn specialties_snapshot_is_detached() {
    let mut vet = vet();
    vet.add_specialty(specialty(1, "Dentistry"));

    let mut snapshot = vet.specialties();
    snapshot.clear();
    assert_eq!(vet.nr_of_specialties(), 1);
  }

  #[test]
  fn vets_accessor_is_identity_stable() {
    let mut vets = Vets::default();
    vets.list_mut().push(vet());
    assert_eq!(vets.list().len(), 1);
  }
}
