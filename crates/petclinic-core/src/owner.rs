//! Owner — the aggregate root over pets and their visits.

use serde::{Deserialize, Serialize};

use crate::{
  entity::{EntityId, PersonName},
  error::{Error, Result},
  pet::{Pet, Visit},
};

/// An owner and everything exclusively owned beneath it (pets, visits),
/// treated as one consistency unit.
///
/// The pets collection is a live, identity-stable sequence: [`Owner::pets`]
/// and [`Owner::pets_mut`] always expose the same underlying `Vec`, and
/// callers mutating it directly is part of the contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Owner {
  pub id:        Option<EntityId>,
  pub name:      PersonName,
  pub address:   String,
  pub city:      String,
  pub telephone: String,
  pets:          Vec<Pet>,
}

impl Owner {
  pub fn is_new(&self) -> bool {
    self.id.is_none()
  }

  /// The live pet collection, in insertion order.
  pub fn pets(&self) -> &Vec<Pet> {
    &self.pets
  }

  pub fn pets_mut(&mut self) -> &mut Vec<Pet> {
    &mut self.pets
  }

  /// Append `pet` only if it has not been persisted yet. A pet that already
  /// carries an id is silently ignored — a guard against double-insertion,
  /// not an error condition.
  pub fn add_pet(&mut self, pet: Pet) {
    if pet.is_new() {
      self.pets.push(pet);
    }
  }

  /// Case-insensitive lookup by pet name. With `ignore_new`, pets that have
  /// no id yet are excluded. First match in insertion order wins.
  pub fn pet_by_name(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
    self
      .pets
      .iter()
      .filter(|pet| !ignore_new || !pet.is_new())
      .find(|pet| pet.name_matches(name))
  }

  /// Exact id lookup. Pets without an id never match.
  pub fn pet_by_id(&self, id: EntityId) -> Option<&Pet> {
    self.pets.iter().find(|pet| pet.id == Some(id))
  }

  pub fn pet_by_id_mut(&mut self, id: EntityId) -> Option<&mut Pet> {
    self.pets.iter_mut().find(|pet| pet.id == Some(id))
  }

  /// Append `visit` to the pet identified by `pet_id`.
  ///
  /// Fails fast with an invalid-argument signal when the id is absent or
  /// unknown: both indicate a caller bug (a stale or fabricated id), not
  /// user input to be recovered from.
  pub fn add_visit(
    &mut self,
    pet_id: Option<EntityId>,
    visit: Visit,
  ) -> Result<()> {
    let id = pet_id.ok_or(Error::MissingPetId)?;
    let pet = self.pet_by_id_mut(id).ok_or(Error::PetNotFound(id))?;
    pet.visits.push(visit);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::pet::PetType;

  fn owner() -> Owner {
    Owner {
      name: PersonName::new("John", "Doe"),
      address: "123 Main St".into(),
      city: "Springfield".into(),
      telephone: "1234567890".into(),
      ..Owner::default()
    }
  }

  fn pet(id: Option<EntityId>, name: &str, birth: (i32, u32, u32)) -> Pet {
    Pet {
      id,
      name: Some(name.into()),
      birth_date: NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2),
      kind: Some(PetType::named("cat")),
      visits: vec![],
    }
  }

  #[test]
  fn add_pet_appends_new_pet() {
    let mut owner = owner();
    owner.add_pet(pet(None, "Whiskers", (2021, 3, 10)));
    assert_eq!(owner.pets().len(), 1);
    assert_eq!(owner.pets()[0].name.as_deref(), Some("Whiskers"));
  }

  #[test]
  fn add_pet_ignores_persisted_pet() {
    let mut owner = owner();
    owner.add_pet(pet(Some(1), "Fluffy", (2020, 1, 15)));
    assert!(owner.pets().is_empty());
  }

  #[test]
  fn add_pet_appends_multiple_new_pets() {
    let mut owner = owner();
    owner.add_pet(pet(None, "Buddy", (2021, 1, 1)));
    owner.add_pet(pet(None, "Max", (2021, 2, 2)));
    assert_eq!(owner.pets().len(), 2);
  }

  #[test]
  fn pets_accessor_is_identity_stable() {
    let mut owner = owner();
    owner.pets_mut().push(pet(Some(1), "Fluffy", (2020, 1, 15)));
    // Direct mutation through the accessor is visible on the next read.
    assert_eq!(owner.pets().len(), 1);
  }

  #[test]
  fn pet_by_name_is_case_insensitive() {
    let mut owner = owner();
    owner.add_pet(pet(None, "Whiskers", (2021, 3, 10)));

    for needle in ["whiskers", "Whiskers", "wHiSkErS"] {
      let found = owner.pet_by_name(needle, false);
      assert_eq!(found.and_then(|p| p.name.as_deref()), Some("Whiskers"));
    }
  }

  #[test]
  fn pet_by_name_misses_unknown_name() {
    let mut owner = owner();
    owner.add_pet(pet(None, "Whiskers", (2021, 3, 10)));
    assert!(owner.pet_by_name("NonExistent", false).is_none());
  }

  #[test]
  fn pet_by_name_ignore_new_skips_unsaved_pets() {
    let mut owner = owner();
    owner.add_pet(pet(None, "Whiskers", (2021, 3, 10)));

    assert!(owner.pet_by_name("Whiskers", true).is_none());
    assert!(owner.pet_by_name("Whiskers", false).is_some());
  }

  #[test]
  fn pet_by_name_ignore_new_still_finds_persisted_pets() {
    let mut owner = owner();
    owner.pets_mut().push(pet(Some(1), "Fluffy", (2020, 1, 15)));
    assert!(owner.pet_by_name("Fluffy", true).is_some());
  }

  #[test]
  fn pet_by_name_skips_nameless_pets() {
    let mut owner = owner();
    owner.add_pet(Pet::default());
    assert!(owner.pet_by_name("SomeName", false).is_none());
  }

  #[test]
  fn pet_by_name_empty_string_matches_empty_name() {
    let mut owner = owner();
    owner.add_pet(Pet { name: Some(String::new()), ..Pet::default() });
    let found = owner.pet_by_name("", false);
    assert_eq!(found.and_then(|p| p.name.as_deref()), Some(""));
  }

  #[test]
  fn pet_by_id_finds_among_multiple() {
    let mut owner = owner();
    owner.pets_mut().push(pet(Some(1), "Fluffy", (2020, 1, 15)));
    owner.pets_mut().push(pet(Some(2), "Rex", (2019, 5, 20)));

    assert_eq!(
      owner.pet_by_id(2).and_then(|p| p.name.as_deref()),
      Some("Rex")
    );
    assert_eq!(
      owner.pet_by_id(1).and_then(|p| p.name.as_deref()),
      Some("Fluffy")
    );
  }

  #[test]
  fn pet_by_id_misses_unknown_id() {
    let mut owner = owner();
    owner.pets_mut().push(pet(Some(1), "Fluffy", (2020, 1, 15)));
    assert!(owner.pet_by_id(999).is_none());
  }

  #[test]
  fn pet_by_id_never_matches_unsaved_pets() {
    let mut owner = owner();
    owner.add_pet(pet(None, "Whiskers", (2021, 3, 10)));
    assert!(owner.pet_by_id(0).is_none());
  }

  #[test]
  fn add_visit_appends_to_the_right_pet() {
    let mut owner = owner();
    owner.pets_mut().push(pet(Some(1), "Fluffy", (2020, 1, 15)));
    owner.pets_mut().push(pet(Some(2), "Rex", (2019, 5, 20)));

    let visit = Visit { description: "Vaccination".into(), ..Visit::new() };
    owner.add_visit(Some(2), visit).unwrap();

    assert!(owner.pet_by_id(1).unwrap().visits.is_empty());
    assert_eq!(owner.pet_by_id(2).unwrap().visits.len(), 1);
    assert_eq!(owner.pet_by_id(2).unwrap().visits[0].description, "Vaccination");
  }

  #[test]
  fn add_visit_accumulates_on_same_pet() {
    let mut owner = owner();
    owner.pets_mut().push(pet(Some(1), "Fluffy", (2020, 1, 15)));

    owner
      .add_visit(Some(1), Visit { description: "Checkup 1".into(), ..Visit::new() })
      .unwrap();
    owner
      .add_visit(Some(1), Visit { description: "Checkup 2".into(), ..Visit::new() })
      .unwrap();

    assert_eq!(owner.pet_by_id(1).unwrap().visits.len(), 2);
  }

  #[test]
  fn add_visit_without_pet_id_fails() {
    let mut owner = owner();
    let err = owner.add_visit(None, Visit::new()).unwrap_err();
    assert!(matches!(err, Error::MissingPetId));
  }

  #[test]
  fn add_visit_to_unknown_pet_fails_and_mutates_nothing() {
    let mut owner = owner();
    owner.pets_mut().push(pet(Some(1), "Fluffy", (2020, 1, 15)));

    let err = owner.add_visit(Some(999), Visit::new()).unwrap_err();
    assert!(matches!(err, Error::PetNotFound(999)));
    assert!(owner.pet_by_id(1).unwrap().visits.is_empty());
  }

  #[test]
  fn owner_id_assignment_flips_is_new() {
    let mut owner = owner();
    assert!(owner.is_new());
    owner.id = Some(100);
    assert!(!owner.is_new());
  }
}
