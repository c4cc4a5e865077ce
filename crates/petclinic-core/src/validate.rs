//! Field-scoped validation rules.
//!
//! Validators return the full list of field errors for one candidate entity
//! instead of mutating a shared collector; the checks never short-circuit, so
//! a single call can flag several fields at once. Field errors are collected
//! and rendered, never thrown.

use chrono::Local;
use serde::Serialize;

use crate::{owner::Owner, pet::{Pet, Visit}};

pub const REQUIRED: &str = "required";
pub const TYPE_MISMATCH_BIRTH_DATE: &str = "typeMismatch.birthDate";
pub const INVALID_TELEPHONE: &str = "telephone.invalid";
pub const DUPLICATE: &str = "duplicate";
pub const NOT_FOUND: &str = "notFound";

/// A validation failure scoped to one named input. Attached to a form
/// binding result rather than propagated as a fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   &'static str,
  pub code:    &'static str,
  pub message: String,
}

impl FieldError {
  pub fn new(
    field: &'static str,
    code: &'static str,
    message: impl Into<String>,
  ) -> Self {
    Self { field, code, message: message.into() }
  }

  pub fn required(field: &'static str) -> Self {
    Self::new(field, REQUIRED, "is required")
  }
}

fn is_blank(value: &str) -> bool {
  value.trim().is_empty()
}

/// Validate a pet before save.
///
/// The type is required only while the pet is new: the edit form cannot
/// clear the type in practice, so the rule only guards creation. The birth
/// date checks run regardless of new/existing status.
pub fn validate_pet(pet: &Pet) -> Vec<FieldError> {
  let mut errors = Vec::new();

  if pet.name.as_deref().is_none_or(is_blank) {
    errors.push(FieldError::required("name"));
  }

  if pet.is_new() && pet.kind.is_none() {
    errors.push(FieldError::required("type"));
  }

  match pet.birth_date {
    None => errors.push(FieldError::required("birth_date")),
    Some(date) if date > Local::now().date_naive() => {
      errors.push(FieldError::new(
        "birth_date",
        TYPE_MISMATCH_BIRTH_DATE,
        "birth date cannot be in the future",
      ));
    }
    Some(_) => {}
  }

  errors
}

/// Validate an owner before save: every scalar field is required and the
/// telephone must be exactly ten digits.
pub fn validate_owner(owner: &Owner) -> Vec<FieldError> {
  let mut errors = Vec::new();

  if is_blank(&owner.name.first) {
    errors.push(FieldError::required("first_name"));
  }
  if is_blank(&owner.name.last) {
    errors.push(FieldError::required("last_name"));
  }
  if is_blank(&owner.address) {
    errors.push(FieldError::required("address"));
  }
  if is_blank(&owner.city) {
    errors.push(FieldError::required("city"));
  }

  if is_blank(&owner.telephone) {
    errors.push(FieldError::required("telephone"));
  } else if !is_valid_telephone(&owner.telephone) {
    errors.push(FieldError::new(
      "telephone",
      INVALID_TELEPHONE,
      "telephone must be exactly 10 digits",
    ));
  }

  errors
}

/// Validate a visit before booking: the description is required.
pub fn validate_visit(visit: &Visit) -> Vec<FieldError> {
  if is_blank(&visit.description) {
    vec![FieldError::required("description")]
  } else {
    vec![]
  }
}

fn is_valid_telephone(telephone: &str) -> bool {
  telephone.len() == 10 && telephone.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, Local, NaiveDate};

  use super::*;
  use crate::{entity::PersonName, pet::PetType};

  fn fields(errors: &[FieldError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.field).collect()
  }

  #[test]
  fn empty_new_pet_fails_all_three_checks() {
    let errors = validate_pet(&Pet::default());
    assert_eq!(errors.len(), 3);
    assert_eq!(fields(&errors), ["name", "type", "birth_date"]);
    assert!(errors.iter().all(|e| e.code == REQUIRED));
  }

  #[test]
  fn blank_name_is_rejected() {
    let pet = Pet {
      name: Some("   ".into()),
      birth_date: NaiveDate::from_ymd_opt(2020, 1, 1),
      kind: Some(PetType::named("cat")),
      ..Pet::default()
    };
    assert_eq!(fields(&validate_pet(&pet)), ["name"]);
  }

  #[test]
  fn missing_type_is_tolerated_on_existing_pet() {
    let pet = Pet {
      id: Some(10),
      name: Some("Michi".into()),
      birth_date: NaiveDate::from_ymd_opt(2020, 1, 1),
      kind: None,
      visits: vec![],
    };
    assert!(validate_pet(&pet).is_empty());
  }

  #[test]
  fn future_birth_date_is_rejected() {
    let pet = Pet {
      name: Some("Michi".into()),
      birth_date: Some(Local::now().date_naive() + Duration::days(2)),
      kind: Some(PetType::named("cat")),
      ..Pet::default()
    };
    let errors = validate_pet(&pet);
    assert_eq!(fields(&errors), ["birth_date"]);
    assert_eq!(errors[0].code, TYPE_MISMATCH_BIRTH_DATE);
  }

  #[test]
  fn future_birth_date_is_rejected_even_for_existing_pet() {
    let pet = Pet {
      id: Some(10),
      name: Some("Michi".into()),
      birth_date: Some(Local::now().date_naive() + Duration::days(1)),
      kind: None,
      visits: vec![],
    };
    assert_eq!(fields(&validate_pet(&pet)), ["birth_date"]);
  }

  #[test]
  fn today_is_an_acceptable_birth_date() {
    let pet = Pet {
      name: Some("Michi".into()),
      birth_date: Some(Local::now().date_naive()),
      kind: Some(PetType::named("cat")),
      ..Pet::default()
    };
    assert!(validate_pet(&pet).is_empty());
  }

  #[test]
  fn valid_new_pet_passes() {
    let pet = Pet {
      name: Some("Michi".into()),
      birth_date: NaiveDate::from_ymd_opt(2020, 1, 1),
      kind: Some(PetType::named("cat")),
      ..Pet::default()
    };
    assert!(validate_pet(&pet).is_empty());
  }

  #[test]
  fn blank_owner_fails_every_field() {
    let errors = validate_owner(&Owner::default());
    assert_eq!(
      fields(&errors),
      ["first_name", "last_name", "address", "city", "telephone"]
    );
  }

  // `Owner` keeps its pets field private, so build by mutation.
  fn owner_with_telephone(telephone: &str) -> Owner {
    let mut owner = Owner::default();
    owner.name = PersonName::new("John", "Doe");
    owner.address = "123 Main St".into();
    owner.city = "Springfield".into();
    owner.telephone = telephone.into();
    owner
  }

  #[test]
  fn telephone_must_be_ten_digits() {
    for bad in ["123", "12-345-678", "12345abcde", "12345678901"] {
      let errors = validate_owner(&owner_with_telephone(bad));
      assert_eq!(fields(&errors), ["telephone"], "telephone {bad:?}");
      assert_eq!(errors[0].code, INVALID_TELEPHONE);
    }
  }

  #[test]
  fn valid_owner_passes() {
    for good in ["1234567890", "0987654321"] {
      assert!(validate_owner(&owner_with_telephone(good)).is_empty());
    }
  }

  #[test]
  fn visit_requires_a_description() {
    assert_eq!(fields(&validate_visit(&Visit::new())), ["description"]);

    let visit = Visit { description: "Annual checkup".into(), ..Visit::new() };
    assert!(validate_visit(&visit).is_empty());
  }
}
