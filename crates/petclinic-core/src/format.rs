//! Conversion between a pet-type name and the entity, for form binding.

use thiserror::Error;

use crate::pet::PetType;

/// Raised when a submitted type name matches nothing in the known type list.
/// The web layer converts this into a field error on `type`; it is never
/// allowed to propagate as an unhandled fault.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("type not found: {0}")]
pub struct TypeParseError(pub String);

/// Render a pet type for display. A nameless type prints as the literal
/// `"<null>"` placeholder rather than failing.
pub fn print_pet_type(kind: &PetType) -> String {
  kind.name.clone().unwrap_or_else(|| "<null>".to_owned())
}

/// Resolve a submitted type name against the known types (as listed by the
/// store, ordered by name). The match is exact and case-sensitive; the first
/// hit wins.
pub fn parse_pet_type(
  types: &[PetType],
  text: &str,
) -> Result<PetType, TypeParseError> {
  types
    .iter()
    .find(|t| t.name.as_deref() == Some(text))
    .cloned()
    .ok_or_else(|| TypeParseError(text.to_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn print_returns_the_name() {
    assert_eq!(print_pet_type(&PetType::named("cat")), "cat");
  }

  #[test]
  fn print_falls_back_to_placeholder() {
    assert_eq!(print_pet_type(&PetType::default()), "<null>");
  }

  #[test]
  fn parse_finds_exact_match() {
    let types = [PetType::named("cat"), PetType::named("dog")];
    let parsed = parse_pet_type(&types, "dog").unwrap();
    assert_eq!(parsed.name.as_deref(), Some("dog"));
  }

  #[test]
  fn parse_is_case_sensitive() {
    let types = [PetType::named("cat")];
    assert!(parse_pet_type(&types, "Cat").is_err());
  }

  #[test]
  fn parse_miss_names_the_offender() {
    let types = [PetType::named("cat")];
    let err = parse_pet_type(&types, "lion").unwrap_err();
    assert!(err.to_string().contains("type not found"));
    assert_eq!(err.to_string(), "type not found: lion");
  }

  #[test]
  fn parse_round_trips_with_print() {
    let types = [PetType::named("cat"), PetType::named("dog")];
    for kind in &types {
      let parsed = parse_pet_type(&types, &print_pet_type(kind)).unwrap();
      assert_eq!(parsed.name, kind.name);
    }
  }
}
