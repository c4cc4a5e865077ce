//! Error types for `petclinic-core`.

use thiserror::Error;

use crate::entity::EntityId;

/// Invalid-argument signals from aggregate operations. These indicate a
/// caller bug (e.g. a stale pet id), not bad user input, and are never
/// rendered as field errors.
#[derive(Debug, Error)]
pub enum Error {
  #[error("pet id is required")]
  MissingPetId,

  #[error("pet not found: {0}")]
  PetNotFound(EntityId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
