//! The `ClinicStore` trait and supporting pagination types.
//!
//! The trait is implemented by storage backends (e.g.
//! `petclinic-store-sqlite`). The web layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  entity::EntityId,
  owner::Owner,
  pet::PetType,
  vet::{Vet, Vets},
};

// ─── Pagination ──────────────────────────────────────────────────────────────

/// A 1-based page request. Both list views use a fixed page size of 5.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
  pub number: u32,
  pub size:   u32,
}

impl PageRequest {
  pub const DEFAULT_SIZE: u32 = 5;

  pub fn new(number: u32) -> Self {
    Self { number, size: Self::DEFAULT_SIZE }
  }

  pub fn offset(&self) -> u64 {
    u64::from(self.number.saturating_sub(1)) * u64::from(self.size)
  }
}

/// One page of results plus the totals the list views display.
#[derive(Debug, Clone)]
pub struct Page<T> {
  pub items:       Vec<T>,
  pub number:      u32,
  pub total_pages: u32,
  pub total_items: u64,
}

impl<T> Page<T> {
  /// Assemble a page from a slice of items and the overall count.
  pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
    let size = u64::from(request.size.max(1));
    let total_pages = total_items.div_ceil(size) as u32;
    Self { items, number: request.number, total_pages, total_items }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a clinic record store.
///
/// Saving an aggregate persists the whole ownership chain in one
/// transaction: a new owner, its new pets, and their new visits all receive
/// ids from a single save call. Ids are assigned exactly once and never
/// reassigned.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ClinicStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Owners ────────────────────────────────────────────────────────────

  /// Persist `owner` and everything beneath it, returning the aggregate
  /// with ids filled in.
  fn save_owner(
    &self,
    owner: Owner,
  ) -> impl Future<Output = Result<Owner, Self::Error>> + Send + '_;

  /// Load an owner with its pets and visits, in insertion order. Returns
  /// `None` if not found.
  fn find_owner(
    &self,
    id: EntityId,
  ) -> impl Future<Output = Result<Option<Owner>, Self::Error>> + Send + '_;

  /// Page through owners whose last name starts with `last_name`. An empty
  /// prefix matches every owner.
  fn find_owners_by_last_name<'a>(
    &'a self,
    last_name: &'a str,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Owner>, Self::Error>> + Send + 'a;

  fn count_owners(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn delete_all_owners(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Pet types ─────────────────────────────────────────────────────────

  fn save_pet_type(
    &self,
    kind: PetType,
  ) -> impl Future<Output = Result<PetType, Self::Error>> + Send + '_;

  /// All pet types, ordered ascending by name.
  fn find_pet_types(
    &self,
  ) -> impl Future<Output = Result<Vec<PetType>, Self::Error>> + Send + '_;

  fn delete_all_pet_types(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Vets ──────────────────────────────────────────────────────────────

  /// Persist a vet and link its specialties (persisting any new ones).
  fn save_vet(
    &self,
    vet: Vet,
  ) -> impl Future<Output = Result<Vet, Self::Error>> + Send + '_;

  /// Page through vets, specialties loaded sorted by name.
  fn find_vets(
    &self,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Vet>, Self::Error>> + Send + '_;

  /// The full vet listing for bulk export.
  fn find_all_vets(
    &self,
  ) -> impl Future<Output = Result<Vets, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_request_offset_is_zero_based() {
    assert_eq!(PageRequest::new(1).offset(), 0);
    assert_eq!(PageRequest::new(2).offset(), 5);
    assert_eq!(PageRequest::new(3).offset(), 10);
  }

  #[test]
  fn page_totals_round_up() {
    let page = Page::new(vec![1, 2, 3, 4, 5], PageRequest::new(1), 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_items, 12);

    let empty: Page<i32> = Page::new(vec![], PageRequest::new(1), 0);
    assert_eq!(empty.total_pages, 0);
  }
}
