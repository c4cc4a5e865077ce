//! Web layer for the PetClinic record keeper.
//!
//! Exposes an axum [`Router`] backed by any
//! [`petclinic_core::store::ClinicStore`]. The template engine is an external
//! collaborator: handlers return the view model it would consume — a `200 OK`
//! JSON body naming the view and carrying the model (field errors included),
//! or a `303 See Other` redirect with the flash message in an
//! `X-Flash-Message` header.

pub mod config;
pub mod error;
pub mod owners;
pub mod pets;
pub mod vets;
pub mod view;
pub mod visits;

use std::sync::Arc;

use axum::{Router, routing::get};
use petclinic_core::store::ClinicStore;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::WebError;

/// Build a fully-materialised router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: ClinicStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Owners
    .route(
      "/owners/new",
      get(owners::init_creation_form).post(owners::process_creation_form::<S>),
    )
    .route("/owners/find", get(owners::init_find_form))
    .route("/owners", get(owners::process_find_form::<S>))
    .route("/owners/{owner_id}", get(owners::show_owner::<S>))
    .route(
      "/owners/{owner_id}/edit",
      get(owners::init_update_form::<S>).post(owners::process_update_form::<S>),
    )
    // Pets
    .route(
      "/owners/{owner_id}/pets/new",
      get(pets::init_creation_form::<S>).post(pets::process_creation_form::<S>),
    )
    .route(
      "/owners/{owner_id}/pets/{pet_id}/edit",
      get(pets::init_update_form::<S>).post(pets::process_update_form::<S>),
    )
    // Visits
    .route(
      "/owners/{owner_id}/pets/{pet_id}/visits/new",
      get(visits::init_new_visit_form::<S>)
        .post(visits::process_new_visit_form::<S>),
    )
    // Vets
    .route("/vets.html", get(vets::show_vet_list::<S>))
    .route("/vets", get(vets::show_resources_vet_list::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}
