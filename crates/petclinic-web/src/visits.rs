//! Handlers for booking a visit against an owner's pet.

use std::sync::Arc;

use axum::extract::{Form, Path, State};
use chrono::NaiveDate;
use petclinic_core::{
  entity::EntityId,
  owner::Owner,
  pet::Visit,
  store::ClinicStore,
  validate::{FieldError, validate_visit},
};
use serde::Deserialize;
use serde_json::json;

use crate::{error::WebError, view::PageResponse};

pub const CREATE_OR_UPDATE_FORM: &str = "pets/createOrUpdateVisitForm";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VisitForm {
  pub date:        String,
  pub description: String,
}

/// Bind the raw form onto a fresh visit. The date defaults to today when the
/// field is left empty.
fn bind(form: VisitForm) -> (Visit, Vec<FieldError>) {
  let mut errors = Vec::new();
  let mut visit = Visit::new();

  if !form.date.is_empty() {
    match NaiveDate::parse_from_str(&form.date, "%Y-%m-%d") {
      Ok(date) => visit.date = date,
      Err(_) => errors.push(FieldError::new(
        "date",
        "typeMismatch",
        format!("invalid date: {:?}", form.date),
      )),
    }
  }
  visit.description = form.description;

  (visit, errors)
}

fn form_view(
  owner: &Owner,
  pet_id: EntityId,
  visit: &Visit,
  errors: &[FieldError],
) -> Result<PageResponse, WebError> {
  let pet = owner
    .pet_by_id(pet_id)
    .ok_or_else(|| WebError::NotFound(format!("pet {pet_id} not found")))?;
  Ok(PageResponse::render(
    CREATE_OR_UPDATE_FORM,
    json!({
      "owner":  owner,
      "pet":    pet,
      "visit":  visit,
      "errors": errors,
    }),
  ))
}

async fn load_owner<S>(store: &S, owner_id: EntityId) -> Result<Owner, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .find_owner(owner_id)
    .await
    .map_err(WebError::store)?
    .ok_or_else(|| WebError::NotFound(format!("owner {owner_id} not found")))
}

/// `GET /owners/{owner_id}/pets/{pet_id}/visits/new`
///
/// The visit handed to the form is pre-dated to today.
pub async fn init_new_visit_form<S>(
  State(store): State<Arc<S>>,
  Path((owner_id, pet_id)): Path<(EntityId, EntityId)>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let owner = load_owner(store.as_ref(), owner_id).await?;
  form_view(&owner, pet_id, &Visit::new(), &[])
}

/// `POST /owners/{owner_id}/pets/{pet_id}/visits/new`
pub async fn process_new_visit_form<S>(
  State(store): State<Arc<S>>,
  Path((owner_id, pet_id)): Path<(EntityId, EntityId)>,
  Form(form): Form<VisitForm>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut owner = load_owner(store.as_ref(), owner_id).await?;

  let (visit, mut errors) = bind(form);
  errors.extend(validate_visit(&visit));

  if !errors.is_empty() {
    return form_view(&owner, pet_id, &visit, &errors);
  }

  // An unknown pet id here is a stale or fabricated URL, not bad form input.
  owner
    .add_visit(Some(pet_id), visit)
    .map_err(|e| WebError::NotFound(e.to_string()))?;

  store.save_owner(owner).await.map_err(WebError::store)?;
  Ok(PageResponse::redirect(
    format!("/owners/{owner_id}"),
    Some("Your visit has been booked"),
  ))
}
