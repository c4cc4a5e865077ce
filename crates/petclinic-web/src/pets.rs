//! Handlers for pet creation and editing under an owner.
//!
//! The duplicate-name guard lives here rather than in `validate`: it needs
//! the owning aggregate, and the rule differs between create (existing pets
//! only) and edit (any pet other than the one being edited).

use std::sync::Arc;

use axum::extract::{Form, Path, State};
use chrono::NaiveDate;
use petclinic_core::{
  entity::EntityId,
  format::{parse_pet_type, print_pet_type},
  owner::Owner,
  pet::{Pet, PetType},
  store::ClinicStore,
  validate::{self, FieldError, validate_pet},
};
use serde::Deserialize;
use serde_json::json;

use crate::{error::WebError, view::PageResponse};

pub const CREATE_OR_UPDATE_FORM: &str = "pets/createOrUpdatePetForm";

// ─── Form binding ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PetForm {
  pub name:       String,
  pub birth_date: String,
  #[serde(rename = "type")]
  pub kind:       String,
}

/// Bind the raw form onto a candidate pet. Unparseable inputs become field
/// errors and leave the corresponding field unset, exactly as a binding
/// layer would.
fn bind(
  form: PetForm,
  id: Option<EntityId>,
  types: &[PetType],
) -> (Pet, Vec<FieldError>) {
  let mut errors = Vec::new();
  let mut pet = Pet { id, ..Pet::default() };

  if !form.name.is_empty() {
    pet.name = Some(form.name);
  }

  if !form.birth_date.is_empty() {
    match NaiveDate::parse_from_str(&form.birth_date, "%Y-%m-%d") {
      Ok(date) => pet.birth_date = Some(date),
      Err(_) => errors.push(FieldError::new(
        "birth_date",
        "typeMismatch",
        format!("invalid date: {:?}", form.birth_date),
      )),
    }
  }

  if !form.kind.is_empty() {
    match parse_pet_type(types, &form.kind) {
      Ok(kind) => pet.kind = Some(kind),
      // The parse error is converted into a field error here; it must never
      // propagate as an unhandled fault.
      Err(e) => errors.push(FieldError::new("type", "typeMismatch", e.to_string())),
    }
  }

  (pet, errors)
}

/// Run the pet validator, keeping binding errors authoritative for their
/// fields.
fn merge_validation(mut errors: Vec<FieldError>, pet: &Pet) -> Vec<FieldError> {
  for error in validate_pet(pet) {
    if !errors.iter().any(|e| e.field == error.field) {
      errors.push(error);
    }
  }
  errors
}

fn form_view(
  owner: &Owner,
  pet: &Pet,
  types: &[PetType],
  errors: &[FieldError],
) -> PageResponse {
  let type_names: Vec<String> = types.iter().map(print_pet_type).collect();
  PageResponse::render(
    CREATE_OR_UPDATE_FORM,
    json!({
      "owner":  owner,
      "pet":    pet,
      "types":  type_names,
      "errors": errors,
    }),
  )
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

// ─── Create ───────────────────────────────────────────────────────────────────

/// `GET /owners/{owner_id}/pets/new`
pub async fn init_creation_form<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<EntityId>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let owner = load_owner(store.as_ref(), owner_id).await?;
  let types = store.find_pet_types().await.map_err(WebError::store)?;
  Ok(form_view(&owner, &Pet::default(), &types, &[]))
}

/// `POST /owners/{owner_id}/pets/new`
pub async fn process_creation_form<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<EntityId>,
  Form(form): Form<PetForm>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut owner = load_owner(store.as_ref(), owner_id).await?;
  let types = store.find_pet_types().await.map_err(WebError::store)?;

  let (pet, bind_errors) = bind(form, None, &types);
  let mut errors = merge_validation(bind_errors, &pet);

  // Creation rejects a name already carried by a persisted pet.
  if let Some(name) = pet.name.as_deref()
    && owner.pet_by_name(name, true).is_some()
  {
    errors.push(FieldError::new("name", validate::DUPLICATE, "already exists"));
  }

  if !errors.is_empty() {
    return Ok(form_view(&owner, &pet, &types, &errors));
  }

  owner.add_pet(pet);
  store.save_owner(owner).await.map_err(WebError::store)?;
  Ok(PageResponse::redirect(format!("/owners/{owner_id}"), None))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `GET /owners/{owner_id}/pets/{pet_id}/edit`
pub async fn init_update_form<S>(
  State(store): State<Arc<S>>,
  Path((owner_id, pet_id)): Path<(EntityId, EntityId)>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let owner = load_owner(store.as_ref(), owner_id).await?;
  let pet = owner
    .pet_by_id(pet_id)
    .cloned()
    .ok_or_else(|| WebError::NotFound(format!("pet {pet_id} not found")))?;
  let types = store.find_pet_types().await.map_err(WebError::store)?;
  Ok(form_view(&owner, &pet, &types, &[]))
}

/// `POST /owners/{owner_id}/pets/{pet_id}/edit`
pub async fn process_update_form<S>(
  State(store): State<Arc<S>>,
  Path((owner_id, pet_id)): Path<(EntityId, EntityId)>,
  Form(form): Form<PetForm>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut owner = load_owner(store.as_ref(), owner_id).await?;
  if owner.pet_by_id(pet_id).is_none() {
    return Err(WebError::NotFound(format!("pet {pet_id} not found")));
  }
  let types = store.find_pet_types().await.map_err(WebError::store)?;

  let (candidate, bind_errors) = bind(form, Some(pet_id), &types);
  let mut errors = merge_validation(bind_errors, &candidate);

  // A pet may keep its own name; any other pet already holding it is a
  // conflict.
  if let Some(name) = candidate.name.as_deref()
    && owner
      .pet_by_name(name, false)
      .is_some_and(|existing| existing.id != Some(pet_id))
  {
    errors.push(FieldError::new("name", validate::DUPLICATE, "already exists"));
  }

  if !errors.is_empty() {
    return Ok(form_view(&owner, &candidate, &types, &errors));
  }

  let Pet { name, birth_date, kind, .. } = candidate;
  if let Some(pet) = owner.pet_by_id_mut(pet_id) {
    pet.name = name;
    pet.birth_date = birth_date;
    pet.kind = kind;
  }

  store.save_owner(owner).await.map_err(WebError::store)?;
  Ok(PageResponse::redirect(format!("/owners/{owner_id}"), None))
}
