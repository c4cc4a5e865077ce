//! Handlers for the owner form, search, and detail pages.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/owners/new` | Creation form |
//! | `POST` | `/owners/new` | Create; flash `New Owner Created` |
//! | `GET`  | `/owners/find` | Search form |
//! | `GET`  | `/owners?last_name=&page=` | Paginated last-name prefix search |
//! | `GET`  | `/owners/{id}` | Detail page |
//! | `GET`  | `/owners/{id}/edit` | Edit form |
//! | `POST` | `/owners/{id}/edit` | Update; flash `Owner Values Updated` |

use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use petclinic_core::{
  entity::{EntityId, PersonName},
  owner::Owner,
  store::{ClinicStore, PageRequest},
  validate::{self, FieldError, validate_owner},
};
use serde::Deserialize;
use serde_json::json;

use crate::{error::WebError, view::PageResponse};

pub const CREATE_OR_UPDATE_FORM: &str = "owners/createOrUpdateOwnerForm";
pub const FIND_FORM: &str = "owners/findOwners";
pub const LIST: &str = "owners/ownersList";
pub const DETAILS: &str = "owners/ownerDetails";

// ─── Form binding ─────────────────────────────────────────────────────────────

/// The owner form deliberately has no id field, so a client-supplied id can
/// never bind onto an aggregate.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OwnerForm {
  pub first_name: String,
  pub last_name:  String,
  pub address:    String,
  pub city:       String,
  pub telephone:  String,
}

impl OwnerForm {
  fn apply(self, owner: &mut Owner) {
    owner.name = PersonName::new(self.first_name, self.last_name);
    owner.address = self.address;
    owner.city = self.city;
    owner.telephone = self.telephone;
  }
}

fn form_view(owner: &Owner, errors: &[FieldError]) -> PageResponse {
  PageResponse::render(
    CREATE_OR_UPDATE_FORM,
    json!({ "owner": owner, "errors": errors }),
  )
}

fn assigned_id(owner: &Owner) -> Result<EntityId, WebError> {
  owner
    .id
    .ok_or_else(|| WebError::Store("store did not assign an owner id".into()))
}

pub(crate) fn page_request(page: Option<u32>) -> Result<PageRequest, WebError> {
  let number = page.unwrap_or(1);
  if number < 1 {
    return Err(WebError::BadRequest("page index must be at least 1".into()));
  }
  Ok(PageRequest::new(number))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `GET /owners/new`
pub async fn init_creation_form() -> PageResponse {
  form_view(&Owner::default(), &[])
}

/// `POST /owners/new`
pub async fn process_creation_form<S>(
  State(store): State<Arc<S>>,
  Form(form): Form<OwnerForm>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut owner = Owner::default();
  form.apply(&mut owner);

  let errors = validate_owner(&owner);
  if !errors.is_empty() {
    return Ok(form_view(&owner, &errors));
  }

  let owner = store.save_owner(owner).await.map_err(WebError::store)?;
  let id = assigned_id(&owner)?;
  Ok(PageResponse::redirect(
    format!("/owners/{id}"),
    Some("New Owner Created"),
  ))
}

// ─── Find / list ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FindParams {
  pub last_name: Option<String>,
  pub page:      Option<u32>,
}

/// `GET /owners/find`
pub async fn init_find_form() -> PageResponse {
  PageResponse::render(FIND_FORM, json!({ "owner": Owner::default() }))
}

/// `GET /owners[?last_name=<prefix>&page=<n>]`
///
/// Zero matches re-render the find form with a field error on `last_name` —
/// a deliberate UX choice distinguishing "no results" from "no filter".
pub async fn process_find_form<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<FindParams>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let request = page_request(params.page)?;
  let last_name = params.last_name.unwrap_or_default();

  let page = store
    .find_owners_by_last_name(&last_name, request)
    .await
    .map_err(WebError::store)?;

  if page.items.is_empty() {
    let errors =
      [FieldError::new("last_name", validate::NOT_FOUND, "not found")];
    return Ok(PageResponse::render(
      FIND_FORM,
      json!({ "owner": { "last_name": last_name }, "errors": errors }),
    ));
  }

  Ok(PageResponse::render(
    LIST,
    json!({
      "listOwners":  page.items,
      "currentPage": page.number,
      "totalPages":  page.total_pages,
      "totalItems":  page.total_items,
    }),
  ))
}

// ─── Show ─────────────────────────────────────────────────────────────────────

/// `GET /owners/{owner_id}`
pub async fn show_owner<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<EntityId>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let owner = store
    .find_owner(owner_id)
    .await
    .map_err(WebError::store)?
    .ok_or_else(|| WebError::NotFound(format!("owner {owner_id} not found")))?;
  Ok(PageResponse::render(DETAILS, json!({ "owner": owner })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `GET /owners/{owner_id}/edit`
pub async fn init_update_form<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<EntityId>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let owner = store
    .find_owner(owner_id)
    .await
    .map_err(WebError::store)?
    .ok_or_else(|| WebError::NotFound(format!("owner {owner_id} not found")))?;
  Ok(form_view(&owner, &[]))
}

/// `POST /owners/{owner_id}/edit`
pub async fn process_update_form<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<EntityId>,
  Form(form): Form<OwnerForm>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut owner = store
    .find_owner(owner_id)
    .await
    .map_err(WebError::store)?
    .ok_or_else(|| WebError::NotFound(format!("owner {owner_id} not found")))?;

  form.apply(&mut owner);

  let errors = validate_owner(&owner);
  if !errors.is_empty() {
    return Ok(form_view(&owner, &errors));
  }

  store.save_owner(owner).await.map_err(WebError::store)?;
  Ok(PageResponse::redirect(
    format!("/owners/{owner_id}"),
    Some("Owner Values Updated"),
  ))
}
