//! Handlers for the vet listings.
//!
//! `/vets.html` renders the paginated list view; `/vets` is the
//! machine-readable listing of every vet.

use std::sync::Arc;

use axum::{Json, extract::{Query, State}};
use petclinic_core::{store::ClinicStore, vet::Vets};
use serde::Deserialize;
use serde_json::json;

use crate::{error::WebError, owners::page_request, view::PageResponse};

pub const LIST: &str = "vets/vetList";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageParams {
  pub page: Option<u32>,
}

/// `GET /vets.html[?page=<n>]`
pub async fn show_vet_list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<PageParams>,
) -> Result<PageResponse, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let request = page_request(params.page)?;
  let page = store.find_vets(request).await.map_err(WebError::store)?;

  Ok(PageResponse::render(
    LIST,
    json!({
      "listVets":    page.items,
      "currentPage": page.number,
      "totalPages":  page.total_pages,
      "totalItems":  page.total_items,
    }),
  ))
}

/// `GET /vets` — the full listing for export.
pub async fn show_resources_vet_list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vets>, WebError>
where
  S: ClinicStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let vets = store.find_all_vets().await.map_err(WebError::store)?;
  Ok(Json(vets))
}
