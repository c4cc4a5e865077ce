//! View-model responses — the interface to the external renderer.
//!
//! A render response is `200 OK` with `{"view": <name>, "model": {...}}`;
//! validation failures re-render the originating form with an `errors` array
//! inside the model. A redirect response is `303 See Other` with the flash
//! message, if any, in the `X-Flash-Message` header.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header::HeaderName},
  response::{IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};

pub static FLASH_HEADER: HeaderName = HeaderName::from_static("x-flash-message");

/// A response handed to the view renderer.
#[derive(Debug)]
pub enum PageResponse {
  /// Render `view` with `model`.
  Render { view: &'static str, model: Value },
  /// Redirect to `location`, optionally with a flash message.
  Redirect { location: String, flash: Option<&'static str> },
}

impl PageResponse {
  pub fn render(view: &'static str, model: Value) -> Self {
    Self::Render { view, model }
  }

  pub fn redirect(location: String, flash: Option<&'static str>) -> Self {
    Self::Redirect { location, flash }
  }
}

impl IntoResponse for PageResponse {
  fn into_response(self) -> Response {
    match self {
      Self::Render { view, model } => (
        StatusCode::OK,
        Json(json!({ "view": view, "model": model })),
      )
        .into_response(),
      Self::Redirect { location, flash } => {
        let mut response = Redirect::to(&location).into_response();
        if let Some(message) = flash {
          response
            .headers_mut()
            .insert(FLASH_HEADER.clone(), HeaderValue::from_static(message));
        }
        response
      }
    }
  }
}
