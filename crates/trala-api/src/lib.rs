//! JSON REST API for Trala.
//!
//! Exposes an axum [`Router`] backed by a [`ContactService`] over any
//! [`ContactStore`]. TLS and listener concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = trala_api::api_router(ContactService::new(store));
//! ```

pub mod contacts;
pub mod error;

use axum::{
  Router,
  routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use trala_core::{ContactService, store::ContactStore};

pub use error::ApiError;

/// Build the `/v1` router for `service`.
///
/// Every route answers cross-origin requests, and each request is traced.
pub fn api_router<S>(service: ContactService<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/v1/contacts", get(contacts::list::<S>))
    .route("/v1/contact", post(contacts::create::<S>))
    .route(
      "/v1/contact/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::deactivate::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(service)
}
