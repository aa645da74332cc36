//! The `ContactStore` trait, the relational collaborator behind the service.
//!
//! The trait is implemented by storage backends (e.g. `trala-store-sqlite`).
//! [`ContactService`](crate::ContactService) depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::contact::{Contact, ContactStatus};

/// Error bound for store backends.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` when a write was refused by a uniqueness constraint. The service
  /// reports this as a duplicate email rather than an internal failure.
  fn is_unique_violation(&self) -> bool;
}

/// Abstraction over a contact store backend.
///
/// Each method is a single statement against the store; the trait offers no
/// transactions. Implementations must bind every value as a query parameter.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: StoreError;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// List every contact, active or not, in store order.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Find a contact holding exactly `email`, ignoring the contact `excluding`
  /// if given.
  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
    excluding: Option<Uuid>,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Insert `contact` and return the row as stored.
  fn insert_contact(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Overwrite every mutable field of the contact with `contact.id`. The
  /// status column is left alone. Returns `None` if no such row exists.
  fn update_contact(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Write only the status of the contact with `id`. Returns `None` if no such
  /// row exists.
  fn set_status(
    &self,
    id: Uuid,
    status: ContactStatus,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;
}
