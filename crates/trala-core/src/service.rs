//! [`ContactService`]: the business rules sitting between the transport and
//! the store.
//!
//! Each operation is a short sequence of independent store calls, awaited one
//! after another. Nothing here is transactional. The duplicate-email check
//! before a write can race a concurrent writer; backends close that gap with a
//! unique constraint, which surfaces as [`Error::Duplicate`] on the write
//! itself.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
  contact::{Contact, ContactStatus},
  error::{Error, Result},
  input::{ContactInput, parse_contact_id},
  store::{ContactStore, StoreError},
};

/// Source of "today" for the birth-date check.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Create, read, update, and soft-delete contacts against a store.
///
/// The store handle is injected at construction; its lifecycle belongs to the
/// caller. The service itself holds no mutable state.
pub struct ContactService<S> {
  store: Arc<S>,
  today: Clock,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), today: Arc::clone(&self.today) }
  }
}

impl<S: ContactStore> ContactService<S> {
  /// Build a service over `store`, checking birth dates against the current
  /// UTC date.
  pub fn new(store: Arc<S>) -> Self {
    Self { store, today: Arc::new(|| Utc::now().date_naive()) }
  }

  /// Replace the date source used for the birth-date check.
  pub fn with_clock(
    mut self,
    today: impl Fn() -> NaiveDate + Send + Sync + 'static,
  ) -> Self {
    self.today = Arc::new(today);
    self
  }

  fn today(&self) -> NaiveDate { (self.today)() }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Look up one contact. An absent record is `Ok(None)`, never an error; so
  /// is an id that cannot name any record.
  pub async fn get(&self, id: &str) -> Result<Option<Contact>> {
    let Ok(id) = Uuid::parse_str(id) else {
      return Ok(None);
    };
    self.store.get_contact(id).await.map_err(Error::internal)
  }

  /// Every contact regardless of status, in store order.
  pub async fn list(&self) -> Result<Vec<Contact>> {
    self.store.list_contacts().await.map_err(Error::internal)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Validate `input`, refuse a taken email, and insert a new active contact
  /// under a fresh id.
  pub async fn create(&self, input: ContactInput) -> Result<Contact> {
    let new = input
      .into_new_contact(self.today())
      .inspect_err(|e| tracing::debug!(error = %e, "rejected contact input"))?;

    self.ensure_email_free(&new.email, None).await?;

    let email = new.email.clone();
    let stored = self
      .store
      .insert_contact(new.into_contact(Uuid::new_v4()))
      .await
      .map_err(|e| write_error(e, &email))?;

    tracing::info!(contact_id = %stored.id, "created contact");
    Ok(stored)
  }

  /// Merge the supplied fields of `input` onto the contact `id`. Fields not
  /// supplied keep their stored values; the status is never changed.
  pub async fn update(&self, id: &str, input: ContactInput) -> Result<Contact> {
    let (id, patch) = match (parse_contact_id(id), input.into_patch(self.today())) {
      (Ok(id), Ok(patch)) => (id, patch),
      (id, patch) => {
        let err = merge_failures([id.err(), patch.err()]);
        tracing::debug!(error = %err, "rejected contact update");
        return Err(err);
      }
    };

    let existing = self
      .store
      .get_contact(id)
      .await
      .map_err(Error::internal)?
      .ok_or(Error::NotFound(id))?;

    if let Some(email) = &patch.email {
      self.ensure_email_free(email, Some(id)).await?;
    }

    let merged = patch.apply(existing);
    let email = merged.email.clone();
    let stored = self
      .store
      .update_contact(merged)
      .await
      .map_err(|e| write_error(e, &email))?
      .ok_or(Error::NotFound(id))?;

    tracing::info!(contact_id = %id, "updated contact");
    Ok(stored)
  }

  /// Soft-delete the contact `id`. Only the status is written.
  ///
  /// Deactivating an already inactive contact succeeds without a write and
  /// returns the record unchanged.
  pub async fn deactivate(&self, id: &str) -> Result<Contact> {
    let id = parse_contact_id(id)?;

    let existing = self
      .store
      .get_contact(id)
      .await
      .map_err(Error::internal)?
      .ok_or(Error::NotFound(id))?;

    if existing.status == ContactStatus::Inactive {
      tracing::debug!(contact_id = %id, "contact already inactive");
      return Ok(existing);
    }

    let stored = self
      .store
      .set_status(id, ContactStatus::Inactive)
      .await
      .map_err(Error::internal)?
      .ok_or(Error::NotFound(id))?;

    tracing::info!(contact_id = %id, "deactivated contact");
    Ok(stored)
  }

  async fn ensure_email_free(&self, email: &str, excluding: Option<Uuid>) -> Result<()> {
    let holder = self
      .store
      .find_by_email(email, excluding)
      .await
      .map_err(Error::internal)?;

    match holder {
      Some(other) => {
        tracing::warn!(holder = %other.id, "email address already in use");
        Err(Error::Duplicate { email: email.to_owned() })
      }
      None => Ok(()),
    }
  }
}

fn write_error<E: StoreError>(err: E, email: &str) -> Error {
  if err.is_unique_violation() {
    tracing::warn!("email address claimed by a concurrent write");
    Error::Duplicate { email: email.to_owned() }
  } else {
    Error::internal(err)
  }
}

/// Fold several validation failures into one carrying every field.
fn merge_failures(errors: impl IntoIterator<Item = Option<Error>>) -> Error {
  let mut fields = Vec::new();
  for err in errors.into_iter().flatten() {
    match err {
      Error::Validation(mut f) => fields.append(&mut f),
      other => return other,
    }
  }
  Error::Validation(fields)
}
