//! [`SqliteStore`], the SQLite implementation of [`ContactStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use trala_core::{
  contact::{Contact, ContactStatus},
  store::ContactStore,
};
use uuid::Uuid;

use crate::{
  Result,
  encode::{RawContact, encode_status, encode_uuid},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a statement expected to produce at most one contact row.
  async fn query_one(
    &self,
    sql: String,
    params: Vec<Option<String>>,
  ) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params_from_iter(params), RawContact::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
    self
      .query_one(
        format!("SELECT {COLUMNS} FROM contacts WHERE id = ?1"),
        vec![Some(encode_uuid(id))],
      )
      .await
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM contacts"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn find_by_email(
    &self,
    email: &str,
    excluding: Option<Uuid>,
  ) -> Result<Option<Contact>> {
    self
      .query_one(
        format!(
          "SELECT {COLUMNS} FROM contacts
           WHERE email = ?1 AND (?2 IS NULL OR id != ?2)
           LIMIT 1"
        ),
        vec![Some(email.to_owned()), excluding.map(encode_uuid)],
      )
      .await
  }

  async fn insert_contact(&self, contact: Contact) -> Result<Contact> {
    let raw = RawContact::from_contact(contact);

    let stored: RawContact = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO contacts (
               id, email, first_name, middle_initial, last_name,
               birth_date, country_code, phone_number, is_active
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             RETURNING {COLUMNS}"
          ),
          rusqlite::params![
            raw.id,
            raw.email,
            raw.first_name,
            raw.middle_initial,
            raw.last_name,
            raw.birth_date,
            raw.country_code,
            raw.phone_number,
            raw.is_active,
          ],
          RawContact::from_row,
        )?)
      })
      .await?;

    stored.into_contact()
  }

  async fn update_contact(&self, contact: Contact) -> Result<Option<Contact>> {
    let raw = RawContact::from_contact(contact);

    self
      .query_one(
        format!(
          "UPDATE contacts SET
             email = ?2, first_name = ?3, middle_initial = ?4, last_name = ?5,
             birth_date = ?6, country_code = ?7, phone_number = ?8
           WHERE id = ?1
           RETURNING {COLUMNS}"
        ),
        vec![
          Some(raw.id),
          Some(raw.email),
          raw.first_name,
          raw.middle_initial,
          raw.last_name,
          raw.birth_date,
          raw.country_code,
          raw.phone_number,
        ],
      )
      .await
  }

  async fn set_status(&self, id: Uuid, status: ContactStatus) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);
    let flag   = encode_status(status);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("UPDATE contacts SET is_active = ?2 WHERE id = ?1 RETURNING {COLUMNS}"),
              rusqlite::params![id_str, flag],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}
