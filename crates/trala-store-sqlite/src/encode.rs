//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings, dates as `YYYY-MM-DD`,
//! and the status as an integer flag.

use chrono::NaiveDate;
use trala_core::{
  contact::{Contact, ContactStatus},
  input::DATE_FORMAT,
};
use uuid::Uuid;

use crate::Result;

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

pub fn encode_status(status: ContactStatus) -> bool { status.is_active() }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values of a `contacts` row, bound or read as plain SQL values.
pub struct RawContact {
  pub id:             String,
  pub email:          String,
  pub first_name:     Option<String>,
  pub middle_initial: Option<String>,
  pub last_name:      Option<String>,
  pub birth_date:     Option<String>,
  pub country_code:   Option<String>,
  pub phone_number:   Option<String>,
  pub is_active:      bool,
}

impl RawContact {
  /// Read a row selected with [`COLUMNS`](crate::schema::COLUMNS).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      email:          row.get(1)?,
      first_name:     row.get(2)?,
      middle_initial: row.get(3)?,
      last_name:      row.get(4)?,
      birth_date:     row.get(5)?,
      country_code:   row.get(6)?,
      phone_number:   row.get(7)?,
      is_active:      row.get(8)?,
    })
  }

  pub fn from_contact(contact: Contact) -> Self {
    Self {
      id:             encode_uuid(contact.id),
      email:          contact.email,
      first_name:     contact.first_name,
      middle_initial: contact.middle_initial,
      last_name:      contact.last_name,
      birth_date:     contact.birth_date.map(encode_date),
      country_code:   contact.country_code,
      phone_number:   contact.phone_number,
      is_active:      encode_status(contact.status),
    }
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:             Uuid::parse_str(&self.id)?,
      email:          self.email,
      first_name:     self.first_name,
      middle_initial: self.middle_initial,
      last_name:      self.last_name,
      birth_date:     self.birth_date.as_deref().map(decode_date).transpose()?,
      country_code:   self.country_code,
      phone_number:   self.phone_number,
      status:         ContactStatus::from_flag(self.is_active),
    })
  }
}
